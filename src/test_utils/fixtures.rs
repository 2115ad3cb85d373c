pub const TEST_FILES: [&str; 3] = [
    "tests/input/catalog.xml",
    "tests/input/complex.xml",
    "tests/input/mixed.xml",
];

pub const VALID_XML: &str = r#"<?xml version="1.0"?>
<catalog>
   <book>
      <author>Gambardella, Matthew</author>
      <title>XML Developer's Guide</title>
      <genre>Computer</genre>
      <price>44.95</price>
      <publish_date>2000-10-01</publish_date>
      <description>An in-depth look at creating applications with XML.</description>
   </book>
</catalog>"#;

pub const INVALID_XML: &str = r#"<?xml version="1.0"?>
<catalog>
   <boo
      <author>Gambardella, Matthew</author>
      <title>XML Developer's Guide</title>
   </book>
</catalog>"#;

/// Missing the root's closing tag
pub const FRAGMENT_XML: &str = r#"<?xml version="1.0"?>
<catalog>
   <book>
      <author>Gambardella, Matthew</author>
      <title>XML Developer's Guide</title>
   </book>"#;

/// Two top-level elements
pub const ROOTLESS_XML: &str = r#"<object id="abc123">
    <childlist>
        <child id="1">-</child>
    </childlist>
</object>
<object id="321cba">
    <childlist>
        <child id="2">Test!</child>
    </childlist>
</object>"#;

pub const COMPLEX_XML: &str = r#"<?xml version="1.0"?>
<complex>
    <object id="abc123" name="testname">
        <childlist>
            <child id="1">-</child>
            <othername>Test</othername>
            <child id="2">!</child>
            <child id="3">Test.</child>
        </childlist>
    </object>
    <object>Text.</object>
    <object id="321cba">
        <childlist>
            <child id="1" name="test">
                <subchild att="abc">
                <![CDATA[Hi.]]>
                </subchild>
            </child>
            <child id="2">Test!</child>
        </childlist>
    </object>
</complex>"#;

pub const INVALID_XML_SAMPLES: [(&str, &str); 18] = [
    ("", "Empty document"),
    ("<a/><b/>", "Two root elements"),
    ("<a>", "Unclosed element"),
    ("<a></b>", "Mismatched closing tag"),
    ("</a>", "Closing tag without opening tag"),
    ("text<a/>", "Text before the root"),
    ("<a x=\"1\" x=\"2\"/>", "Duplicate attribute"),
    ("<a x=1/>", "Unquoted attribute value"),
    ("<a>&bogus;</a>", "Unknown entity"),
    ("<a", "Unterminated start tag"),
    ("<a>&#x+41;</a>", "Signed hex character reference"),
    ("<a>&#+66;</a>", "Signed decimal character reference"),
    ("<a>&#x;</a>", "Character reference without digits"),
    ("<a>&#0;</a>", "Reference to NUL"),
    ("<a>&#xD800;</a>", "Reference to a surrogate"),
    ("<a><!-- a -- b --></a>", "Double hyphen in comment"),
    ("<a><!-- a ---></a>", "Comment ending in three hyphens"),
    ("<a>x]]>y</a>", "CDATA terminator in text"),
];
