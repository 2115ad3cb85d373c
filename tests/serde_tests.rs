#![cfg(feature = "serde")]
#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]

use xml2tree::test_utils::*;

#[test]
fn test_flat_structure_serializes_like_encoded_text() {
    let root = parse(COMPLEX_XML).unwrap();
    let via_serde = serde_json::to_string(&root.to_flat_structure()).unwrap();
    assert_eq!(via_serde, root.to_encoded_text());
}

#[test]
fn test_node_serializes_its_fields() {
    let root = parse(r#"<a id="7"><b>x</b></a>"#).unwrap();
    let json = serde_json::to_value(&root).unwrap();
    assert_eq!(json["name"], "a");
    assert_eq!(json["content"], "");
    assert_eq!(json["attributes"]["id"], "7");
    assert_eq!(json["children"][0]["name"], "b");
    assert_eq!(json["children"][0]["content"], "x");
}

#[test]
fn test_encoded_text_parses_as_json() {
    let data = TestData::load().unwrap();
    for input in [data.catalog, data.complex, data.mixed] {
        let root = parse(&input).unwrap();
        let json: serde_json::Value = serde_json::from_str(&root.to_encoded_text()).unwrap();
        let pretty: serde_json::Value =
            serde_json::from_str(&root.to_encoded_text_with(&FormatConfig::pretty())).unwrap();
        assert_eq!(json, pretty);
    }
}
