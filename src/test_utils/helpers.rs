use std::{env, fs, path::PathBuf};

use crate::node::Node;

pub fn tmp_file_path(name: &str) -> PathBuf {
    let mut dir = env::temp_dir();
    dir.push("xml2tree_tests");
    let _ = fs::create_dir_all(&dir);
    dir.push(name);
    dir
}

/// `depth` elements nested inside each other, innermost holding `leaf`
pub fn generate_nested(depth: usize) -> String {
    let mut xml = String::new();
    for i in 0..depth {
        xml.push_str(&format!("<n{}>", i));
    }
    xml.push_str("leaf");
    for i in (0..depth).rev() {
        xml.push_str(&format!("</n{}>", i));
    }
    xml
}

/// A root with `count` attributed children, alternating two names
pub fn generate_wide(count: usize) -> String {
    let mut xml = String::from("<root>");
    for i in 0..count {
        let name = if i % 2 == 0 { "item" } else { "other" };
        xml.push_str(&format!(r#"<{name} id="{i}">value {i}</{name}>"#));
    }
    xml.push_str("</root>");
    xml
}

/// Asserts that `node` encodes to exactly `expected`
///
/// # Panics
///
/// Panics if the encodings differ
pub fn assert_encodes_to(node: &Node, expected: &str) {
    let actual = node.to_encoded_text();
    assert_eq!(
        actual, expected,
        "encoded text mismatch for <{}>",
        node.name()
    );
}
