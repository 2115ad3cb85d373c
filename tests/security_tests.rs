#![allow(clippy::panic_in_result_fn)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]

use xml2tree::test_utils::*;

fn security_error(result: Result<Node>) -> SecurityError {
    match result.map_err(|e| e.kind().clone()) {
        Err(ParseErrorKind::Security(err)) => err,
        other => panic!("Expected security error, got {:?}", other),
    }
}

#[test]
fn test_max_input_size() {
    let config = ParserConfig::default().with_max_size(64);
    let input = format!("<a>{}</a>", "x".repeat(64));
    assert_eq!(
        security_error(parse_with_config(&input, config)),
        SecurityError::MaxSizeExceeded
    );
}

#[test]
fn test_default_max_input_size() {
    let input = format!("<a>{}</a>", "x".repeat(DEFAULT_MAX_SIZE));
    let err = parse(&input).unwrap_err();
    assert!(matches!(
        err.kind(),
        ParseErrorKind::Security(SecurityError::MaxSizeExceeded)
    ));
    assert!(err.context().is_some());
}

#[test]
fn test_depth_at_limit_is_accepted() -> Result<()> {
    let root = parse(&generate_nested(DEFAULT_MAX_DEPTH))?;
    let mut node = &root;
    let mut depth = 1;
    while node.has_children() {
        node = node.get_child(0)?;
        depth += 1;
    }
    assert_eq!(depth, DEFAULT_MAX_DEPTH);
    assert_eq!(node.content(), Some("leaf"));
    Ok(())
}

#[test]
fn test_stack_overflow_prevention() {
    let err = parse(&generate_nested(DEFAULT_MAX_DEPTH + 1)).unwrap_err();
    assert!(matches!(
        err.kind(),
        ParseErrorKind::Security(SecurityError::MaxDepthExceeded)
    ));
    assert!(err.location().is_some());
}

#[test]
fn test_custom_depth_limit() {
    let config = ParserConfig::default().with_max_depth(3);
    assert!(parse_with_config(&generate_nested(3), config.clone()).is_ok());
    assert_eq!(
        security_error(parse_with_config(&generate_nested(4), config)),
        SecurityError::MaxDepthExceeded
    );
}

#[test]
fn test_self_closing_elements_do_not_accumulate_depth() -> Result<()> {
    let config = ParserConfig::default().with_max_depth(2);
    let input = format!("<root>{}</root>", "<leaf/>".repeat(500));
    let root = parse_with_config(&input, config)?;
    assert_eq!(root.child_count(), 500);
    Ok(())
}

#[test]
fn test_max_attributes() {
    let attributes: Vec<String> = (0..=DEFAULT_MAX_ATTRIBUTES)
        .map(|i| format!(r#"a{}="{}""#, i, i))
        .collect();
    let input = format!("<a {}/>", attributes.join(" "));
    assert_eq!(
        security_error(parse(&input)),
        SecurityError::MaxAttributesExceeded
    );

    let config = ParserConfig::default().with_max_attributes(2);
    assert!(parse_with_config(r#"<a x="1" y="2"/>"#, config.clone()).is_ok());
    assert_eq!(
        security_error(parse_with_config(r#"<a x="1" y="2" z="3"/>"#, config)),
        SecurityError::MaxAttributesExceeded
    );
}

#[test]
fn test_max_text_length() {
    let config = ParserConfig::default().with_max_text_length(8);
    assert!(parse_with_config("<a>12345678</a>", config.clone()).is_ok());
    assert_eq!(
        security_error(parse_with_config("<a>123456789</a>", config.clone())),
        SecurityError::MaxTextLengthExceeded
    );
    // Chunks split by a child element still count towards the same element
    assert_eq!(
        security_error(parse_with_config("<a>12345<b/>6789</a>", config)),
        SecurityError::MaxTextLengthExceeded
    );
}

#[test]
fn test_wide_document() -> Result<()> {
    let root = parse(&generate_wide(2_000))?;
    assert_eq!(root.child_count(), 2_000);
    assert_eq!(root.child_count_named("item"), 1_000);
    assert_eq!(root.get_child(1_999)?.get_attribute("id")?, "1999");
    Ok(())
}
