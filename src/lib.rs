//! xml2tree: parse XML text into an immutable node tree
//!
//! This crate provides functionality to:
//! - Scan XML into a flat sequence of structural events
//! - Rebuild the element tree from those events
//! - Query elements by name, position and attribute
//! - Render a tree as a nested map or as compact JSON text
//!
//! # Examples
//! ```
//! use xml2tree::{parse, Result};
//!
//! fn example() -> Result<()> {
//!     let root = parse(r#"<a><b id="1">x</b><c/></a>"#)?;
//!     assert_eq!(root.child_count(), 2);
//!     assert_eq!(root.get_child_by_name("b")?.get_attribute("id")?, "1");
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

use std::path::Path;

use tracing::{debug, info, instrument};

pub mod error;
pub mod formatter;
pub mod intern;
pub mod node;
pub mod parser;
pub mod test_utils;
pub mod utils;
pub mod value;

// Re-exports
pub use error::{NodeError, ParseError, ParseErrorKind, Result};
pub use formatter::{FormatConfig, Formatter, JsonFormatter};
pub use node::{ChildIndices, ChildList, Node};
pub use parser::{
    EventKind, EventSource, MarkupScanner, Output, OutputKind, Parser, ParserConfig,
    StructuralEvent,
};
pub use value::Value;

/// Parse `input` with the default limits
pub fn parse(input: &str) -> Result<Node> {
    Parser::new().parse(input)
}

pub fn parse_with_config(input: &str, config: ParserConfig) -> Result<Node> {
    Parser::with_config(config).parse(input)
}

/// Parse `input` and return it as `kind`
pub fn parse_as(input: &str, kind: OutputKind) -> Result<Output> {
    Parser::new().parse_as(input, kind)
}

#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn parse_file(path: impl AsRef<Path>) -> Result<Node> {
    debug!("Starting to parse file");
    let content = utils::read_file(path.as_ref())?;
    info!("File read successfully ({} bytes)", content.len());
    let root = parse(&content)?;
    debug!("Parsing completed");
    Ok(root)
}
