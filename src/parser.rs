//! Text to tree pipeline.
//!
//! Parsing runs in two phases. An [`EventSource`] turns the raw text into a
//! flat list of [`StructuralEvent`]s, then a [`TreeBuilder`] folds that list
//! back into a [`Node`] tree.

pub mod builder;
pub mod config;
pub mod cursor;
pub mod event;
pub mod scanner;

use tracing::{debug, instrument};

pub use self::builder::TreeBuilder;
pub use self::config::{ParserConfig, ParsingContext};
pub use self::event::{EventKind, StructuralEvent};
pub use self::scanner::MarkupScanner;
use crate::error::Result;
use crate::intern::StringInterner;
use crate::node::Node;
use crate::value::Value;

/// Producer of structural events for a whole document.
///
/// Implementations reject input that is not well-formed with a
/// validation error and never return a partial sequence.
pub trait EventSource {
    fn scan(&self, input: &str, config: &ParserConfig) -> Result<Vec<StructuralEvent>>;
}

/// Shape a parse result is returned in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputKind {
    #[default]
    Tree,
    Flat,
    Encoded,
}

/// Parse result in the requested [`OutputKind`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Tree(Node),
    Flat(Value),
    Encoded(String),
}

impl Output {
    pub const fn kind(&self) -> OutputKind {
        match self {
            Self::Tree(_) => OutputKind::Tree,
            Self::Flat(_) => OutputKind::Flat,
            Self::Encoded(_) => OutputKind::Encoded,
        }
    }

    pub fn into_tree(self) -> Option<Node> {
        match self {
            Self::Tree(node) => Some(node),
            _ => None,
        }
    }
}

/// Reusable parser.
///
/// Holds the limits and the event source. Every build interns names in a
/// fresh interner, so nothing accumulates between documents and `&Parser`
/// can be used from several threads at once.
#[derive(Debug)]
pub struct Parser<S = MarkupScanner> {
    source: S,
    config: ParserConfig,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self::with_source(MarkupScanner, config)
    }
}

impl<S: EventSource> Parser<S> {
    /// Parser that takes its events from `source`
    pub fn with_source(source: S, config: ParserConfig) -> Self {
        Self { source, config }
    }

    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Run only the event source
    pub fn scan(&self, input: &str) -> Result<Vec<StructuralEvent>> {
        self.source.scan(input, &self.config)
    }

    /// Run only the tree builder
    pub fn build(&self, events: Vec<StructuralEvent>) -> Result<Node> {
        let interner = StringInterner::new();
        TreeBuilder::new(events, &self.config, &interner).build()
    }

    #[instrument(skip_all, fields(len = input.len()))]
    pub fn parse(&self, input: &str) -> Result<Node> {
        let events = self.scan(input)?;
        let root = self.build(events)?;
        debug!("Parsed document rooted at <{}>", root.name());
        Ok(root)
    }

    /// Parse and return the result as `kind`
    pub fn parse_as(&self, input: &str, kind: OutputKind) -> Result<Output> {
        let root = self.parse(input)?;
        Ok(match kind {
            OutputKind::Tree => Output::Tree(root),
            OutputKind::Flat => Output::Flat(root.to_flat_structure()),
            OutputKind::Encoded => Output::Encoded(root.to_encoded_text()),
        })
    }
}
