//! Error handling types for the parser
//!
//! Parsing failures are reported through [`ParseError`], which pairs a
//! categorized [`ParseErrorKind`] with an optional source location. Failed
//! queries on an already built tree are reported through [`NodeError`].

use std::{error::Error, fmt};

use thiserror::Error;

use crate::parser::event::EventKind;

/// Main error type for parsing operations
#[derive(Debug)]
pub struct ParseError {
    /// The specific kind of error
    kind: ParseErrorKind,
    /// Location where the error occurred
    location: Option<Location>,
    /// Additional context for the error
    context: Option<String>,
    /// Source error that caused this error
    source: Option<Box<dyn Error + Send + Sync>>,
}

/// Represents a location in the input text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
}

impl Location {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Top-level error categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    IO(IOError),
    Security(SecurityError),
    Structure(StructuralError),
    Validation(ValidationError),
    /// A lookup on a built tree failed
    Query(NodeError),
}

/// The input text is not well-formed markup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Input holds no root element at all
    #[error("Document has no root element")]
    EmptyDocument,
    /// More than one top-level element
    #[error("Found a second root element <{0}>; a document must have exactly one")]
    MultipleRoots(String),
    /// Non-whitespace character data before or after the root element
    #[error("Text is not allowed outside the root element")]
    TextOutsideRoot,
    /// A closing tag whose name does not match the innermost open element
    #[error("Mismatched closing tag: expected </{expected}>, found </{found}>")]
    MismatchedTag { expected: String, found: String },
    /// A closing tag with no open element to close
    #[error("Unexpected closing tag </{0}>")]
    UnexpectedClosingTag(String),
    /// Input ended while elements were still open
    #[error("Element <{0}> is never closed")]
    UnclosedElement(String),
    /// Input ended in the middle of a construct
    #[error("Unexpected end of input inside {0}")]
    UnexpectedEof(&'static str),
    /// A character that cannot appear at this point
    #[error("Unexpected character '{0}'")]
    UnexpectedCharacter(char),
    /// A tag or attribute name is missing or malformed
    #[error("Expected a name")]
    InvalidName,
    /// The same attribute appears twice on one element
    #[error("Duplicate attribute '{0}'")]
    DuplicateAttribute(String),
    /// Unknown or malformed entity reference
    #[error("Invalid entity reference '&{0};'")]
    InvalidEntity(String),
    /// Markup start character inside an attribute value
    #[error("Attribute values may not contain '<'")]
    LessThanInAttribute,
    /// `--` inside a comment body
    #[error("Comments may not contain '--'")]
    DoubleHyphenInComment,
    /// `]]>` in character data outside a CDATA section
    #[error("Character data may not contain ']]>'")]
    CdataEndInText,
}

/// The event sequence does not encode exactly one tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// The cursor ran out of events
    #[error("Event stream ended at position {position} while expecting {expected}")]
    UnexpectedEnd {
        position: usize,
        expected: &'static str,
    },
    /// An event of the wrong kind where a node had to start
    #[error("Unexpected {found} event at position {position}")]
    UnexpectedEvent { position: usize, found: EventKind },
    /// Events left over once the root node was complete
    #[error("{remaining} event(s) left after the root element, starting at position {position}")]
    TrailingEvents { position: usize, remaining: usize },
}

/// Security-related errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecurityError {
    /// Exceeded maximum depth of nesting
    #[error("Maximum nesting depth exceeded")]
    MaxDepthExceeded,
    /// Exceeded maximum input size
    #[error("Maximum input size exceeded")]
    MaxSizeExceeded,
    /// Exceeded maximum number of attributes on one element
    #[error("Maximum number of attributes exceeded")]
    MaxAttributesExceeded,
    /// Exceeded maximum text length of one element
    #[error("Maximum text length exceeded")]
    MaxTextLengthExceeded,
}

/// IO operation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IOError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),
    /// Permission denied
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    /// Error reading from a file
    #[error("Read error: {0}")]
    ReadError(String),
    /// Error writing to a file
    #[error("Write error: {0}")]
    WriteError(String),
}

/// Failed lookup on a built [`Node`](crate::Node)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("Attribute with key \"{0}\" does not exist.")]
    AttributeNotFound(String),
    #[error("Child with index {index} does not exist. Index was out of bounds.")]
    ChildIndexOutOfBounds { index: usize, count: usize },
    #[error("Child with name \"{0}\" does not exist.")]
    ChildNameNotFound(String),
}

impl ParseError {
    pub fn new(kind: ParseErrorKind) -> Self {
        Self {
            kind,
            location: None,
            context: None,
            source: None,
        }
    }

    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.location = Some(Location::new(line, column));
        self
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// True when the input text itself was rejected
    pub fn is_validation(&self) -> bool {
        matches!(self.kind, ParseErrorKind::Validation(_))
    }

    /// True when the event sequence did not describe a single tree
    pub fn is_structural(&self) -> bool {
        matches!(self.kind, ParseErrorKind::Structure(_))
    }
}

impl From<ValidationError> for ParseError {
    fn from(err: ValidationError) -> Self {
        Self::new(ParseErrorKind::Validation(err))
    }
}

impl From<StructuralError> for ParseError {
    fn from(err: StructuralError) -> Self {
        Self::new(ParseErrorKind::Structure(err))
    }
}

impl From<SecurityError> for ParseError {
    fn from(err: SecurityError) -> Self {
        Self::new(ParseErrorKind::Security(err))
    }
}

impl From<IOError> for ParseError {
    fn from(err: IOError) -> Self {
        Self::new(ParseErrorKind::IO(err))
    }
}

impl From<NodeError> for ParseError {
    fn from(err: NodeError) -> Self {
        Self::new(ParseErrorKind::Query(err))
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IO(err) => err.fmt(f),
            Self::Security(err) => err.fmt(f),
            Self::Structure(err) => err.fmt(f),
            Self::Validation(err) => write!(f, "The supplied XML is invalid: {err}"),
            Self::Query(err) => err.fmt(f),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(loc) = &self.location {
            write!(f, "at {}: {}", loc, self.kind)?;
        } else {
            write!(f, "Error: {}", self.kind)?;
        }

        if let Some(ctx) = &self.context {
            write!(f, "\nContext: {}", ctx)?;
        }

        if let Some(source) = &self.source {
            write!(f, "\nCaused by: {}", source)?;
        }

        Ok(())
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        let source: &(dyn Error + 'static) = self.source.as_deref()?;
        Some(source)
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;
