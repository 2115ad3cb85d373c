//! Structural events: the flat form of a markup tree.
//!
//! An event source turns markup text into a `Vec<StructuralEvent>` in document
//! order. Nesting is encoded only through the pairing of [`EventKind::Open`]
//! and [`EventKind::Close`]; an element without child elements is a single
//! [`EventKind::Complete`] event.

use std::fmt;

use indexmap::IndexMap;

/// Kind of a structural event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Start tag of an element that has child elements
    Open,
    /// End tag matching the most recent unclosed `Open`
    Close,
    /// Element without child elements
    Complete,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Close => write!(f, "close"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

/// One unit of the flat event sequence.
///
/// Payload fields are optional; consumers treat a missing name or text as the
/// empty string and missing attributes as an empty map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralEvent {
    pub kind: EventKind,
    pub name: Option<String>,
    pub text: Option<String>,
    pub attributes: Option<IndexMap<String, String>>,
}

impl StructuralEvent {
    /// Event of `kind` with no payload
    pub const fn bare(kind: EventKind) -> Self {
        Self {
            kind,
            name: None,
            text: None,
            attributes: None,
        }
    }

    pub fn open(name: impl Into<String>) -> Self {
        Self::bare(EventKind::Open).with_name(name)
    }

    pub fn close(name: impl Into<String>) -> Self {
        Self::bare(EventKind::Close).with_name(name)
    }

    pub fn complete(name: impl Into<String>) -> Self {
        Self::bare(EventKind::Complete).with_name(name)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .get_or_insert_with(IndexMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_attributes(mut self, attributes: IndexMap<String, String>) -> Self {
        self.attributes = Some(attributes);
        self
    }

    /// Append a chunk of character data to this event's text
    pub(crate) fn push_text(&mut self, chunk: &str) {
        self.text.get_or_insert_with(String::new).push_str(chunk);
    }

    /// Length of the accumulated text in bytes
    pub(crate) fn text_len(&self) -> usize {
        self.text.as_ref().map_or(0, String::len)
    }

    pub fn is_close(&self) -> bool {
        self.kind == EventKind::Close
    }
}
