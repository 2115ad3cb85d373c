//! Nested-map view of a node tree.
//!
//! [`Value`] is what [`Node::to_flat_structure`](crate::Node::to_flat_structure)
//! returns: plain strings, arrays and insertion-ordered maps, with no node
//! objects left in it.

use std::fmt;

use indexmap::IndexMap;

use crate::formatter::{FormatConfig, Formatter, JsonFormatter};

/// Flat value tree
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum Value {
    /// Represents a string value
    String(String),
    /// Represents an array of values
    Array(Vec<Value>),
    /// Represents a map with insertion-ordered keys
    Map(IndexMap<String, Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Self>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Look up `key` when this value is a map
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_map().and_then(|map| map.get(key))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&JsonFormatter.format(self, &FormatConfig::compact()))
    }
}
