//! Immutable element tree.
//!
//! A [`Node`] is fully populated when it is built and never changes
//! afterwards. It owns its children outright, so a tree has no shared nodes
//! and no back-references, and can be read from any number of threads.

use std::fmt;

use indexmap::IndexMap;

use crate::error::NodeError;
use crate::formatter::{FormatConfig, Formatter, JsonFormatter};
use crate::intern::InternedString;
use crate::value::Value;

/// One markup element
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Node {
    name: InternedString,
    content: String,
    attributes: IndexMap<String, String>,
    children: Vec<Node>,
}

/// How [`Node::children_filtered`] keys the children it returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChildIndices {
    /// Keep each child's position among all children of its parent
    #[default]
    Preserve,
    /// Number the matching children from zero
    Renumber,
}

impl Node {
    pub fn new(
        name: impl Into<InternedString>,
        content: impl Into<String>,
        attributes: IndexMap<String, String>,
        children: Vec<Self>,
    ) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            attributes,
            children,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name handle shared with same-named nodes of this tree
    pub const fn interned_name(&self) -> &InternedString {
        &self.name
    }

    /// The element's text, or `None` when it has none.
    ///
    /// An element whose stored text is the empty string also returns `None`;
    /// use [`Node::raw_content`] for the stored value.
    pub fn content(&self) -> Option<&str> {
        if self.content.is_empty() {
            None
        } else {
            Some(&self.content)
        }
    }

    pub fn raw_content(&self) -> &str {
        &self.content
    }

    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// All attributes, in document order
    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn get_attribute(&self, name: &str) -> Result<&str, NodeError> {
        self.attributes
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| NodeError::AttributeNotFound(name.to_string()))
    }

    /// All children, in document order
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Children named `name`, keyed by their position among all children
    pub fn children_named(&self, name: &str) -> ChildList<'_> {
        self.children_filtered(Some(name), ChildIndices::default())
    }

    /// Children matching an optional name filter.
    ///
    /// With `ChildIndices::Preserve` the keys are the original positions, so
    /// they have gaps where non-matching children were skipped.
    pub fn children_filtered(&self, name: Option<&str>, indices: ChildIndices) -> ChildList<'_> {
        let matching = self
            .children
            .iter()
            .enumerate()
            .filter(|(_, child)| name.is_none_or(|name| child.name() == name));

        let entries = match indices {
            ChildIndices::Preserve => matching.collect(),
            ChildIndices::Renumber => matching
                .map(|(_, child)| child)
                .enumerate()
                .collect(),
        };
        ChildList { entries }
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn child_count_named(&self, name: &str) -> usize {
        self.children.iter().filter(|child| child.name() == name).count()
    }

    pub fn get_child(&self, index: usize) -> Result<&Self, NodeError> {
        self.children
            .get(index)
            .ok_or(NodeError::ChildIndexOutOfBounds {
                index,
                count: self.children.len(),
            })
    }

    /// First child named `name`, in document order
    pub fn get_child_by_name(&self, name: &str) -> Result<&Self, NodeError> {
        self.children
            .iter()
            .find(|child| child.name() == name)
            .ok_or_else(|| NodeError::ChildNameNotFound(name.to_string()))
    }

    /// Nested map view of the subtree.
    ///
    /// Keys are `name`, `content`, `attributes` and `children`, in that order.
    /// `content` is the stored text (possibly empty) and attributes are sorted
    /// by name.
    pub fn to_flat_structure(&self) -> Value {
        let mut attributes: Vec<(&String, &String)> = self.attributes.iter().collect();
        attributes.sort_by(|(left, _), (right, _)| left.cmp(right));

        let mut map = IndexMap::with_capacity(4);
        map.insert("name".to_string(), Value::String(self.name.to_string()));
        map.insert("content".to_string(), Value::String(self.content.clone()));
        map.insert(
            "attributes".to_string(),
            Value::Map(
                attributes
                    .into_iter()
                    .map(|(key, value)| (key.clone(), Value::String(value.clone())))
                    .collect(),
            ),
        );
        map.insert(
            "children".to_string(),
            Value::Array(self.children.iter().map(Self::to_flat_structure).collect()),
        );
        Value::Map(map)
    }

    /// Compact JSON encoding of [`Node::to_flat_structure`].
    ///
    /// Equal trees always encode to identical text.
    pub fn to_encoded_text(&self) -> String {
        self.to_encoded_text_with(&FormatConfig::compact())
    }

    pub fn to_encoded_text_with(&self, config: &FormatConfig) -> String {
        JsonFormatter.format(&self.to_flat_structure(), config)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_encoded_text())
    }
}

/// Children selected by [`Node::children_filtered`], in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildList<'a> {
    entries: IndexMap<usize, &'a Node>,
}

impl<'a> ChildList<'a> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Child stored under `key`
    pub fn get(&self, key: usize) -> Option<&'a Node> {
        self.entries.get(&key).copied()
    }

    pub fn contains_key(&self, key: usize) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn keys(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.keys().copied()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &'a Node> + '_ {
        self.entries.values().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &'a Node)> + '_ {
        self.entries.iter().map(|(key, node)| (*key, *node))
    }
}

impl<'a> IntoIterator for ChildList<'a> {
    type Item = (usize, &'a Node);
    type IntoIter = indexmap::map::IntoIter<usize, &'a Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str) -> Node {
        Node::new(name, "", IndexMap::new(), Vec::new())
    }

    fn sample() -> Node {
        let mut attributes = IndexMap::new();
        attributes.insert("id".to_string(), "abc123".to_string());
        attributes.insert("name".to_string(), "testname".to_string());
        Node::new(
            "childlist",
            "",
            attributes,
            vec![
                Node::new("child", "-", IndexMap::new(), Vec::new()),
                Node::new("othername", "Test", IndexMap::new(), Vec::new()),
                Node::new("child", "!", IndexMap::new(), Vec::new()),
                Node::new("child", "Test.", IndexMap::new(), Vec::new()),
            ],
        )
    }

    #[test]
    fn test_content_collapses_empty_string() {
        let node = leaf("a");
        assert_eq!(node.content(), None);
        assert_eq!(node.raw_content(), "");
        let node = Node::new("a", "x", IndexMap::new(), Vec::new());
        assert_eq!(node.content(), Some("x"));
    }

    #[test]
    fn test_attribute_queries() {
        let node = sample();
        assert!(node.has_attributes());
        assert_eq!(node.attribute_count(), 2);
        assert!(node.has_attribute("id"));
        assert!(!node.has_attribute("value"));
        assert_eq!(node.get_attribute("name"), Ok("testname"));
        assert_eq!(
            node.get_attribute("value"),
            Err(NodeError::AttributeNotFound("value".to_string()))
        );
    }

    #[test]
    fn test_preserved_indices_have_gaps() {
        let node = sample();
        let children = node.children_named("child");
        assert_eq!(children.keys().collect::<Vec<_>>(), vec![0, 2, 3]);
        assert!(!children.contains_key(1));
        assert_eq!(children.get(2).and_then(Node::content), Some("!"));
    }

    #[test]
    fn test_renumbered_indices_are_contiguous() {
        let node = sample();
        let children = node.children_filtered(Some("child"), ChildIndices::Renumber);
        assert_eq!(children.keys().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(children.get(1).and_then(Node::content), Some("!"));
    }

    #[test]
    fn test_unfiltered_list_matches_children() {
        let node = sample();
        let all = node.children_filtered(None, ChildIndices::Preserve);
        assert_eq!(all.len(), node.child_count());
        assert!(all.nodes().zip(node.children()).all(|(a, b)| a == b));
    }

    #[test]
    fn test_child_lookup() {
        let node = sample();
        assert_eq!(node.child_count_named("child"), 3);
        assert_eq!(node.get_child(1).map(Node::name), Ok("othername"));
        assert_eq!(
            node.get_child(4),
            Err(NodeError::ChildIndexOutOfBounds { index: 4, count: 4 })
        );
        assert_eq!(node.get_child_by_name("child").map(Node::raw_content), Ok("-"));
        assert_eq!(
            node.get_child_by_name("missing"),
            Err(NodeError::ChildNameNotFound("missing".to_string()))
        );
        assert!(leaf("empty").get_child(0).is_err());
    }

    #[test]
    fn test_flat_structure_shape() {
        let node = sample();
        let flat = node.to_flat_structure();
        let keys: Vec<&str> = flat
            .as_map()
            .map(|map| map.keys().map(String::as_str).collect())
            .unwrap_or_default();
        assert_eq!(keys, vec!["name", "content", "attributes", "children"]);
        assert_eq!(flat.get("content").and_then(Value::as_str), Some(""));
        assert_eq!(
            flat.get("children").and_then(Value::as_array).map(<[Value]>::len),
            Some(4)
        );
    }

    #[test]
    fn test_encoding_ignores_attribute_order() {
        let mut forward = IndexMap::new();
        forward.insert("a".to_string(), "1".to_string());
        forward.insert("b".to_string(), "2".to_string());
        let mut backward = IndexMap::new();
        backward.insert("b".to_string(), "2".to_string());
        backward.insert("a".to_string(), "1".to_string());

        let left = Node::new("x", "", forward, Vec::new());
        let right = Node::new("x", "", backward, Vec::new());
        assert_eq!(left, right);
        assert_eq!(left.to_encoded_text(), right.to_encoded_text());
        assert_eq!(
            left.to_encoded_text(),
            r#"{"name":"x","content":"","attributes":{"a":"1","b":"2"},"children":[]}"#
        );
        assert_eq!(left.to_string(), left.to_encoded_text());
    }
}
