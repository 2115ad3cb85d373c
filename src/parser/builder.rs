//! Tree builder: rebuilds a node tree from a flat event sequence.
//!
//! Recursive descent with one call frame per element. The call stack is the
//! nesting stack: a frame that starts on an `Open` event builds children until
//! its own `Close` shows up in the one-event lookahead, then consumes it.

use std::iter::Peekable;
use std::vec;

use tracing::{debug, instrument, trace};

use super::config::{ParserConfig, ParsingContext};
use super::event::{EventKind, StructuralEvent};
use crate::error::{Result, StructuralError};
use crate::intern::StringInterner;
use crate::node::Node;

/// Forward-only cursor over the events with one-step lookahead
#[derive(Debug)]
struct EventCursor {
    events: Peekable<vec::IntoIter<StructuralEvent>>,
    position: usize,
    total: usize,
}

impl EventCursor {
    fn new(events: Vec<StructuralEvent>) -> Self {
        let total = events.len();
        Self {
            events: events.into_iter().peekable(),
            position: 0,
            total,
        }
    }

    /// Consume and return the next event
    fn next(&mut self) -> Option<StructuralEvent> {
        let event = self.events.next()?;
        self.position += 1;
        Some(event)
    }

    /// Kind of the next event without consuming it
    fn peek_kind(&mut self) -> Option<EventKind> {
        self.events.peek().map(|event| event.kind)
    }

    const fn position(&self) -> usize {
        self.position
    }

    const fn remaining(&self) -> usize {
        self.total.saturating_sub(self.position)
    }
}

/// Builds one [`Node`] tree from one event sequence.
///
/// A builder is consumed by [`TreeBuilder::build`]; its cursor is never
/// shared between builds.
#[derive(Debug)]
pub struct TreeBuilder<'a> {
    cursor: EventCursor,
    config: &'a ParserConfig,
    interner: &'a StringInterner,
    context: ParsingContext,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(
        events: Vec<StructuralEvent>,
        config: &'a ParserConfig,
        interner: &'a StringInterner,
    ) -> Self {
        Self {
            cursor: EventCursor::new(events),
            config,
            interner,
            context: ParsingContext::new(),
        }
    }

    /// Consume the whole sequence and return its root node.
    ///
    /// Fails when the sequence is empty, ends inside an element, has a
    /// `Close` where an element must start, or has events left after the
    /// root element.
    #[instrument(skip_all)]
    pub fn build(mut self) -> Result<Node> {
        debug!(events = self.cursor.total, "Building tree");
        let root = self.build_node()?;

        if self.cursor.remaining() > 0 {
            return Err(StructuralError::TrailingEvents {
                position: self.cursor.position(),
                remaining: self.cursor.remaining(),
            }
            .into());
        }

        debug!("Built tree rooted at <{}>", root.name());
        Ok(root)
    }

    fn build_node(&mut self) -> Result<Node> {
        let position = self.cursor.position();
        let head = self.cursor.next().ok_or(StructuralError::UnexpectedEnd {
            position,
            expected: "an open or complete event",
        })?;

        self.context.enter_nested(self.config)?;
        match head.kind {
            EventKind::Complete => {
                self.context.exit_nested();
                return Ok(self.make_node(head, Vec::new()));
            }
            EventKind::Open => {}
            EventKind::Close => {
                return Err(StructuralError::UnexpectedEvent {
                    position,
                    found: head.kind,
                }
                .into());
            }
        }

        trace!("Opening node at event {}", position);
        let mut children = Vec::new();
        loop {
            match self.cursor.peek_kind() {
                Some(EventKind::Close) => break,
                Some(_) => children.push(self.build_node()?),
                None => {
                    return Err(StructuralError::UnexpectedEnd {
                        position: self.cursor.position(),
                        expected: "a close event",
                    }
                    .into());
                }
            }
        }
        // The close event carries nothing the tree needs
        let _close = self.cursor.next();
        self.context.exit_nested();

        Ok(self.make_node(head, children))
    }

    fn make_node(&self, event: StructuralEvent, children: Vec<Node>) -> Node {
        let name = self.interner.intern(event.name.as_deref().unwrap_or_default());
        Node::new(
            name,
            event.text.unwrap_or_default(),
            event.attributes.unwrap_or_default(),
            children,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ParseErrorKind, SecurityError};

    fn build(events: Vec<StructuralEvent>) -> Result<Node> {
        let config = ParserConfig::default();
        let interner = StringInterner::new();
        TreeBuilder::new(events, &config, &interner).build()
    }

    fn structural(events: Vec<StructuralEvent>) -> StructuralError {
        match build(events).map_err(|e| e.kind().clone()) {
            Err(ParseErrorKind::Structure(err)) => err,
            other => panic!("expected structural error, got {other:?}"),
        }
    }

    #[test]
    fn test_single_complete_event() -> Result<()> {
        let root = build(vec![StructuralEvent::complete("a").with_text("x")])?;
        assert_eq!(root.name(), "a");
        assert_eq!(root.content(), Some("x"));
        assert!(!root.has_children());
        Ok(())
    }

    #[test]
    fn test_nested_children_keep_document_order() -> Result<()> {
        let root = build(vec![
            StructuralEvent::open("a"),
            StructuralEvent::open("b"),
            StructuralEvent::complete("b1"),
            StructuralEvent::complete("b2"),
            StructuralEvent::close("b"),
            StructuralEvent::complete("c"),
            StructuralEvent::close("a"),
        ])?;
        let names: Vec<&str> = root.children().iter().map(Node::name).collect();
        assert_eq!(names, vec!["b", "c"]);
        let grandchildren: Vec<&str> = root
            .get_child(0)
            .map(|b| b.children().iter().map(Node::name).collect())
            .unwrap_or_default();
        assert_eq!(grandchildren, vec!["b1", "b2"]);
        Ok(())
    }

    #[test]
    fn test_open_without_children_builds_leaf() -> Result<()> {
        let root = build(vec![StructuralEvent::open("a"), StructuralEvent::close("a")])?;
        assert_eq!(root.child_count(), 0);
        Ok(())
    }

    #[test]
    fn test_missing_payload_defaults() -> Result<()> {
        let root = build(vec![StructuralEvent::bare(EventKind::Complete)])?;
        assert_eq!(root.name(), "");
        assert_eq!(root.raw_content(), "");
        assert_eq!(root.attribute_count(), 0);
        Ok(())
    }

    #[test]
    fn test_close_payload_is_ignored() -> Result<()> {
        let root = build(vec![
            StructuralEvent::open("a"),
            StructuralEvent::bare(EventKind::Close).with_text("ignored"),
        ])?;
        assert_eq!(root.content(), None);
        Ok(())
    }

    #[test]
    fn test_empty_sequence_is_rejected() {
        assert_eq!(
            structural(Vec::new()),
            StructuralError::UnexpectedEnd {
                position: 0,
                expected: "an open or complete event"
            }
        );
    }

    #[test]
    fn test_lone_close_is_rejected() {
        assert_eq!(
            structural(vec![StructuralEvent::close("a")]),
            StructuralError::UnexpectedEvent {
                position: 0,
                found: EventKind::Close
            }
        );
    }

    #[test]
    fn test_unterminated_open_is_rejected() {
        assert_eq!(
            structural(vec![
                StructuralEvent::open("a"),
                StructuralEvent::complete("b")
            ]),
            StructuralError::UnexpectedEnd {
                position: 2,
                expected: "a close event"
            }
        );
    }

    #[test]
    fn test_sibling_roots_are_rejected() {
        assert_eq!(
            structural(vec![
                StructuralEvent::complete("a"),
                StructuralEvent::complete("b")
            ]),
            StructuralError::TrailingEvents {
                position: 1,
                remaining: 1
            }
        );
        assert_eq!(
            structural(vec![
                StructuralEvent::open("a"),
                StructuralEvent::close("a"),
                StructuralEvent::close("a")
            ]),
            StructuralError::TrailingEvents {
                position: 2,
                remaining: 1
            }
        );
    }

    #[test]
    fn test_depth_limit() {
        let config = ParserConfig::default().with_max_depth(2);
        let interner = StringInterner::new();
        let events = vec![
            StructuralEvent::open("a"),
            StructuralEvent::open("b"),
            StructuralEvent::complete("c"),
            StructuralEvent::close("b"),
            StructuralEvent::close("a"),
        ];
        let result = TreeBuilder::new(events, &config, &interner).build();
        assert!(matches!(
            result.map_err(|e| e.kind().clone()),
            Err(ParseErrorKind::Security(SecurityError::MaxDepthExceeded))
        ));
    }

    #[test]
    fn test_names_are_interned() -> Result<()> {
        let config = ParserConfig::default();
        let interner = StringInterner::new();
        let events = vec![
            StructuralEvent::open("list"),
            StructuralEvent::complete("item"),
            StructuralEvent::complete("item"),
            StructuralEvent::close("list"),
        ];
        let root = TreeBuilder::new(events, &config, &interner).build()?;
        assert_eq!(root.child_count(), 2);
        assert_eq!(interner.len(), 2);
        Ok(())
    }
}
