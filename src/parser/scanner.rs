//! Markup scanner: the built-in event source.
//!
//! Checks the input for well-formedness and flattens it into structural
//! events in document order:
//! - an element without child elements becomes one `Complete` event, whether
//!   it was written self-closing or as a start/end tag pair
//! - an element with child elements becomes `Open` ... `Close`
//! - character data directly inside an element is appended to that element's
//!   event text; chunks made only of whitespace are dropped
//! - declarations, processing instructions, comments and the doctype produce
//!   no events

use std::borrow::Cow;

use indexmap::IndexMap;
use tracing::{debug, instrument, trace, warn};

use super::config::{ParserConfig, ParsingContext};
use super::cursor::{is_whitespace, Cursor};
use super::event::{EventKind, StructuralEvent};
use super::EventSource;
use crate::error::{Location, ParseError, Result, ValidationError};

/// Event source for XML text.
///
/// Names are case-sensitive and kept verbatim. Entity references are limited
/// to the five predefined entities and numeric character references.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupScanner;

impl EventSource for MarkupScanner {
    #[instrument(skip_all, fields(len = input.len()))]
    fn scan(&self, input: &str, config: &ParserConfig) -> Result<Vec<StructuralEvent>> {
        config.validate_input_size(input.len())?;
        let events = Scanner::new(input, config).run()?;
        debug!("Scanned {} structural events", events.len());
        Ok(events)
    }
}

/// Element whose end tag has not been seen yet
#[derive(Debug)]
struct OpenElement {
    name: String,
    /// Index of the element's event in the output
    event: usize,
    has_children: bool,
}

struct Scanner<'a> {
    cursor: Cursor<'a>,
    config: &'a ParserConfig,
    context: ParsingContext,
    events: Vec<StructuralEvent>,
    stack: Vec<OpenElement>,
    seen_root: bool,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str, config: &'a ParserConfig) -> Self {
        Self {
            cursor: Cursor::new(input),
            config,
            context: ParsingContext::new(),
            events: Vec::new(),
            stack: Vec::new(),
            seen_root: false,
        }
    }

    fn run(mut self) -> Result<Vec<StructuralEvent>> {
        while !self.cursor.is_eof() {
            if self.cursor.current() == Some(b'<') {
                self.scan_markup()?;
            } else {
                self.scan_text()?;
            }
        }

        if let Some(open) = self.stack.last() {
            let err = ValidationError::UnclosedElement(open.name.clone());
            return Err(self.error_here(err));
        }
        if !self.seen_root {
            return Err(self.error_here(ValidationError::EmptyDocument));
        }

        Ok(self.events)
    }

    fn scan_markup(&mut self) -> Result<()> {
        let start = self.cursor.location();

        if self.cursor.consume_str("<?") {
            return self.skip_until("?>", "a processing instruction");
        }
        if self.cursor.consume_str("<!--") {
            return self.skip_comment();
        }
        if self.cursor.starts_with("<![CDATA[") {
            return self.scan_cdata(start);
        }
        if self.cursor.starts_with("<!DOCTYPE") {
            if self.seen_root {
                return Err(error_at(ValidationError::UnexpectedCharacter('!'), start));
            }
            return self.skip_doctype();
        }
        if self.cursor.peek(1) == Some(b'!') {
            return Err(error_at(ValidationError::UnexpectedCharacter('!'), start));
        }
        if self.cursor.peek(1) == Some(b'/') {
            return self.scan_end_tag(start);
        }

        self.scan_start_tag(start)
    }

    fn scan_start_tag(&mut self, start: Location) -> Result<()> {
        self.cursor.advance();
        let name = self.scan_name()?;

        if self.stack.is_empty() {
            if self.seen_root {
                warn!("Rejecting second root element <{}>", name);
                return Err(error_at(ValidationError::MultipleRoots(name), start));
            }
            self.seen_root = true;
        }

        let attributes = self.scan_attributes()?;
        let self_closing = if self.cursor.consume_str("/>") {
            true
        } else if self.cursor.consume(b'>') {
            false
        } else {
            return Err(self.unexpected("a start tag"));
        };

        self.context
            .enter_nested(self.config)
            .map_err(|err| err.with_location(start.line, start.column))?;

        if let Some(parent) = self.stack.last_mut() {
            if !parent.has_children {
                parent.has_children = true;
                if let Some(event) = self.events.get_mut(parent.event) {
                    event.kind = EventKind::Open;
                }
            }
        }

        trace!("<{}> with {} attribute(s)", name, attributes.len());
        let index = self.events.len();
        self.events
            .push(StructuralEvent::complete(name.clone()).with_attributes(attributes));

        if self_closing {
            self.context.exit_nested();
        } else {
            self.stack.push(OpenElement {
                name,
                event: index,
                has_children: false,
            });
        }
        Ok(())
    }

    fn scan_end_tag(&mut self, start: Location) -> Result<()> {
        self.cursor.advance_by(2);
        let name = self.scan_name()?;
        self.cursor.skip_whitespace();
        if !self.cursor.consume(b'>') {
            return Err(self.unexpected("an end tag"));
        }

        let Some(open) = self.stack.pop() else {
            return Err(error_at(ValidationError::UnexpectedClosingTag(name), start));
        };
        if open.name != name {
            warn!("Mismatched end tag </{}> for <{}>", name, open.name);
            return Err(error_at(
                ValidationError::MismatchedTag {
                    expected: open.name,
                    found: name,
                },
                start,
            ));
        }

        if open.has_children {
            self.events.push(StructuralEvent::close(name));
        }
        self.context.exit_nested();
        Ok(())
    }

    fn scan_attributes(&mut self) -> Result<IndexMap<String, String>> {
        let mut attributes = IndexMap::new();

        loop {
            let before = self.cursor.pos();
            self.cursor.skip_whitespace();
            let separated = self.cursor.pos() > before;

            match self.cursor.current() {
                Some(b'/' | b'>') => break,
                Some(_) if !separated => return Err(self.unexpected("a start tag")),
                Some(_) => {}
                None => return Err(self.error_here(ValidationError::UnexpectedEof("a start tag"))),
            }

            let location = self.cursor.location();
            let name = self.scan_name()?;
            self.cursor.skip_whitespace();
            if !self.cursor.consume(b'=') {
                return Err(self.unexpected("an attribute"));
            }
            self.cursor.skip_whitespace();
            let value = self.scan_attribute_value()?;

            if attributes.contains_key(&name) {
                return Err(error_at(ValidationError::DuplicateAttribute(name), location));
            }
            attributes.insert(name, value);
            self.config
                .validate_attributes(attributes.len())
                .map_err(|err| err.with_location(location.line, location.column))?;
        }

        Ok(attributes)
    }

    fn scan_attribute_value(&mut self) -> Result<String> {
        let quote = match self.cursor.current() {
            Some(q @ (b'"' | b'\'')) => q,
            Some(_) => return Err(self.unexpected("an attribute value")),
            None => {
                return Err(self.error_here(ValidationError::UnexpectedEof("an attribute value")))
            }
        };
        self.cursor.advance();

        let location = self.cursor.location();
        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == quote {
                let raw = self.cursor.slice_from(start);
                self.cursor.advance();
                let normalized = raw.replace(['\t', '\n', '\r'], " ");
                return decode_entities(&normalized)
                    .map(Cow::into_owned)
                    .map_err(|err| error_at(err, location));
            }
            if b == b'<' {
                return Err(self.error_here(ValidationError::LessThanInAttribute));
            }
            self.cursor.advance();
        }

        Err(self.error_here(ValidationError::UnexpectedEof("an attribute value")))
    }

    fn scan_text(&mut self) -> Result<()> {
        let location = self.cursor.location();
        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == b'<' {
                break;
            }
            self.cursor.advance();
        }

        let raw = self.cursor.slice_from(start);
        if raw.bytes().all(is_whitespace) {
            return Ok(());
        }
        if self.stack.is_empty() {
            return Err(error_at(ValidationError::TextOutsideRoot, location));
        }
        if raw.contains("]]>") {
            return Err(error_at(ValidationError::CdataEndInText, location));
        }

        let text = decode_entities(raw).map_err(|err| error_at(err, location))?;
        self.append_text(&text, location)
    }

    fn scan_cdata(&mut self, start: Location) -> Result<()> {
        if self.stack.is_empty() {
            return Err(error_at(ValidationError::TextOutsideRoot, start));
        }
        self.cursor.advance_by("<![CDATA[".len());
        let from = self.cursor.pos();
        while !self.cursor.is_eof() {
            if self.cursor.starts_with("]]>") {
                let text = self.cursor.slice_from(from);
                self.cursor.advance_by(3);
                return self.append_text(text, start);
            }
            self.cursor.advance();
        }
        Err(self.error_here(ValidationError::UnexpectedEof("a CDATA section")))
    }

    /// Attach character data to the innermost open element
    fn append_text(&mut self, chunk: &str, location: Location) -> Result<()> {
        // Only XML whitespace; U+00A0 and friends are content
        if chunk.bytes().all(is_whitespace) {
            return Ok(());
        }
        let Some(event) = self
            .stack
            .last()
            .and_then(|open| self.events.get_mut(open.event))
        else {
            return Err(error_at(ValidationError::TextOutsideRoot, location));
        };

        event.push_text(chunk);
        let len = event.text_len();
        self.config
            .validate_text_length(len)
            .map_err(|err| err.with_location(location.line, location.column))
    }

    fn scan_name(&mut self) -> Result<String> {
        let start = self.cursor.pos();
        match self.cursor.current() {
            Some(b) if is_name_start(b) => self.cursor.advance(),
            _ => return Err(self.error_here(ValidationError::InvalidName)),
        }
        while let Some(b) = self.cursor.current() {
            if is_name_char(b) {
                self.cursor.advance();
            } else {
                break;
            }
        }
        Ok(self.cursor.slice_from(start).to_string())
    }

    fn skip_doctype(&mut self) -> Result<()> {
        self.cursor.advance_by("<!DOCTYPE".len());
        let mut brackets = 0usize;
        let mut quote = None;

        while let Some(b) = self.cursor.current() {
            self.cursor.advance();
            match (quote, b) {
                (Some(q), _) if q == b => quote = None,
                (Some(_), _) => {}
                (None, b'"' | b'\'') => quote = Some(b),
                (None, b'[') => brackets += 1,
                (None, b']') => brackets = brackets.saturating_sub(1),
                (None, b'>') if brackets == 0 => return Ok(()),
                _ => {}
            }
        }
        Err(self.error_here(ValidationError::UnexpectedEof("a doctype declaration")))
    }

    /// Skip a comment body; `--` may only appear as part of the closing `-->`
    fn skip_comment(&mut self) -> Result<()> {
        while !self.cursor.is_eof() {
            if self.cursor.starts_with("--") {
                if self.cursor.consume_str("-->") {
                    return Ok(());
                }
                return Err(self.error_here(ValidationError::DoubleHyphenInComment));
            }
            self.cursor.advance();
        }
        Err(self.error_here(ValidationError::UnexpectedEof("a comment")))
    }

    fn skip_until(&mut self, pattern: &str, what: &'static str) -> Result<()> {
        while !self.cursor.is_eof() {
            if self.cursor.consume_str(pattern) {
                return Ok(());
            }
            self.cursor.advance();
        }
        Err(self.error_here(ValidationError::UnexpectedEof(what)))
    }

    fn unexpected(&self, what: &'static str) -> ParseError {
        match self.cursor.current_char() {
            Some(ch) => self.error_here(ValidationError::UnexpectedCharacter(ch)),
            None => self.error_here(ValidationError::UnexpectedEof(what)),
        }
    }

    fn error_here(&self, err: ValidationError) -> ParseError {
        error_at(err, self.cursor.location())
    }
}

fn error_at(err: ValidationError, location: Location) -> ParseError {
    ParseError::from(err).with_location(location.line, location.column)
}

fn is_name_start(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b':') || !b.is_ascii()
}

fn is_name_char(b: u8) -> bool {
    is_name_start(b) || matches!(b, b'0'..=b'9' | b'-' | b'.')
}

/// Replace entity and character references in `input`
fn decode_entities(input: &str) -> std::result::Result<Cow<'_, str>, ValidationError> {
    if !input.contains('&') {
        return Ok(Cow::Borrowed(input));
    }

    let mut result = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        let (before, after) = rest.split_at(amp);
        result.push_str(before);
        let after = after.get(1..).unwrap_or_default();

        let Some(semi) = after.find(';') else {
            return Err(ValidationError::InvalidEntity(after.chars().take(8).collect()));
        };
        let (entity, tail) = after.split_at(semi);

        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => decode_numeric_entity(entity),
        };
        match decoded {
            Some(ch) => result.push(ch),
            None => return Err(ValidationError::InvalidEntity(entity.to_string())),
        }
        rest = tail.get(1..).unwrap_or_default();
    }
    result.push_str(rest);

    Ok(Cow::Owned(result))
}

/// `&#NNN;` or `&#xHHH;` naming a character allowed in XML text
fn decode_numeric_entity(entity: &str) -> Option<char> {
    let code = if let Some(hex) = entity.strip_prefix("#x") {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(hex, 16).ok()?
    } else if let Some(dec) = entity.strip_prefix('#') {
        if dec.is_empty() || !dec.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        dec.parse::<u32>().ok()?
    } else {
        return None;
    };

    if is_xml_char(code) {
        char::from_u32(code)
    } else {
        None
    }
}

fn is_xml_char(code: u32) -> bool {
    matches!(
        code,
        0x9 | 0xA | 0xD | 0x20..=0xD7FF | 0xE000..=0xFFFD | 0x10000..=0x10FFFF
    )
}
