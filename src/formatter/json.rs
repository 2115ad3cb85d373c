use std::fmt::Write;

use indexmap::IndexMap;

use super::{helpers, FormatConfig, Formatter};
use crate::value::Value;

/// JSON writer for [`Value`] trees.
///
/// Strings are escaped per RFC 8259: quote, backslash and the control
/// characters are escaped, everything else (including non-ASCII and `/`) is
/// written verbatim.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, value: &Value, config: &FormatConfig) -> String {
        Self::format_value(value, 0, config)
    }
}

impl JsonFormatter {
    fn format_value(value: &Value, indent: usize, config: &FormatConfig) -> String {
        match value {
            Value::String(s) => escape_json(s),
            Value::Array(arr) => Self::format_array(arr, indent, config),
            Value::Map(map) => Self::format_object(map, indent, config),
        }
    }

    fn format_array(arr: &[Value], indent: usize, config: &FormatConfig) -> String {
        if arr.is_empty() {
            return helpers::format_empty_array();
        }

        let (indent_str, inner_indent) = helpers::create_indentation(indent, config);
        let items: Vec<String> = arr
            .iter()
            .map(|v| {
                format!(
                    "{}{}",
                    inner_indent,
                    Self::format_value(v, indent.saturating_add(1), config)
                )
            })
            .collect();

        helpers::wrap('[', &items, ']', &indent_str, config)
    }

    fn format_object(map: &IndexMap<String, Value>, indent: usize, config: &FormatConfig) -> String {
        if map.is_empty() {
            return helpers::format_empty_object();
        }

        let (indent_str, inner_indent) = helpers::create_indentation(indent, config);
        let mut entries: Vec<(&String, &Value)> = map.iter().collect();
        if config.sort_keys {
            entries.sort_by_key(|(k, _)| *k);
        }

        let items: Vec<String> = entries
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}{}{}{}",
                    inner_indent,
                    escape_json(k),
                    helpers::key_separator(config),
                    Self::format_value(v, indent.saturating_add(1), config)
                )
            })
            .collect();

        helpers::wrap('{', &items, '}', &indent_str, config)
    }
}

/// Quote and escape a string as a JSON string literal
fn escape_json(input: &str) -> String {
    let mut out = String::with_capacity(input.len().saturating_add(2));
    out.push('"');
    for ch in input.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            c if c < '\u{20}' => {
                // Writing to a String cannot fail
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
