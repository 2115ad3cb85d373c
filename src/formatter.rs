mod json;

pub use self::json::JsonFormatter;
use crate::value::Value;

/// Configuration options for formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    /// Spaces per nesting level; ignored unless `pretty` is set
    pub indent_spaces: usize,
    /// Whether to sort map keys instead of keeping insertion order
    pub sort_keys: bool,
    /// Emit one entry per line instead of a single line
    pub pretty: bool,
}

/// Compact output in insertion order
impl Default for FormatConfig {
    fn default() -> Self {
        Self::compact()
    }
}

impl FormatConfig {
    /// Single-line output with no insignificant whitespace
    pub const fn compact() -> Self {
        Self {
            indent_spaces: 0,
            sort_keys: false,
            pretty: false,
        }
    }

    /// Indented output, two spaces per level
    pub const fn pretty() -> Self {
        Self {
            indent_spaces: 2,
            sort_keys: false,
            pretty: true,
        }
    }

    pub const fn with_indent_spaces(mut self, indent_spaces: usize) -> Self {
        self.indent_spaces = indent_spaces;
        self
    }

    pub const fn with_sort_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = sort_keys;
        self
    }
}

/// Trait for formatting a Value as a string
pub trait Formatter {
    fn format(&self, value: &Value, config: &FormatConfig) -> String;
}

/// Helper functions for formatting collections
pub mod helpers {
    use super::FormatConfig;

    pub fn format_empty_array() -> String {
        "[]".to_string()
    }

    pub fn format_empty_object() -> String {
        "{}".to_string()
    }

    /// Separator placed between collection items
    pub const fn item_separator(config: &FormatConfig) -> &'static str {
        if config.pretty {
            ",\n"
        } else {
            ","
        }
    }

    /// Separator placed between a map key and its value
    pub const fn key_separator(config: &FormatConfig) -> &'static str {
        if config.pretty {
            ": "
        } else {
            ":"
        }
    }

    /// Outer and inner indentation for a collection at `indent`
    pub fn create_indentation(indent: usize, config: &FormatConfig) -> (String, String) {
        if !config.pretty {
            return (String::new(), String::new());
        }
        let indent_str = " ".repeat(indent.saturating_mul(config.indent_spaces));
        let inner_indent = " ".repeat(indent.saturating_add(1).saturating_mul(config.indent_spaces));
        (indent_str, inner_indent)
    }

    /// Wrap already-formatted items in `open`/`close`
    pub fn wrap(
        open: char,
        items: &[String],
        close: char,
        indent_str: &str,
        config: &FormatConfig,
    ) -> String {
        let body = items.join(item_separator(config));
        if config.pretty {
            format!("{open}\n{body}\n{indent_str}{close}")
        } else {
            format!("{open}{body}{close}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_is_default() {
        assert_eq!(FormatConfig::default(), FormatConfig::compact());
        assert!(!FormatConfig::compact().pretty);
        assert!(FormatConfig::pretty().pretty);
    }

    #[test]
    fn test_compact_indentation_is_empty() {
        let (outer, inner) = helpers::create_indentation(3, &FormatConfig::compact());
        assert!(outer.is_empty());
        assert!(inner.is_empty());

        let config = FormatConfig::pretty().with_indent_spaces(4);
        let (outer, inner) = helpers::create_indentation(1, &config);
        assert_eq!(outer.len(), 4);
        assert_eq!(inner.len(), 8);
    }
}
