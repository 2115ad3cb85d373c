use std::fmt;

use crate::error::{ParseError, Result, SecurityError};

/// Maximum element nesting depth (256, libxml2's default); the tree builder recurses once per level
pub const DEFAULT_MAX_DEPTH: usize = 256;
/// Maximum input size (10MB) to prevent memory exhaustion attacks
pub const DEFAULT_MAX_SIZE: usize = 10 * 1024 * 1024;
/// Maximum number of attributes on a single element (256)
pub const DEFAULT_MAX_ATTRIBUTES: usize = 256;
/// Maximum accumulated text of a single element (1MB)
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 1024 * 1024;

/// Configuration for parser limits and validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum nesting depth of elements
    pub max_depth: usize,
    /// Maximum input size in bytes
    pub max_size: usize,
    /// Maximum number of attributes per element
    pub max_attributes: usize,
    /// Maximum text length per element in bytes
    pub max_text_length: usize,
}

/// Tracks nesting depth during scanning and tree building
#[derive(Debug)]
pub struct ParsingContext {
    current_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_size: DEFAULT_MAX_SIZE,
            max_attributes: DEFAULT_MAX_ATTRIBUTES,
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
        }
    }
}

impl fmt::Display for ParserConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ParserConfig {{ max_depth: {}, max_size: {}, max_attributes: {}, max_text_length: {} }}",
            self.max_depth, self.max_size, self.max_attributes, self.max_text_length
        )
    }
}

impl ParserConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn with_max_attributes(mut self, max_attributes: usize) -> Self {
        self.max_attributes = max_attributes;
        self
    }

    pub fn with_max_text_length(mut self, max_text_length: usize) -> Self {
        self.max_text_length = max_text_length;
        self
    }

    pub fn validate_input_size(&self, size: usize) -> Result<()> {
        if size > self.max_size {
            return Err(ParseError::from(SecurityError::MaxSizeExceeded).with_context(format!(
                "Input size ({} bytes) exceeds maximum allowed ({})",
                size, self.max_size
            )));
        }
        Ok(())
    }

    pub fn validate_attributes(&self, count: usize) -> Result<()> {
        if count > self.max_attributes {
            return Err(ParseError::from(SecurityError::MaxAttributesExceeded)
                .with_context(format!("Maximum attributes ({}) exceeded", self.max_attributes)));
        }
        Ok(())
    }

    pub fn validate_text_length(&self, len: usize) -> Result<()> {
        if len > self.max_text_length {
            return Err(ParseError::from(SecurityError::MaxTextLengthExceeded)
                .with_context(format!(
                    "Element text ({} bytes) exceeds maximum allowed ({})",
                    len, self.max_text_length
                )));
        }
        Ok(())
    }
}

impl Default for ParsingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ParsingContext {
    pub const fn new() -> Self {
        Self { current_depth: 0 }
    }

    pub const fn depth(&self) -> usize {
        self.current_depth
    }

    pub fn enter_nested(&mut self, config: &ParserConfig) -> Result<()> {
        self.current_depth += 1;
        if self.current_depth > config.max_depth {
            return Err(ParseError::from(SecurityError::MaxDepthExceeded)
                .with_context(format!("Maximum nesting depth ({}) exceeded", config.max_depth)));
        }
        Ok(())
    }

    pub fn exit_nested(&mut self) {
        if self.current_depth > 0 {
            self.current_depth -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;

    #[test]
    fn test_default_limits() {
        let config = ParserConfig::default();
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.max_size, DEFAULT_MAX_SIZE);
        assert!(config.to_string().contains("max_depth: 256"));
    }

    #[test]
    fn test_depth_tracking() {
        let config = ParserConfig::default().with_max_depth(2);
        let mut ctx = ParsingContext::new();
        assert!(ctx.enter_nested(&config).is_ok());
        assert!(ctx.enter_nested(&config).is_ok());
        let err = ctx.enter_nested(&config).unwrap_err();
        assert_eq!(
            err.kind(),
            &ParseErrorKind::Security(SecurityError::MaxDepthExceeded)
        );
        ctx.exit_nested();
        ctx.exit_nested();
        ctx.exit_nested();
        ctx.exit_nested();
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn test_validators() {
        let config = ParserConfig::default()
            .with_max_size(4)
            .with_max_attributes(1)
            .with_max_text_length(3);
        assert!(config.validate_input_size(4).is_ok());
        assert!(config.validate_input_size(5).is_err());
        assert!(config.validate_attributes(2).is_err());
        assert!(config.validate_text_length(3).is_ok());
        assert!(config.validate_text_length(4).is_err());
    }
}
