mod data;
mod fixtures;
mod helpers;

pub use data::{read_test_file, TestData};
pub use fixtures::{
    COMPLEX_XML, FRAGMENT_XML, INVALID_XML, INVALID_XML_SAMPLES, ROOTLESS_XML, TEST_FILES,
    VALID_XML,
};
pub use helpers::{assert_encodes_to, generate_nested, generate_wide, tmp_file_path};

// Re-export common test types/traits
pub use crate::{
    error::{
        IOError, Location, NodeError, ParseError, ParseErrorKind, Result, SecurityError,
        StructuralError, ValidationError,
    },
    formatter::{FormatConfig, Formatter, JsonFormatter},
    node::{ChildIndices, ChildList, Node},
    parse, parse_as, parse_file, parse_with_config,
    parser::{
        config::{
            ParserConfig, DEFAULT_MAX_ATTRIBUTES, DEFAULT_MAX_DEPTH, DEFAULT_MAX_SIZE,
            DEFAULT_MAX_TEXT_LENGTH,
        },
        EventKind, EventSource, MarkupScanner, Output, OutputKind, Parser, StructuralEvent,
        TreeBuilder,
    },
    utils::{read_file, write_file},
    value::Value,
};
