use std::fs;

use crate::error::{IOError, ParseError, Result};

/// Sample documents stored under `tests/input`
pub struct TestData {
    pub catalog: String,
    pub complex: String,
    pub mixed: String,
}

impl TestData {
    pub fn load() -> Result<Self> {
        Ok(Self {
            catalog: read_test_file("tests/input/catalog.xml")?,
            complex: read_test_file("tests/input/complex.xml")?,
            mixed: read_test_file("tests/input/mixed.xml")?,
        })
    }
}

pub fn read_test_file(path: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        ParseError::from(IOError::ReadError(format!("Failed to read {}: {}", path, e)))
    })
}
