use std::fs;
use std::io;
use std::path::Path;

use tracing::error;

use crate::error::{IOError, ParseError, Result};

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        error!("Failed to read file: {}", e);
        let path = path.display().to_string();
        let kind = match e.kind() {
            io::ErrorKind::NotFound => IOError::FileNotFound(path),
            io::ErrorKind::PermissionDenied => IOError::PermissionDenied(path),
            _ => IOError::ReadError(path),
        };
        ParseError::from(kind).with_source(e)
    })
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| {
        error!("Failed to write file: {}", e);
        let path = path.display().to_string();
        let kind = match e.kind() {
            io::ErrorKind::PermissionDenied => IOError::PermissionDenied(path),
            _ => IOError::WriteError(path),
        };
        ParseError::from(kind).with_source(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;
    use crate::test_utils::tmp_file_path;

    #[test]
    fn test_write_then_read() -> Result<()> {
        let path = tmp_file_path("utils_roundtrip.xml");
        write_file(&path, "<a/>")?;
        assert_eq!(read_file(&path)?, "<a/>");
        let _ = fs::remove_file(&path);
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let path = tmp_file_path("definitely_missing.xml");
        let err = read_file(&path).map_err(|e| e.kind().clone());
        assert!(matches!(
            err,
            Err(ParseErrorKind::IO(IOError::FileNotFound(_)))
        ));
    }
}
