//! Input reading implementation.

use crate::cli::InputSpec;
use crate::error::{Error, Result};
use crate::input::InputSource;
use std::fs;
use std::io::{self, Read};

/// Read the transaction document text from the specified source.
pub fn read_input(spec: &InputSpec) -> Result<String> {
    let source = InputSource::from_spec(spec)?;

    let text = match source {
        InputSource::File(path) => fs::read_to_string(&path).map_err(|e| Error::IoError {
            path: Some(path),
            source: e,
        })?,

        InputSource::Text(text) => text,

        InputSource::Stdin => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| Error::IoError {
                    path: None,
                    source: e,
                })?;
            buffer
        }
    };

    non_empty(text)
}

/// Reject documents that are only whitespace.
fn non_empty(text: String) -> Result<String> {
    if text.trim().is_empty() {
        return Err(Error::NoInput);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tx.json");
        fs::write(&path, "{\"commands\": []}").unwrap();

        let text = read_input(&InputSpec::File(path)).unwrap();
        assert_eq!(text, "{\"commands\": []}");
    }

    #[test]
    fn test_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        fs::write(&path, "  \n").unwrap();

        let result = read_input(&InputSpec::File(path));
        assert!(matches!(result, Err(Error::NoInput)));
    }

    #[test]
    fn test_inline_passthrough() {
        let text = read_input(&InputSpec::Inline("{}".to_string())).unwrap();
        assert_eq!(text, "{}");
    }
}
