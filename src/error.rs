//! Error types for intent-decoder.

use crate::decode::ScalarType;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for intent-decoder operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading, decoding or rendering a transaction.
#[derive(Error, Debug)]
pub enum Error {
    /// No input was provided (no file, no stdin, no inline JSON).
    #[error("No input provided. Use: intent-decoder <file>, intent-decoder '<json>', or pipe JSON to stdin")]
    NoInput,

    /// The specified file was not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// An I/O error occurred.
    #[error("IO error{}: {source}", path.as_ref().map(|p| format!(" reading {}", p.display())).unwrap_or_default())]
    IoError {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// The transaction document is not valid JSON for the transaction model.
    #[error("Invalid transaction JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// No known operation matched any command in the stream.
    #[error("Unrecognized transaction: {0}")]
    UnrecognizedTransaction(String),

    /// An input reference is out of bounds or points at the wrong kind of entry.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A pure value does not have the byte width of the scalar it is read as.
    #[error("Unsupported field width: {scalar} expects {expected} bytes, got {actual}")]
    UnsupportedFieldWidth {
        scalar: ScalarType,
        expected: usize,
        actual: usize,
    },

    /// A `--package` value is not a valid package id.
    #[error("Invalid package id: '{0}'")]
    InvalidPackageId(String),

    /// Output formatting error.
    #[error("Format error: {0}")]
    FormatError(String),
}

impl Error {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            // Decode failure (also the --check result)
            Error::UnrecognizedTransaction(_)
            | Error::MalformedInput(_)
            | Error::UnsupportedFieldWidth { .. } => 1,
            // Document parse errors
            Error::InvalidJson(_) => 2,
            // I/O errors
            Error::NoInput | Error::FileNotFound(_) | Error::IoError { .. } => 3,
            // Argument errors
            Error::InvalidPackageId(_) => 4,
            // Format errors
            Error::FormatError(_) => 5,
        }
    }

    /// Prefix a malformed-input message with the field being decoded.
    ///
    /// Width errors are left alone: they already name the scalar type.
    pub fn in_field(self, field: &str) -> Self {
        match self {
            Error::MalformedInput(msg) => Error::MalformedInput(format!("{}: {}", field, msg)),
            other => other,
        }
    }

    /// Whether this error means "not this kind of transaction" rather than a broken one.
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Error::UnrecognizedTransaction(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::NoInput.exit_code(), 3);
        assert_eq!(Error::UnrecognizedTransaction("x".into()).exit_code(), 1);
        assert_eq!(Error::MalformedInput("x".into()).exit_code(), 1);
        assert_eq!(
            Error::UnsupportedFieldWidth {
                scalar: ScalarType::U64,
                expected: 8,
                actual: 4
            }
            .exit_code(),
            1
        );
        assert_eq!(Error::InvalidPackageId("x".into()).exit_code(), 4);
        assert_eq!(Error::FormatError("x".into()).exit_code(), 5);
    }

    #[test]
    fn test_error_display() {
        let err = Error::UnsupportedFieldWidth {
            scalar: ScalarType::U32,
            expected: 4,
            actual: 8,
        };
        assert_eq!(
            err.to_string(),
            "Unsupported field width: u32 expects 4 bytes, got 8"
        );
    }

    #[test]
    fn test_in_field_labels_malformed_input() {
        let err = Error::MalformedInput("input index 9 out of bounds".into()).in_field("pool");
        assert_eq!(
            err.to_string(),
            "Malformed input: pool: input index 9 out of bounds"
        );
    }

    #[test]
    fn test_in_field_keeps_width_errors() {
        let err = Error::UnsupportedFieldWidth {
            scalar: ScalarType::Bool,
            expected: 1,
            actual: 2,
        }
        .in_field("isTokenAFixed");
        assert!(matches!(err, Error::UnsupportedFieldWidth { .. }));
    }
}
