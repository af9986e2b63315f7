//! All error types for the tipcodec crate.
//!
//! These are returned from all fallible operations (reading object files, parsing
//! exchange records, decoding property strings, setting element properties, etc.).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(
        "cannot read objects from {}: {message} (line {line}, column {column})",
        path.display()
    )]
    ObjectFile {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("invalid record on line {line}: {message}")]
    InvalidRecord { line: u64, message: String },

    #[error("malformed property record `{0}`")]
    MalformedProperty(String),

    #[error("property {property} rejected: {message}")]
    PropertyRejected { property: String, message: String },

    #[error("invalid file pattern: {0}")]
    InvalidPattern(String),
}

impl Error {
    /// Creates a new record error for an exchange file line.
    pub fn invalid_record(line: u64, message: impl Into<String>) -> Self {
        Error::InvalidRecord {
            line,
            message: message.into(),
        }
    }

    /// Creates a new property rejection error.
    pub fn property_rejected(property: impl ToString, message: impl Into<String>) -> Self {
        Error::PropertyRejected {
            property: property.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = Error::Io(io_error);
        assert!(error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_object_file_error_carries_position() {
        let error = Error::ObjectFile {
            path: PathBuf::from("objects/Page21.json"),
            line: 3,
            column: 14,
            message: "expected value".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "cannot read objects from objects/Page21.json: expected value (line 3, column 14)"
        );
    }

    #[test]
    fn test_invalid_record_error() {
        let error = Error::invalid_record(7, "object number `abc` is not a number");
        assert_eq!(
            error.to_string(),
            "invalid record on line 7: object number `abc` is not a number"
        );
    }

    #[test]
    fn test_property_rejected_error() {
        let error = Error::property_rejected("ToolTipML", "invalid language code `E N`");
        assert_eq!(
            error.to_string(),
            "property ToolTipML rejected: invalid language code `E N`"
        );
    }

    #[test]
    fn test_error_debug() {
        let error = Error::MalformedProperty("ENU".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("MalformedProperty"));
        assert!(debug.contains("ENU"));
    }
}
