// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for flatcodec.
//!
//! Provides error types for flat file operations:
//! - Tokenizing delimited and fixed-length records
//! - Schema construction and validation
//! - Column-level value conversion
//! - Schema configuration files

use std::fmt;

/// Errors that can occur during flat file operations.
#[derive(Debug, Clone)]
pub enum FlatError {
    /// Parse error in the raw record text
    Parse {
        /// What was being parsed
        context: String,
        /// Error message
        message: String,
    },

    /// Invalid schema definition
    InvalidSchema {
        /// Schema name or identifier
        schema_name: String,
        /// Validation error message
        reason: String,
    },

    /// A value failed to parse or format for a specific column
    ColumnError {
        /// Column name
        column_name: String,
        /// Column type
        column_type: String,
        /// Physical record number when the error occurred
        record_number: u64,
        /// Underlying error
        cause: String,
    },

    /// A record-level failure (wrong field count, short record, no schema match)
    RecordError {
        /// Physical record number when the error occurred
        record_number: u64,
        /// Error message
        message: String,
    },

    /// Unsupported type or feature
    Unsupported {
        /// What is not supported
        feature: String,
    },

    /// Schema configuration file error
    Config {
        /// Error message
        message: String,
    },

    /// Other error
    Other(String),
}

impl FlatError {
    /// Create a parse error.
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        FlatError::Parse {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an invalid schema error.
    pub fn invalid_schema(schema_name: impl Into<String>, reason: impl Into<String>) -> Self {
        FlatError::InvalidSchema {
            schema_name: schema_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a column conversion error.
    pub fn column(
        column_name: impl Into<String>,
        column_type: impl Into<String>,
        record_number: u64,
        cause: impl Into<String>,
    ) -> Self {
        FlatError::ColumnError {
            column_name: column_name.into(),
            column_type: column_type.into(),
            record_number,
            cause: cause.into(),
        }
    }

    /// Create a record-level error.
    pub fn record(record_number: u64, message: impl Into<String>) -> Self {
        FlatError::RecordError {
            record_number,
            message: message.into(),
        }
    }

    /// Create an unsupported feature error.
    pub fn unsupported(feature: impl Into<String>) -> Self {
        FlatError::Unsupported {
            feature: feature.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        FlatError::Config {
            message: message.into(),
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            FlatError::Parse { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            FlatError::InvalidSchema {
                schema_name,
                reason,
            } => vec![("schema", schema_name.clone()), ("reason", reason.clone())],
            FlatError::ColumnError {
                column_name,
                column_type,
                record_number,
                cause,
            } => vec![
                ("column", column_name.clone()),
                ("type", column_type.clone()),
                ("record", record_number.to_string()),
                ("cause", cause.clone()),
            ],
            FlatError::RecordError {
                record_number,
                message,
            } => vec![
                ("record", record_number.to_string()),
                ("message", message.clone()),
            ],
            FlatError::Unsupported { feature } => vec![("feature", feature.clone())],
            FlatError::Config { message } => vec![("message", message.clone())],
            FlatError::Other(msg) => vec![("message", msg.clone())],
        }
    }
}

impl fmt::Display for FlatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlatError::Parse { context, message } => {
                write!(f, "Parse error in {context}: {message}")
            }
            FlatError::InvalidSchema {
                schema_name,
                reason,
            } => {
                write!(f, "Invalid schema '{schema_name}': {reason}")
            }
            FlatError::ColumnError {
                column_name,
                column_type,
                record_number,
                cause,
            } => write!(
                f,
                "Failed to convert column '{column_name}' (type: '{column_type}', record: {record_number}): {cause}"
            ),
            FlatError::RecordError {
                record_number,
                message,
            } => {
                write!(f, "Record {record_number}: {message}")
            }
            FlatError::Unsupported { feature } => {
                write!(f, "Unsupported feature: '{feature}'")
            }
            FlatError::Config { message } => {
                write!(f, "Configuration error: {message}")
            }
            FlatError::Other(msg) => write!(f, "Other error: {msg}"),
        }
    }
}

impl std::error::Error for FlatError {}

impl From<std::io::Error> for FlatError {
    fn from(err: std::io::Error) -> Self {
        FlatError::Parse {
            context: "IO".to_string(),
            message: err.to_string(),
        }
    }
}

/// Result type for flatcodec operations.
pub type Result<T> = std::result::Result<T, FlatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error() {
        let err = FlatError::parse("DelimitedReader", "unmatched quote");
        assert!(matches!(err, FlatError::Parse { .. }));
        assert_eq!(
            err.to_string(),
            "Parse error in DelimitedReader: unmatched quote"
        );
    }

    #[test]
    fn test_invalid_schema_error() {
        let err = FlatError::invalid_schema("people", "duplicate column 'id'");
        assert!(matches!(err, FlatError::InvalidSchema { .. }));
        assert_eq!(
            err.to_string(),
            "Invalid schema 'people': duplicate column 'id'"
        );
    }

    #[test]
    fn test_column_error() {
        let err = FlatError::column("created", "datetime", 3, "invalid digit");
        assert!(matches!(err, FlatError::ColumnError { .. }));
        assert_eq!(
            err.to_string(),
            "Failed to convert column 'created' (type: 'datetime', record: 3): invalid digit"
        );
    }

    #[test]
    fn test_record_error() {
        let err = FlatError::record(7, "expected 4 fields, found 2");
        assert!(matches!(err, FlatError::RecordError { .. }));
        assert_eq!(err.to_string(), "Record 7: expected 4 fields, found 2");
    }

    #[test]
    fn test_unsupported_error() {
        let err = FlatError::unsupported("zero-width window");
        assert!(matches!(err, FlatError::Unsupported { .. }));
        assert_eq!(err.to_string(), "Unsupported feature: 'zero-width window'");
    }

    #[test]
    fn test_config_error() {
        let err = FlatError::config("unknown column type 'int128'");
        assert!(matches!(err, FlatError::Config { .. }));
        assert_eq!(
            err.to_string(),
            "Configuration error: unknown column type 'int128'"
        );
    }

    #[test]
    fn test_other_error() {
        let err = FlatError::Other("something went wrong".to_string());
        assert!(matches!(err, FlatError::Other(_)));
        assert_eq!(err.to_string(), "Other error: something went wrong");
    }

    #[test]
    fn test_log_fields_parse_error() {
        let err = FlatError::parse("Context", "message");
        let fields = err.log_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].0, "context");
        assert_eq!(fields[0].1, "Context");
        assert_eq!(fields[1].0, "message");
        assert_eq!(fields[1].1, "message");
    }

    #[test]
    fn test_log_fields_column_error() {
        let err = FlatError::column("id", "int32", 12, "invalid digit");
        let fields = err.log_fields();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0].0, "column");
        assert_eq!(fields[0].1, "id");
        assert_eq!(fields[1].0, "type");
        assert_eq!(fields[1].1, "int32");
        assert_eq!(fields[2].0, "record");
        assert_eq!(fields[2].1, "12");
        assert_eq!(fields[3].0, "cause");
        assert_eq!(fields[3].1, "invalid digit");
    }

    #[test]
    fn test_log_fields_record_error() {
        let err = FlatError::record(5, "short record");
        let fields = err.log_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].0, "record");
        assert_eq!(fields[0].1, "5");
        assert_eq!(fields[1].0, "message");
        assert_eq!(fields[1].1, "short record");
    }

    #[test]
    fn test_log_fields_invalid_schema() {
        let err = FlatError::invalid_schema("people", "reason");
        let fields = err.log_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].0, "schema");
        assert_eq!(fields[0].1, "people");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let flat_err: FlatError = io_err.into();
        assert!(matches!(flat_err, FlatError::Parse { .. }));
        assert_eq!(flat_err.to_string(), "Parse error in IO: file not found");
    }

    #[test]
    fn test_error_clone() {
        let err1 = FlatError::parse("Context", "message");
        let err2 = err1.clone();
        assert_eq!(err1.to_string(), err2.to_string());
    }

    #[test]
    fn test_error_debug_format() {
        let err = FlatError::parse("Test", "message");
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Parse"));
    }
}
