// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout flatcodec.
//!
//! This module provides the foundational types for the library:
//! - [`FlatError`] - Comprehensive error handling
//! - [`FieldValue`] - Unified value representation
//! - [`SchemaRegistry`] - Named schema registry
//! - [`Format`] - Flat file format identifier

pub mod error;
pub mod registry;
pub mod value;

pub use error::{FlatError, Result};
pub use registry::{RegisteredSchema, SchemaRegistry};
pub use value::{record_to_map, DecodedRecord, FieldType, FieldValue};

/// Flat file format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Delimited (CSV-like) records
    Delimited,
    /// Fixed-length records
    FixedLength,
}

/// Error returned when parsing a `Format` from string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseFormatError {
    _private: (),
}

impl std::fmt::Display for ParseFormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid format name, expected 'delimited' or 'fixed'")
    }
}

impl std::error::Error for ParseFormatError {}

impl std::str::FromStr for Format {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "delimited" | "csv" => Ok(Format::Delimited),
            "fixed" | "fixed-length" => Ok(Format::FixedLength),
            _ => Err(ParseFormatError { _private: () }),
        }
    }
}

impl Format {
    /// Check if this format is delimited.
    pub fn is_delimited(&self) -> bool {
        matches!(self, Format::Delimited)
    }

    /// Check if this format is fixed-length.
    pub fn is_fixed_length(&self) -> bool {
        matches!(self, Format::FixedLength)
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Delimited => "delimited",
            Format::FixedLength => "fixed",
        }
    }
}
