// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Delimited (CSV-like) record format.
//!
//! - [`parser`] - the single-pass record tokenizer
//! - [`reader`] - schema-driven reading with header and filter support
//! - [`writer`] - schema-driven writing with minimal quoting

pub mod parser;
pub mod reader;
pub mod writer;

pub use parser::DelimitedRecordParser;
pub use reader::DelimitedReader;
pub use writer::DelimitedWriter;

use crate::core::{FlatError, Result};
use crate::io::separator::RecordSeparator;

/// Options controlling delimited tokenizing and formatting.
///
/// The field separator is probed before the record separator, so when one is
/// a prefix of the other the field separator wins.
#[derive(Debug, Clone)]
pub struct DelimitedOptions {
    /// Field separator, possibly multi-character (default `,`)
    pub separator: String,
    /// Record separator (default: auto-detect newline style)
    pub record_separator: RecordSeparator,
    /// Quote character (default `"`)
    pub quote: char,
    /// Keep whitespace around unquoted values and quotes (default false)
    pub preserve_white_space: bool,
    /// Treat the first record as the schema/header (default false)
    pub is_first_record_schema: bool,
    /// Quote every written value, not just the ones that need it
    /// (default false)
    pub always_quote: bool,
}

impl Default for DelimitedOptions {
    fn default() -> Self {
        Self {
            separator: ",".to_string(),
            record_separator: RecordSeparator::Auto,
            quote: '"',
            preserve_white_space: false,
            is_first_record_schema: false,
            always_quote: false,
        }
    }
}

impl DelimitedOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field separator.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Set the record separator.
    pub fn with_record_separator(mut self, separator: RecordSeparator) -> Self {
        self.record_separator = separator;
        self
    }

    /// Set the quote character.
    pub fn with_quote(mut self, quote: char) -> Self {
        self.quote = quote;
        self
    }

    /// Keep whitespace around unquoted values and quotes.
    pub fn with_preserve_white_space(mut self, preserve: bool) -> Self {
        self.preserve_white_space = preserve;
        self
    }

    /// Treat the first record as the schema/header.
    pub fn with_first_record_schema(mut self, is_schema: bool) -> Self {
        self.is_first_record_schema = is_schema;
        self
    }

    /// Quote every written value.
    pub fn with_always_quote(mut self, always: bool) -> Self {
        self.always_quote = always;
        self
    }

    /// Check the options for contradictions.
    pub fn validate(&self) -> Result<()> {
        if self.separator.is_empty() {
            return Err(FlatError::invalid_schema(
                "DelimitedOptions",
                "the field separator must not be empty",
            ));
        }
        if self.separator.contains(self.quote) {
            return Err(FlatError::invalid_schema(
                "DelimitedOptions",
                "the field separator must not contain the quote character",
            ));
        }
        if let RecordSeparator::Literal(text) = &self.record_separator {
            if text.is_empty() {
                return Err(FlatError::invalid_schema(
                    "DelimitedOptions",
                    "the record separator must not be empty",
                ));
            }
            if text == &self.separator {
                return Err(FlatError::invalid_schema(
                    "DelimitedOptions",
                    "the record separator must differ from the field separator",
                ));
            }
        }
        Ok(())
    }
}
