// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Column definition trait and shared per-column behavior.
//!
//! A column definition owns the conversion between the raw text of one field
//! and a typed [`FieldValue`]. Behavior shared by every column - null
//! handling, whitespace trimming, preprocessing - lives in [`ColumnOptions`]
//! so concrete columns only implement the type-specific parse and format.

use crate::core::{FieldValue, FlatError, Result};

/// Context for the column currently being processed.
///
/// Carried through parse and format so errors can report where in the file
/// the bad value was found.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnContext {
    /// Record number counting every record consumed from the source
    pub physical_record_number: u64,
    /// Record number counting only records returned to the caller
    pub logical_record_number: u64,
    /// Zero-based index of the column within the schema
    pub column_index: usize,
}

/// Decides which texts represent null and how null is written back out.
///
/// The default treats the empty string (after trimming) as null and writes
/// null as the empty string. [`NullFormatter::constant`] substitutes a
/// sentinel text in both directions, e.g. `"----"` or `"NULL"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NullFormatter {
    /// Empty text is null; null formats to empty text
    Empty,
    /// The given constant is null; null formats to the constant
    Constant(String),
}

impl NullFormatter {
    /// Null formatter treating the empty string as null.
    pub fn empty() -> Self {
        NullFormatter::Empty
    }

    /// Null formatter substituting a constant sentinel for null.
    pub fn constant(value: impl Into<String>) -> Self {
        NullFormatter::Constant(value.into())
    }

    /// Check whether the prepared text represents null.
    pub fn is_null_text(&self, text: &str) -> bool {
        match self {
            NullFormatter::Empty => text.is_empty(),
            NullFormatter::Constant(constant) => text == constant,
        }
    }

    /// The text a null value formats to.
    pub fn null_text(&self) -> &str {
        match self {
            NullFormatter::Empty => "",
            NullFormatter::Constant(constant) => constant,
        }
    }
}

impl Default for NullFormatter {
    fn default() -> Self {
        NullFormatter::Empty
    }
}

/// Preprocessor applied to raw field text before null-checking and parsing.
pub type Preprocessor = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Behavior shared by every column definition.
#[derive(Default)]
pub struct ColumnOptions {
    null_formatter: NullFormatter,
    preserve_white_space: bool,
    preprocessor: Option<Preprocessor>,
}

impl ColumnOptions {
    /// Create options with defaults: trim whitespace, empty string is null.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the null formatter.
    pub fn set_null_formatter(&mut self, formatter: NullFormatter) {
        self.null_formatter = formatter;
    }

    /// Keep leading and trailing whitespace instead of trimming it.
    pub fn set_preserve_white_space(&mut self, preserve: bool) {
        self.preserve_white_space = preserve;
    }

    /// Install a preprocessor run on the raw text before parsing.
    pub fn set_preprocessor(&mut self, preprocessor: Preprocessor) {
        self.preprocessor = Some(preprocessor);
    }

    /// Get the null formatter.
    pub fn null_formatter(&self) -> &NullFormatter {
        &self.null_formatter
    }

    /// Apply preprocessing and trimming, returning `None` when the text
    /// represents null.
    pub fn prepare(&self, text: &str) -> Option<String> {
        let preprocessed = match &self.preprocessor {
            Some(preprocessor) => preprocessor(text),
            None => text.to_string(),
        };
        let prepared = if self.preserve_white_space {
            preprocessed
        } else {
            preprocessed.trim().to_string()
        };
        if self.null_formatter.is_null_text(&prepared) {
            None
        } else {
            Some(prepared)
        }
    }
}

/// Conversion between the raw text of one field and a typed [`FieldValue`].
///
/// Implementations are provided for every [`FieldType`](crate::core::FieldType);
/// custom columns can implement the trait directly.
pub trait ColumnDefinition: Send + Sync {
    /// The column name.
    fn name(&self) -> &str;

    /// The type name reported in errors and schema listings.
    fn type_name(&self) -> &'static str;

    /// Whether this column is ignored: its raw field is consumed on read and
    /// a constant is emitted on write, but it never contributes a value.
    fn is_ignored(&self) -> bool {
        false
    }

    /// Parse raw field text into a typed value.
    fn parse(&self, context: &ColumnContext, text: &str) -> Result<FieldValue>;

    /// Format a typed value back to field text.
    fn format(&self, context: &ColumnContext, value: &FieldValue) -> Result<String>;
}

impl ColumnDefinition for Box<dyn ColumnDefinition> {
    fn name(&self) -> &str {
        self.as_ref().name()
    }

    fn type_name(&self) -> &'static str {
        self.as_ref().type_name()
    }

    fn is_ignored(&self) -> bool {
        self.as_ref().is_ignored()
    }

    fn parse(&self, context: &ColumnContext, text: &str) -> Result<FieldValue> {
        self.as_ref().parse(context, text)
    }

    fn format(&self, context: &ColumnContext, value: &FieldValue) -> Result<String> {
        self.as_ref().format(context, value)
    }
}

/// Build the standard column error for a failed parse.
pub(crate) fn parse_error(
    column: &dyn ColumnDefinition,
    context: &ColumnContext,
    cause: impl Into<String>,
) -> FlatError {
    FlatError::column(
        column.name(),
        column.type_name(),
        context.physical_record_number,
        cause,
    )
}

/// Build the standard column error for a value of the wrong type.
pub(crate) fn type_mismatch(
    column: &dyn ColumnDefinition,
    context: &ColumnContext,
    value: &FieldValue,
) -> FlatError {
    FlatError::column(
        column.name(),
        column.type_name(),
        context.physical_record_number,
        format!("cannot format a '{}' value", value.type_name()),
    )
}
