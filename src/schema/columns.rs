// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Concrete column definitions, one per field type.
//!
//! Every column shares the [`ColumnOptions`] behavior (null handling,
//! trimming, preprocessing) and adds its own parse/format rules. Columns are
//! constructed with `new(name)` and configured through consuming `with_*`
//! builders.

use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::core::{FieldValue, Result};

use super::column::{
    parse_error, type_mismatch, ColumnContext, ColumnDefinition, ColumnOptions, NullFormatter,
    Preprocessor,
};

// =============================================================================
// Boolean
// =============================================================================

/// A column containing boolean values with configurable true/false texts.
pub struct BoolColumn {
    name: String,
    options: ColumnOptions,
    true_text: String,
    false_text: String,
}

impl BoolColumn {
    /// Create a boolean column parsing `"true"`/`"false"`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: ColumnOptions::new(),
            true_text: "true".to_string(),
            false_text: "false".to_string(),
        }
    }

    /// Set the text representing `true`.
    pub fn with_true_text(mut self, text: impl Into<String>) -> Self {
        self.true_text = text.into();
        self
    }

    /// Set the text representing `false`.
    pub fn with_false_text(mut self, text: impl Into<String>) -> Self {
        self.false_text = text.into();
        self
    }

    /// Replace the null formatter.
    pub fn with_null_formatter(mut self, formatter: NullFormatter) -> Self {
        self.options.set_null_formatter(formatter);
        self
    }
}

impl ColumnDefinition for BoolColumn {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "bool"
    }

    fn parse(&self, context: &ColumnContext, text: &str) -> Result<FieldValue> {
        let Some(prepared) = self.options.prepare(text) else {
            return Ok(FieldValue::Null);
        };
        if prepared == self.true_text {
            Ok(FieldValue::Bool(true))
        } else if prepared == self.false_text {
            Ok(FieldValue::Bool(false))
        } else {
            Err(parse_error(
                self,
                context,
                format!(
                    "expected '{}' or '{}', found '{prepared}'",
                    self.true_text, self.false_text
                ),
            ))
        }
    }

    fn format(&self, context: &ColumnContext, value: &FieldValue) -> Result<String> {
        match value {
            FieldValue::Null => Ok(self.options.null_formatter().null_text().to_string()),
            FieldValue::Bool(true) => Ok(self.true_text.clone()),
            FieldValue::Bool(false) => Ok(self.false_text.clone()),
            other => Err(type_mismatch(self, context, other)),
        }
    }
}

// =============================================================================
// Integers
// =============================================================================

macro_rules! integer_column {
    ($(#[$doc:meta])* $column:ident, $ty:ty, $variant:ident, $type_name:literal) => {
        $(#[$doc])*
        pub struct $column {
            name: String,
            options: ColumnOptions,
            output_width: Option<usize>,
        }

        impl $column {
            /// Create an integer column.
            pub fn new(name: impl Into<String>) -> Self {
                Self {
                    name: name.into(),
                    options: ColumnOptions::new(),
                    output_width: None,
                }
            }

            /// Zero-pad formatted output to the given width.
            pub fn with_output_width(mut self, width: usize) -> Self {
                self.output_width = Some(width);
                self
            }

            /// Replace the null formatter.
            pub fn with_null_formatter(mut self, formatter: NullFormatter) -> Self {
                self.options.set_null_formatter(formatter);
                self
            }

            /// Install a preprocessor run on the raw text before parsing.
            pub fn with_preprocessor(mut self, preprocessor: Preprocessor) -> Self {
                self.options.set_preprocessor(preprocessor);
                self
            }
        }

        impl ColumnDefinition for $column {
            fn name(&self) -> &str {
                &self.name
            }

            fn type_name(&self) -> &'static str {
                $type_name
            }

            fn parse(&self, context: &ColumnContext, text: &str) -> Result<FieldValue> {
                let Some(prepared) = self.options.prepare(text) else {
                    return Ok(FieldValue::Null);
                };
                prepared
                    .parse::<$ty>()
                    .map(FieldValue::$variant)
                    .map_err(|err| parse_error(self, context, err.to_string()))
            }

            fn format(&self, context: &ColumnContext, value: &FieldValue) -> Result<String> {
                match value {
                    FieldValue::Null => {
                        Ok(self.options.null_formatter().null_text().to_string())
                    }
                    FieldValue::$variant(v) => Ok(match self.output_width {
                        Some(width) => format!("{v:0width$}"),
                        None => v.to_string(),
                    }),
                    other => Err(type_mismatch(self, context, other)),
                }
            }
        }
    };
}

integer_column!(
    /// A column containing 8-bit signed integers.
    Int8Column, i8, Int8, "int8"
);
integer_column!(
    /// A column containing 16-bit signed integers.
    Int16Column, i16, Int16, "int16"
);
integer_column!(
    /// A column containing 32-bit signed integers.
    Int32Column, i32, Int32, "int32"
);
integer_column!(
    /// A column containing 64-bit signed integers.
    Int64Column, i64, Int64, "int64"
);
integer_column!(
    /// A column containing 8-bit unsigned integers.
    UInt8Column, u8, UInt8, "uint8"
);
integer_column!(
    /// A column containing 16-bit unsigned integers.
    UInt16Column, u16, UInt16, "uint16"
);
integer_column!(
    /// A column containing 32-bit unsigned integers.
    UInt32Column, u32, UInt32, "uint32"
);
integer_column!(
    /// A column containing 64-bit unsigned integers.
    UInt64Column, u64, UInt64, "uint64"
);

// =============================================================================
// Floating point
// =============================================================================

macro_rules! float_column {
    ($(#[$doc:meta])* $column:ident, $ty:ty, $variant:ident, $type_name:literal) => {
        $(#[$doc])*
        pub struct $column {
            name: String,
            options: ColumnOptions,
        }

        impl $column {
            /// Create a floating-point column.
            pub fn new(name: impl Into<String>) -> Self {
                Self {
                    name: name.into(),
                    options: ColumnOptions::new(),
                }
            }

            /// Replace the null formatter.
            pub fn with_null_formatter(mut self, formatter: NullFormatter) -> Self {
                self.options.set_null_formatter(formatter);
                self
            }

            /// Install a preprocessor run on the raw text before parsing.
            pub fn with_preprocessor(mut self, preprocessor: Preprocessor) -> Self {
                self.options.set_preprocessor(preprocessor);
                self
            }
        }

        impl ColumnDefinition for $column {
            fn name(&self) -> &str {
                &self.name
            }

            fn type_name(&self) -> &'static str {
                $type_name
            }

            fn parse(&self, context: &ColumnContext, text: &str) -> Result<FieldValue> {
                let Some(prepared) = self.options.prepare(text) else {
                    return Ok(FieldValue::Null);
                };
                prepared
                    .parse::<$ty>()
                    .map(FieldValue::$variant)
                    .map_err(|err| parse_error(self, context, err.to_string()))
            }

            fn format(&self, context: &ColumnContext, value: &FieldValue) -> Result<String> {
                match value {
                    FieldValue::Null => {
                        Ok(self.options.null_formatter().null_text().to_string())
                    }
                    FieldValue::$variant(v) => Ok(v.to_string()),
                    other => Err(type_mismatch(self, context, other)),
                }
            }
        }
    };
}

float_column!(
    /// A column containing 32-bit floating point values.
    Float32Column, f32, Float32, "float32"
);
float_column!(
    /// A column containing 64-bit floating point values.
    Float64Column, f64, Float64, "float64"
);

// =============================================================================
// String
// =============================================================================

/// A column containing arbitrary text.
pub struct StringColumn {
    name: String,
    options: ColumnOptions,
}

impl StringColumn {
    /// Create a string column.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: ColumnOptions::new(),
        }
    }

    /// Replace the null formatter.
    pub fn with_null_formatter(mut self, formatter: NullFormatter) -> Self {
        self.options.set_null_formatter(formatter);
        self
    }

    /// Keep leading and trailing whitespace instead of trimming it.
    pub fn with_preserve_white_space(mut self, preserve: bool) -> Self {
        self.options.set_preserve_white_space(preserve);
        self
    }

    /// Install a preprocessor run on the raw text before parsing.
    pub fn with_preprocessor(mut self, preprocessor: Preprocessor) -> Self {
        self.options.set_preprocessor(preprocessor);
        self
    }
}

impl ColumnDefinition for StringColumn {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "string"
    }

    fn parse(&self, _context: &ColumnContext, text: &str) -> Result<FieldValue> {
        match self.options.prepare(text) {
            Some(prepared) => Ok(FieldValue::String(prepared)),
            None => Ok(FieldValue::Null),
        }
    }

    fn format(&self, context: &ColumnContext, value: &FieldValue) -> Result<String> {
        match value {
            FieldValue::Null => Ok(self.options.null_formatter().null_text().to_string()),
            FieldValue::String(s) => Ok(s.clone()),
            other => Err(type_mismatch(self, context, other)),
        }
    }
}

// =============================================================================
// Temporal
// =============================================================================

const DATE_FORMATS: &[&str] = &["%Y-%m-%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d"];

/// A column containing calendar dates.
pub struct DateColumn {
    name: String,
    options: ColumnOptions,
    input_formats: Vec<String>,
    output_format: String,
}

impl DateColumn {
    /// Create a date column parsing and formatting ISO-8601 (`%Y-%m-%d`).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: ColumnOptions::new(),
            input_formats: DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
            output_format: DATE_FORMATS[0].to_string(),
        }
    }

    /// Replace the accepted input formats; each is tried in order.
    pub fn with_input_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input_formats = formats.into_iter().map(Into::into).collect();
        self
    }

    /// Set the chrono format string used when formatting.
    pub fn with_output_format(mut self, format: impl Into<String>) -> Self {
        self.output_format = format.into();
        self
    }

    /// Replace the null formatter.
    pub fn with_null_formatter(mut self, formatter: NullFormatter) -> Self {
        self.options.set_null_formatter(formatter);
        self
    }
}

impl ColumnDefinition for DateColumn {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "date"
    }

    fn parse(&self, context: &ColumnContext, text: &str) -> Result<FieldValue> {
        let Some(prepared) = self.options.prepare(text) else {
            return Ok(FieldValue::Null);
        };
        for format in &self.input_formats {
            if let Ok(date) = NaiveDate::parse_from_str(&prepared, format) {
                return Ok(FieldValue::Date(date));
            }
        }
        Err(parse_error(
            self,
            context,
            format!("'{prepared}' does not match any accepted date format"),
        ))
    }

    fn format(&self, context: &ColumnContext, value: &FieldValue) -> Result<String> {
        match value {
            FieldValue::Null => Ok(self.options.null_formatter().null_text().to_string()),
            FieldValue::Date(date) => Ok(date.format(&self.output_format).to_string()),
            other => Err(type_mismatch(self, context, other)),
        }
    }
}

/// A column containing date-and-time values without a timezone.
pub struct DateTimeColumn {
    name: String,
    options: ColumnOptions,
    input_formats: Vec<String>,
    output_format: String,
}

impl DateTimeColumn {
    /// Create a datetime column accepting ISO-8601 variants.
    ///
    /// A date-only input format promotes the parsed date to midnight.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: ColumnOptions::new(),
            input_formats: DATETIME_FORMATS.iter().map(|f| f.to_string()).collect(),
            output_format: DATETIME_FORMATS[0].to_string(),
        }
    }

    /// Replace the accepted input formats; each is tried in order.
    pub fn with_input_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input_formats = formats.into_iter().map(Into::into).collect();
        self
    }

    /// Set the chrono format string used when formatting.
    pub fn with_output_format(mut self, format: impl Into<String>) -> Self {
        self.output_format = format.into();
        self
    }

    /// Replace the null formatter.
    pub fn with_null_formatter(mut self, formatter: NullFormatter) -> Self {
        self.options.set_null_formatter(formatter);
        self
    }
}

impl ColumnDefinition for DateTimeColumn {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "datetime"
    }

    fn parse(&self, context: &ColumnContext, text: &str) -> Result<FieldValue> {
        let Some(prepared) = self.options.prepare(text) else {
            return Ok(FieldValue::Null);
        };
        for format in &self.input_formats {
            if let Ok(datetime) = NaiveDateTime::parse_from_str(&prepared, format) {
                return Ok(FieldValue::DateTime(datetime));
            }
            // Date-only formats cannot produce a NaiveDateTime directly
            if let Ok(date) = NaiveDate::parse_from_str(&prepared, format) {
                if let Some(datetime) = date.and_hms_opt(0, 0, 0) {
                    return Ok(FieldValue::DateTime(datetime));
                }
            }
        }
        Err(parse_error(
            self,
            context,
            format!("'{prepared}' does not match any accepted datetime format"),
        ))
    }

    fn format(&self, context: &ColumnContext, value: &FieldValue) -> Result<String> {
        match value {
            FieldValue::Null => Ok(self.options.null_formatter().null_text().to_string()),
            FieldValue::DateTime(datetime) => {
                Ok(datetime.format(&self.output_format).to_string())
            }
            other => Err(type_mismatch(self, context, other)),
        }
    }
}

// =============================================================================
// Guid
// =============================================================================

/// A column containing globally unique identifiers.
pub struct GuidColumn {
    name: String,
    options: ColumnOptions,
}

impl GuidColumn {
    /// Create a guid column; output is hyphenated lowercase.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: ColumnOptions::new(),
        }
    }

    /// Replace the null formatter.
    pub fn with_null_formatter(mut self, formatter: NullFormatter) -> Self {
        self.options.set_null_formatter(formatter);
        self
    }
}

impl ColumnDefinition for GuidColumn {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "guid"
    }

    fn parse(&self, context: &ColumnContext, text: &str) -> Result<FieldValue> {
        let Some(prepared) = self.options.prepare(text) else {
            return Ok(FieldValue::Null);
        };
        Uuid::parse_str(&prepared)
            .map(FieldValue::Guid)
            .map_err(|err| parse_error(self, context, err.to_string()))
    }

    fn format(&self, context: &ColumnContext, value: &FieldValue) -> Result<String> {
        match value {
            FieldValue::Null => Ok(self.options.null_formatter().null_text().to_string()),
            FieldValue::Guid(guid) => Ok(guid.hyphenated().to_string()),
            other => Err(type_mismatch(self, context, other)),
        }
    }
}

// =============================================================================
// Ignored
// =============================================================================

/// A column whose raw field is consumed on read and replaced by a constant
/// on write, never contributing a value to the decoded record.
pub struct IgnoredColumn {
    name: String,
    constant: String,
}

impl IgnoredColumn {
    /// Create an unnamed ignored column emitting the empty string.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            constant: String::new(),
        }
    }

    /// Name the ignored column (for schema listings only).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the constant text written for this column.
    pub fn with_constant(mut self, constant: impl Into<String>) -> Self {
        self.constant = constant.into();
        self
    }
}

impl Default for IgnoredColumn {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnDefinition for IgnoredColumn {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "ignored"
    }

    fn is_ignored(&self) -> bool {
        true
    }

    fn parse(&self, _context: &ColumnContext, _text: &str) -> Result<FieldValue> {
        Ok(FieldValue::Null)
    }

    fn format(&self, _context: &ColumnContext, _value: &FieldValue) -> Result<String> {
        Ok(self.constant.clone())
    }
}
