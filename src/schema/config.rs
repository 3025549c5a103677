// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! TOML schema definitions.
//!
//! Schemas can be declared in TOML files and loaded at runtime, which is how
//! the CLI resolves `--schema` arguments:
//!
//! ```toml
//! [schema]
//! name = "people"
//! format = "delimited"        # or "fixed"
//!
//! [[columns]]
//! name = "id"
//! type = "int32"
//!
//! [[columns]]
//! name = "created"
//! type = "date"
//! input_formats = ["%m/%d/%Y"]
//! output_format = "%Y-%m-%d"
//! width = 10                  # fixed-length only
//! alignment = "right"
//! fill = "0"
//! ```

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{FieldType, FlatError, Format, RegisteredSchema};

use super::column::{ColumnDefinition, NullFormatter};
use super::columns::{
    BoolColumn, DateColumn, DateTimeColumn, Float32Column, Float64Column, GuidColumn,
    IgnoredColumn, Int16Column, Int32Column, Int64Column, Int8Column, StringColumn, UInt16Column,
    UInt32Column, UInt64Column, UInt8Column,
};
use super::delimited::DelimitedSchema;
use super::fixed::FixedLengthSchema;
use super::window::{Alignment, Window};

/// Errors raised while loading or validating a schema configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read '{path}': {source}")]
    Io {
        /// Path that failed to read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// A column declares an unknown type
    #[error("unknown column type '{0}'")]
    UnknownColumnType(String),

    /// The schema declares an unknown format
    #[error("unknown format '{0}', expected 'delimited' or 'fixed'")]
    UnknownFormat(String),

    /// A fixed-length column is missing its width
    #[error("column '{0}' requires a width (or trailing = true) for fixed-length schemas")]
    MissingWidth(String),

    /// An alignment string is not recognized
    #[error("invalid alignment '{0}', expected 'left' or 'right'")]
    InvalidAlignment(String),

    /// A fill string is not a single character
    #[error("invalid fill '{0}', expected a single character")]
    InvalidFill(String),

    /// The built schema failed validation
    #[error("schema validation failed: {0}")]
    Invalid(String),
}

impl From<ConfigError> for FlatError {
    fn from(err: ConfigError) -> Self {
        FlatError::config(err.to_string())
    }
}

/// Top-level schema configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Schema identity and format
    pub schema: SchemaMeta,
    /// Column declarations in record order
    #[serde(default)]
    pub columns: Vec<ColumnConfig>,
}

/// The `[schema]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaMeta {
    /// Schema name, used for registry lookups
    pub name: String,
    /// `"delimited"` or `"fixed"`
    pub format: String,
}

/// One `[[columns]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Column name
    pub name: String,
    /// Column type, one of the [`FieldType`] names (or `"ignored"`)
    #[serde(rename = "type")]
    pub column_type: String,
    /// Constant text representing null, both directions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub null: Option<String>,
    /// Text representing `true` (bool columns)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub true_text: Option<String>,
    /// Text representing `false` (bool columns)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub false_text: Option<String>,
    /// Accepted input formats, tried in order (date/datetime columns)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_formats: Option<Vec<String>>,
    /// Output format (date/datetime columns)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<String>,
    /// Window width (fixed-length schemas)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<usize>,
    /// Window alignment: `"left"` or `"right"` (fixed-length schemas)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,
    /// Window fill character (fixed-length schemas)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// Rest-of-record trailing window (fixed-length schemas)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub trailing: bool,
}

impl SchemaConfig {
    /// Parse a schema configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a schema configuration from a TOML file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        let text = std::fs::read_to_string(path_ref).map_err(|source| ConfigError::Io {
            path: path_ref.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// The declared format.
    pub fn format(&self) -> Result<Format, ConfigError> {
        Format::from_str(&self.schema.format)
            .map_err(|_| ConfigError::UnknownFormat(self.schema.format.clone()))
    }

    /// Build the runtime schema this configuration declares.
    pub fn build(&self) -> Result<RegisteredSchema, ConfigError> {
        match self.format()? {
            Format::Delimited => Ok(RegisteredSchema::Delimited(Arc::new(
                self.to_delimited_schema()?,
            ))),
            Format::FixedLength => Ok(RegisteredSchema::FixedLength(Arc::new(
                self.to_fixed_schema()?,
            ))),
        }
    }

    /// Build a delimited schema from the column declarations.
    pub fn to_delimited_schema(&self) -> Result<DelimitedSchema, ConfigError> {
        let mut schema = DelimitedSchema::new().with_name(&self.schema.name);
        for column in &self.columns {
            schema.add_column(build_column(column)?);
        }
        schema
            .validate()
            .map_err(|err| ConfigError::Invalid(err.to_string()))?;
        Ok(schema)
    }

    /// Build a fixed-length schema from the column declarations.
    pub fn to_fixed_schema(&self) -> Result<FixedLengthSchema, ConfigError> {
        let mut schema = FixedLengthSchema::new().with_name(&self.schema.name);
        for column in &self.columns {
            let window = build_window(column)?;
            schema.add_column(build_column(column)?, window);
        }
        schema
            .validate()
            .map_err(|err| ConfigError::Invalid(err.to_string()))?;
        Ok(schema)
    }
}

fn null_formatter(config: &ColumnConfig) -> NullFormatter {
    match &config.null {
        Some(constant) => NullFormatter::constant(constant),
        None => NullFormatter::empty(),
    }
}

fn build_column(config: &ColumnConfig) -> Result<Box<dyn ColumnDefinition>, ConfigError> {
    if config.column_type == "ignored" {
        return Ok(Box::new(IgnoredColumn::new().with_name(&config.name)));
    }
    let field_type = FieldType::try_from_str(&config.column_type)
        .ok_or_else(|| ConfigError::UnknownColumnType(config.column_type.clone()))?;
    let nulls = null_formatter(config);
    let name = config.name.clone();
    let column: Box<dyn ColumnDefinition> = match field_type {
        FieldType::Bool => {
            let mut column = BoolColumn::new(name).with_null_formatter(nulls);
            if let Some(text) = &config.true_text {
                column = column.with_true_text(text);
            }
            if let Some(text) = &config.false_text {
                column = column.with_false_text(text);
            }
            Box::new(column)
        }
        FieldType::Int8 => Box::new(Int8Column::new(name).with_null_formatter(nulls)),
        FieldType::Int16 => Box::new(Int16Column::new(name).with_null_formatter(nulls)),
        FieldType::Int32 => Box::new(Int32Column::new(name).with_null_formatter(nulls)),
        FieldType::Int64 => Box::new(Int64Column::new(name).with_null_formatter(nulls)),
        FieldType::UInt8 => Box::new(UInt8Column::new(name).with_null_formatter(nulls)),
        FieldType::UInt16 => Box::new(UInt16Column::new(name).with_null_formatter(nulls)),
        FieldType::UInt32 => Box::new(UInt32Column::new(name).with_null_formatter(nulls)),
        FieldType::UInt64 => Box::new(UInt64Column::new(name).with_null_formatter(nulls)),
        FieldType::Float32 => Box::new(Float32Column::new(name).with_null_formatter(nulls)),
        FieldType::Float64 => Box::new(Float64Column::new(name).with_null_formatter(nulls)),
        FieldType::String => Box::new(StringColumn::new(name).with_null_formatter(nulls)),
        FieldType::Date => {
            let mut column = DateColumn::new(name).with_null_formatter(nulls);
            if let Some(formats) = &config.input_formats {
                column = column.with_input_formats(formats.clone());
            }
            if let Some(format) = &config.output_format {
                column = column.with_output_format(format);
            }
            Box::new(column)
        }
        FieldType::DateTime => {
            let mut column = DateTimeColumn::new(name).with_null_formatter(nulls);
            if let Some(formats) = &config.input_formats {
                column = column.with_input_formats(formats.clone());
            }
            if let Some(format) = &config.output_format {
                column = column.with_output_format(format);
            }
            Box::new(column)
        }
        FieldType::Guid => Box::new(GuidColumn::new(name).with_null_formatter(nulls)),
    };
    Ok(column)
}

fn build_window(config: &ColumnConfig) -> Result<Window, ConfigError> {
    let mut window = if config.trailing {
        Window::trailing()
    } else {
        let width = config
            .width
            .ok_or_else(|| ConfigError::MissingWidth(config.name.clone()))?;
        Window::new(width)
    };
    if let Some(alignment) = &config.alignment {
        window = window.with_alignment(match alignment.as_str() {
            "left" => Alignment::Left,
            "right" => Alignment::Right,
            other => return Err(ConfigError::InvalidAlignment(other.to_string())),
        });
    }
    if let Some(fill) = &config.fill {
        let mut chars = fill.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => window = window.with_fill_char(c),
            _ => return Err(ConfigError::InvalidFill(fill.clone())),
        }
    }
    Ok(window)
}
