// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema for delimited (CSV-like) records.

use tracing::warn;

use crate::core::{DecodedRecord, FieldValue, FlatError, Result};

use super::column::{ColumnContext, ColumnDefinition};

/// An ordered list of typed columns describing one delimited record shape.
///
/// Columns convert raw fields positionally. Ignored columns consume a raw
/// field on parse without contributing a value, and emit their constant on
/// format without consuming a value.
pub struct DelimitedSchema {
    name: String,
    columns: Vec<Box<dyn ColumnDefinition>>,
}

impl std::fmt::Debug for DelimitedSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelimitedSchema")
            .field("name", &self.name)
            .field("columns", &self.column_names())
            .finish()
    }
}

impl DelimitedSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self {
            name: "delimited".to_string(),
            columns: Vec::new(),
        }
    }

    /// Name the schema (used in error messages and registries).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Append a column. Returns `&mut Self` for chaining.
    pub fn add_column(&mut self, column: impl ColumnDefinition + 'static) -> &mut Self {
        self.columns.push(Box::new(column));
        self
    }

    /// The schema name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All columns in order, ignored columns included.
    pub fn columns(&self) -> &[Box<dyn ColumnDefinition>] {
        &self.columns
    }

    /// The number of columns, ignored columns included.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// The number of values a decoded record carries (ignored excluded).
    pub fn value_count(&self) -> usize {
        self.columns.iter().filter(|c| !c.is_ignored()).count()
    }

    /// Column names in order, ignored columns included.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name().to_string()).collect()
    }

    /// Names of the columns that contribute values (ignored excluded).
    ///
    /// Aligned with the positions of a [`DecodedRecord`].
    pub fn value_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| !c.is_ignored())
            .map(|c| c.name().to_string())
            .collect()
    }

    /// Find the index of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    /// Check the schema for duplicate column names.
    ///
    /// Unnamed (ignored) columns are exempt.
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for column in &self.columns {
            let name = column.name();
            if name.is_empty() {
                continue;
            }
            if !seen.insert(name) {
                return Err(FlatError::invalid_schema(
                    &self.name,
                    format!("duplicate column '{name}'"),
                ));
            }
        }
        Ok(())
    }

    /// Convert raw fields into a decoded record.
    ///
    /// Fewer fields than columns is a record error; extra fields are ignored
    /// with a warning. Ignored columns consume their field silently.
    pub fn parse_values(&self, context: &ColumnContext, fields: &[String]) -> Result<DecodedRecord> {
        if fields.len() < self.columns.len() {
            return Err(FlatError::record(
                context.physical_record_number,
                format!(
                    "expected {} fields, found {}",
                    self.columns.len(),
                    fields.len()
                ),
            ));
        }
        if fields.len() > self.columns.len() {
            warn!(
                record = context.physical_record_number,
                expected = self.columns.len(),
                found = fields.len(),
                "ignoring trailing fields"
            );
        }
        let mut values = Vec::with_capacity(self.value_count());
        for (index, column) in self.columns.iter().enumerate() {
            if column.is_ignored() {
                continue;
            }
            let cell_context = ColumnContext {
                column_index: index,
                ..*context
            };
            values.push(column.parse(&cell_context, &fields[index])?);
        }
        Ok(values)
    }

    /// Convert a decoded record into raw fields, one per column.
    ///
    /// Ignored columns emit their constant without consuming a value.
    pub fn format_values(
        &self,
        context: &ColumnContext,
        values: &[FieldValue],
    ) -> Result<Vec<String>> {
        if values.len() != self.value_count() {
            return Err(FlatError::record(
                context.physical_record_number,
                format!(
                    "expected {} values, found {}",
                    self.value_count(),
                    values.len()
                ),
            ));
        }
        let mut fields = Vec::with_capacity(self.columns.len());
        let mut next_value = values.iter();
        for (index, column) in self.columns.iter().enumerate() {
            let cell_context = ColumnContext {
                column_index: index,
                ..*context
            };
            let value = if column.is_ignored() {
                &FieldValue::Null
            } else {
                next_value.next().expect("value count checked above")
            };
            fields.push(column.format(&cell_context, value)?);
        }
        Ok(fields)
    }
}

impl Default for DelimitedSchema {
    fn default() -> Self {
        Self::new()
    }
}
