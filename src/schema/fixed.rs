// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema for fixed-length records.

use crate::core::{DecodedRecord, FieldValue, FlatError, Result};

use super::column::{ColumnContext, ColumnDefinition};
use super::window::{Alignment, OverflowPolicy, Window};

/// An ordered list of typed columns, each paired with the fixed-width
/// window it occupies within a record.
///
/// The last window may be a trailing window ([`Window::trailing`]) that
/// absorbs the rest of the record without padding or truncation.
pub struct FixedLengthSchema {
    name: String,
    columns: Vec<(Box<dyn ColumnDefinition>, Window)>,
}

impl std::fmt::Debug for FixedLengthSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedLengthSchema")
            .field("name", &self.name)
            .field("columns", &self.column_names())
            .finish()
    }
}

impl FixedLengthSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self {
            name: "fixed".to_string(),
            columns: Vec::new(),
        }
    }

    /// Name the schema (used in error messages and registries).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Append a column with its window. Returns `&mut Self` for chaining.
    pub fn add_column(
        &mut self,
        column: impl ColumnDefinition + 'static,
        window: impl Into<Window>,
    ) -> &mut Self {
        self.columns.push((Box::new(column), window.into()));
        self
    }

    /// The schema name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All columns with their windows, in order.
    pub fn columns(&self) -> &[(Box<dyn ColumnDefinition>, Window)] {
        &self.columns
    }

    /// The number of columns, ignored columns included.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// The number of values a decoded record carries (ignored excluded).
    pub fn value_count(&self) -> usize {
        self.columns
            .iter()
            .filter(|(c, _)| !c.is_ignored())
            .count()
    }

    /// Column names in order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|(c, _)| c.name().to_string())
            .collect()
    }

    /// Names of the columns that contribute values (ignored excluded).
    ///
    /// Aligned with the positions of a [`DecodedRecord`].
    pub fn value_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|(c, _)| !c.is_ignored())
            .map(|(c, _)| c.name().to_string())
            .collect()
    }

    /// The summed width of all fixed windows (the trailing window excluded).
    pub fn total_width(&self) -> usize {
        self.columns.iter().map(|(_, w)| w.width()).sum()
    }

    /// Whether the last window is a trailing rest-of-record window.
    pub fn has_trailing_window(&self) -> bool {
        self.columns
            .last()
            .map(|(_, w)| w.is_trailing())
            .unwrap_or(false)
    }

    /// Check windows and column names.
    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(FlatError::invalid_schema(&self.name, "schema has no columns"));
        }
        let mut seen = std::collections::HashSet::new();
        for (index, (column, window)) in self.columns.iter().enumerate() {
            window.validate(&self.name)?;
            if window.is_trailing() && index != self.columns.len() - 1 {
                return Err(FlatError::invalid_schema(
                    &self.name,
                    "only the last window may be trailing",
                ));
            }
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

    /// Split a raw record into per-window cells, fill characters intact.
    ///
    /// Returns `None` when the record is shorter than the fixed prefix.
    /// Text beyond the fixed prefix goes to the trailing window when one is
    /// defined and is dropped otherwise.
    pub fn partition(&self, record: &str) -> Option<Vec<String>> {
        let chars: Vec<char> = record.chars().collect();
        if chars.len() < self.total_width() {
            return None;
        }
        let mut cells = Vec::with_capacity(self.columns.len());
        let mut offset = 0;
        for (_, window) in &self.columns {
            if window.is_trailing() {
                cells.push(chars[offset..].iter().collect());
                offset = chars.len();
            } else {
                let end = offset + window.width();
                cells.push(chars[offset..end].iter().collect());
                offset = end;
            }
        }
        Some(cells)
    }

    /// Convert partitioned cells into a decoded record.
    ///
    /// Each cell is stripped of its window's fill characters before the
    /// column parses it. Ignored columns consume their cell silently.
    pub fn parse_cells(
        &self,
        context: &ColumnContext,
        cells: &[String],
        default_fill: char,
    ) -> Result<DecodedRecord> {
        let mut values = Vec::with_capacity(self.value_count());
        for (index, ((column, window), cell)) in self.columns.iter().zip(cells.iter()).enumerate() {
            if column.is_ignored() {
                continue;
            }
            let cell_context = ColumnContext {
                column_index: index,
                ..*context
            };
            let stripped = window.strip(cell, default_fill);
            values.push(column.parse(&cell_context, &stripped)?);
        }
        Ok(values)
    }

    /// Convert a decoded record into a fitted record string.
    ///
    /// Each value is formatted by its column and then padded or truncated to
    /// its window. Ignored columns emit their constant, fitted like any
    /// other value.
    pub fn format_record(
        &self,
        context: &ColumnContext,
        values: &[FieldValue],
        default_alignment: Alignment,
        default_fill: char,
        default_truncation: OverflowPolicy,
    ) -> Result<String> {
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
        let mut record = String::with_capacity(self.total_width());
        let mut next_value = values.iter();
        for (index, (column, window)) in self.columns.iter().enumerate() {
            let cell_context = ColumnContext {
                column_index: index,
                ..*context
            };
            let value = if column.is_ignored() {
                &FieldValue::Null
            } else {
                next_value.next().expect("value count checked above")
            };
            let formatted = column.format(&cell_context, value)?;
            record.push_str(&window.fit(
                &formatted,
                default_alignment,
                default_fill,
                default_truncation,
            ));
        }
        Ok(record)
    }

    /// Format the column names as a header record, fitted to their windows.
    pub fn format_header(
        &self,
        default_alignment: Alignment,
        default_fill: char,
        default_truncation: OverflowPolicy,
    ) -> String {
        let mut record = String::with_capacity(self.total_width());
        for (column, window) in &self.columns {
            record.push_str(&window.fit(
                column.name(),
                default_alignment,
                default_fill,
                default_truncation,
            ));
        }
        record
    }
}

impl Default for FixedLengthSchema {
    fn default() -> Self {
        Self::new()
    }
}
