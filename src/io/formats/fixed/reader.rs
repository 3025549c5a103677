// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema-driven reader for fixed-length files.

use std::io::Read;
use std::sync::Arc;

use tracing::debug;

use crate::core::{DecodedRecord, FlatError, Result};
use crate::io::retry::RetryReader;
use crate::io::separator::SeparatorMatcher;
use crate::io::traits::RecordReader;
use crate::schema::{ColumnContext, FixedLengthSchema, FixedLengthSchemaSelector};

use super::FixedLengthOptions;

/// Predicate over the raw record text (true = skip).
pub type UnpartitionedFilter = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Predicate over the stripped window cells (true = skip).
pub type PartitionedFilter = Box<dyn Fn(&[String]) -> bool + Send + Sync>;

enum SchemaMode {
    /// One explicit schema for every record
    Fixed(Arc<FixedLengthSchema>),
    /// Per-record schema selection by record text
    Selected(FixedLengthSchemaSelector),
}

/// Reads fixed-length records, partitioning each by its schema's windows.
///
/// Records are extracted either up to a record separator or, when the
/// options carry no separator, as exactly the schema width back to back.
/// Each cell is stripped of its window's fill characters before its column
/// parses it.
pub struct FixedLengthReader<R: Read> {
    reader: RetryReader<R>,
    mode: SchemaMode,
    separator: Option<SeparatorMatcher>,
    fill_char: char,
    is_first_record_header: bool,
    unpartitioned_filter: Option<UnpartitionedFilter>,
    partitioned_filter: Option<PartitionedFilter>,
    raw: String,
    header_handled: bool,
    physical: u64,
    logical: u64,
}

impl<R: Read> FixedLengthReader<R> {
    /// Create a reader with an explicit schema.
    pub fn new(
        inner: R,
        schema: Arc<FixedLengthSchema>,
        options: FixedLengthOptions,
    ) -> Result<Self> {
        schema.validate()?;
        if options.record_separator.is_none() && schema.has_trailing_window() {
            return Err(FlatError::invalid_schema(
                schema.name(),
                "a trailing window requires a record separator",
            ));
        }
        Ok(Self::build(inner, SchemaMode::Fixed(schema), options))
    }

    /// Create a reader choosing a schema per record by its raw text.
    ///
    /// Selection needs record boundaries, so a record separator is required.
    pub fn with_selector(
        inner: R,
        selector: FixedLengthSchemaSelector,
        options: FixedLengthOptions,
    ) -> Result<Self> {
        if options.record_separator.is_none() {
            return Err(FlatError::unsupported(
                "schema selection over exact-width records",
            ));
        }
        Ok(Self::build(inner, SchemaMode::Selected(selector), options))
    }

    fn build(inner: R, mode: SchemaMode, options: FixedLengthOptions) -> Self {
        Self {
            reader: RetryReader::new(inner),
            mode,
            separator: options
                .record_separator
                .as_ref()
                .map(SeparatorMatcher::from_record_separator),
            fill_char: options.fill_char,
            is_first_record_header: options.is_first_record_header,
            unpartitioned_filter: None,
            partitioned_filter: None,
            raw: String::new(),
            header_handled: false,
            physical: 0,
            logical: 0,
        }
    }

    /// Skip records whose raw text matches the filter.
    pub fn with_unpartitioned_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.unpartitioned_filter = Some(Box::new(filter));
        self
    }

    /// Skip records whose stripped cells match the filter.
    pub fn with_partitioned_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&[String]) -> bool + Send + Sync + 'static,
    {
        self.partitioned_filter = Some(Box::new(filter));
        self
    }

    /// The schema in effect, if a single one is known.
    pub fn schema(&self) -> Option<&Arc<FixedLengthSchema>> {
        match &self.mode {
            SchemaMode::Fixed(schema) => Some(schema),
            SchemaMode::Selected(_) => None,
        }
    }

    /// Extract the next raw record text.
    fn next_record_text(&mut self) -> Result<Option<String>> {
        if self.reader.eof()? {
            return Ok(None);
        }
        match &self.separator {
            Some(matcher) => {
                let mut text = String::new();
                loop {
                    if matcher.is_match(&mut self.reader)? {
                        break;
                    }
                    match self.reader.read()? {
                        Some(c) => text.push(c),
                        None => break,
                    }
                }
                Ok(Some(text))
            }
            None => {
                let width = match &self.mode {
                    SchemaMode::Fixed(schema) => schema.total_width(),
                    SchemaMode::Selected(_) => unreachable!("rejected at construction"),
                };
                let mut text = String::with_capacity(width);
                for _ in 0..width {
                    match self.reader.read()? {
                        Some(c) => text.push(c),
                        None => break,
                    }
                }
                Ok(Some(text))
            }
        }
    }

    /// Pull the next record that survives filters, partitioned and stripped.
    fn next_cells(&mut self) -> Result<Option<(Arc<FixedLengthSchema>, Vec<String>)>> {
        self.handle_header()?;
        loop {
            let Some(text) = self.next_record_text()? else {
                return Ok(None);
            };
            self.physical += 1;
            if text.is_empty() {
                debug!(record = self.physical, "skipped blank record");
                continue;
            }
            if let Some(filter) = &self.unpartitioned_filter {
                if filter(&text) {
                    debug!(record = self.physical, "skipped filtered record");
                    continue;
                }
            }
            let schema = match &self.mode {
                SchemaMode::Fixed(schema) => schema.clone(),
                SchemaMode::Selected(selector) => selector.resolve(&text, self.physical)?,
            };
            let Some(cells) = schema.partition(&text) else {
                return Err(FlatError::record(
                    self.physical,
                    format!(
                        "record is {} characters, expected at least {}",
                        text.chars().count(),
                        schema.total_width()
                    ),
                ));
            };
            let stripped: Vec<String> = cells
                .iter()
                .zip(schema.columns().iter())
                .map(|(cell, (_, window))| window.strip(cell, self.fill_char))
                .collect();
            if let Some(filter) = &self.partitioned_filter {
                if filter(&stripped) {
                    debug!(record = self.physical, "skipped filtered record");
                    continue;
                }
            }
            self.raw = text;
            return Ok(Some((schema, stripped)));
        }
    }

    fn handle_header(&mut self) -> Result<()> {
        if self.header_handled {
            return Ok(());
        }
        self.header_handled = true;
        if !self.is_first_record_header {
            return Ok(());
        }
        if self.next_record_text()?.is_some() {
            self.physical += 1;
            debug!(record = self.physical, "skipped header record");
        }
        Ok(())
    }
}

impl<R: Read> RecordReader for FixedLengthReader<R> {
    fn read_record(&mut self) -> Result<Option<DecodedRecord>> {
        let Some((schema, cells)) = self.next_cells()? else {
            return Ok(None);
        };
        let context = ColumnContext {
            physical_record_number: self.physical,
            logical_record_number: self.logical + 1,
            column_index: 0,
        };
        // Cells are already stripped; parse directly
        let values = schema.parse_cells(&context, &cells, self.fill_char)?;
        self.logical += 1;
        Ok(Some(values))
    }

    fn skip_record(&mut self) -> Result<bool> {
        self.handle_header()?;
        match self.next_record_text()? {
            Some(_) => {
                self.physical += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn raw_record(&self) -> Option<&str> {
        if self.raw.is_empty() {
            None
        } else {
            Some(&self.raw)
        }
    }

    fn physical_record_number(&self) -> u64 {
        self.physical
    }

    fn logical_record_number(&self) -> u64 {
        self.logical
    }

    fn column_names(&self) -> Vec<String> {
        match &self.mode {
            SchemaMode::Fixed(schema) => schema.column_names(),
            SchemaMode::Selected(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FieldValue;
    use crate::schema::{DateColumn, Int32Column, StringColumn, Window};
    use std::io::Cursor;

    fn schema() -> Arc<FixedLengthSchema> {
        let mut schema = FixedLengthSchema::new();
        schema
            .add_column(Int32Column::new("id"), 10)
            .add_column(StringColumn::new("name"), 25)
            .add_column(
                DateColumn::new("created").with_input_formats(["%m/%d/%Y", "%Y-%m-%d"]),
                10,
            );
        Arc::new(schema)
    }

    fn reader_over(
        text: &str,
        schema: Arc<FixedLengthSchema>,
        options: FixedLengthOptions,
    ) -> FixedLengthReader<Cursor<Vec<u8>>> {
        FixedLengthReader::new(Cursor::new(text.as_bytes().to_vec()), schema, options).unwrap()
    }

    #[test]
    fn test_read_single_record() {
        let text = "       123                      Bob 1/19/2013";
        let mut reader = reader_over(text, schema(), FixedLengthOptions::default());
        let record = reader.read_record().unwrap().unwrap();
        assert_eq!(record[0], FieldValue::Int32(123));
        assert_eq!(record[1], FieldValue::String("Bob".to_string()));
        assert!(reader.read_record().unwrap().is_none());
    }

    #[test]
    fn test_read_multiple_records() {
        let text = "       123                      Bob 1/19/2013\n       456                      Sue 1/20/2013\n";
        let mut reader = reader_over(text, schema(), FixedLengthOptions::default());
        assert!(reader.read_record().unwrap().is_some());
        let record = reader.read_record().unwrap().unwrap();
        assert_eq!(record[0], FieldValue::Int32(456));
        assert!(reader.read_record().unwrap().is_none());
        assert_eq!(reader.physical_record_number(), 2);
        assert_eq!(reader.logical_record_number(), 2);
    }

    #[test]
    fn test_short_record_is_error() {
        let mut reader = reader_over("too short", schema(), FixedLengthOptions::default());
        let err = reader.read_record().unwrap_err();
        assert!(matches!(err, FlatError::RecordError { .. }));
    }

    #[test]
    fn test_skip_bad_record() {
        let text = "a b c\n       123                      Bob 1/19/2013";
        let mut reader = reader_over(text, schema(), FixedLengthOptions::default());
        assert!(reader.skip_record().unwrap());
        let record = reader.read_record().unwrap().unwrap();
        assert_eq!(record[0], FieldValue::Int32(123));
        assert!(!reader.skip_record().unwrap());
    }

    #[test]
    fn test_no_record_separator_reads_exact_width() {
        let mut schema = FixedLengthSchema::new();
        schema
            .add_column(Int32Column::new("id"), 4)
            .add_column(StringColumn::new("name"), 4);
        let options = FixedLengthOptions::default().with_record_separator(None);
        let mut reader = reader_over("   1Bob    2Sue ", Arc::new(schema), options);
        let first = reader.read_record().unwrap().unwrap();
        assert_eq!(first[0], FieldValue::Int32(1));
        let second = reader.read_record().unwrap().unwrap();
        assert_eq!(second[1], FieldValue::String("Sue".to_string()));
        assert!(reader.read_record().unwrap().is_none());
    }

    #[test]
    fn test_custom_record_separator() {
        use crate::io::separator::RecordSeparator;
        let mut schema = FixedLengthSchema::new();
        schema.add_column(Int32Column::new("id"), 4);
        let options = FixedLengthOptions::default()
            .with_record_separator(Some(RecordSeparator::literal("BOOM")));
        let mut reader = reader_over("   1BOOM   2BOOM", Arc::new(schema), options);
        assert_eq!(
            reader.read_record().unwrap().unwrap()[0],
            FieldValue::Int32(1)
        );
        assert_eq!(
            reader.read_record().unwrap().unwrap()[0],
            FieldValue::Int32(2)
        );
        assert!(reader.read_record().unwrap().is_none());
    }

    #[test]
    fn test_custom_fill_char_stripped() {
        let mut schema = FixedLengthSchema::new();
        schema
            .add_column(Int32Column::new("id"), Window::new(6).with_fill_char('@'))
            .add_column(StringColumn::new("name"), 5);
        let mut reader = reader_over("@@@123Bob  ", Arc::new(schema), FixedLengthOptions::default());
        let record = reader.read_record().unwrap().unwrap();
        assert_eq!(record[0], FieldValue::Int32(123));
        assert_eq!(record[1], FieldValue::String("Bob".to_string()));
    }

    #[test]
    fn test_trailing_window_absorbs_rest() {
        let mut schema = FixedLengthSchema::new();
        schema
            .add_column(Int32Column::new("id"), 4)
            .add_column(
                StringColumn::new("message").with_preserve_white_space(true),
                Window::trailing(),
            );
        let mut reader = reader_over(
            "   7anything goes here\n",
            Arc::new(schema),
            FixedLengthOptions::default(),
        );
        let record = reader.read_record().unwrap().unwrap();
        assert_eq!(record[0], FieldValue::Int32(7));
        assert_eq!(
            record[1],
            FieldValue::String("anything goes here".to_string())
        );
    }

    #[test]
    fn test_trailing_window_requires_separator() {
        let mut schema = FixedLengthSchema::new();
        schema
            .add_column(Int32Column::new("id"), 4)
            .add_column(StringColumn::new("rest"), Window::trailing());
        let options = FixedLengthOptions::default().with_record_separator(None);
        let result = FixedLengthReader::new(
            Cursor::new(b"".to_vec()),
            Arc::new(schema),
            options,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_header_record_skipped() {
        let text = "id        name                     created   \n       123                      Bob 1/19/2013\n";
        let options = FixedLengthOptions::default().with_first_record_header(true);
        let mut reader = reader_over(text, schema(), options);
        let record = reader.read_record().unwrap().unwrap();
        assert_eq!(record[0], FieldValue::Int32(123));
        assert_eq!(reader.physical_record_number(), 2);
        assert_eq!(reader.logical_record_number(), 1);
    }

    #[test]
    fn test_unpartitioned_filter() {
        let text = "#comment record should be skipped entirely..\n       123                      Bob 1/19/2013\n";
        let mut reader = reader_over(text, schema(), FixedLengthOptions::default())
            .with_unpartitioned_filter(|record| record.starts_with('#'));
        let record = reader.read_record().unwrap().unwrap();
        assert_eq!(record[0], FieldValue::Int32(123));
        assert!(reader.read_record().unwrap().is_none());
    }

    #[test]
    fn test_partitioned_filter() {
        let text = "       123                      Bob 1/19/2013\n       456                      Sue 1/20/2013\n";
        let mut reader = reader_over(text, schema(), FixedLengthOptions::default())
            .with_partitioned_filter(|cells| cells[1] == "Bob");
        let record = reader.read_record().unwrap().unwrap();
        assert_eq!(record[0], FieldValue::Int32(456));
        assert!(reader.read_record().unwrap().is_none());
        assert_eq!(reader.physical_record_number(), 2);
        assert_eq!(reader.logical_record_number(), 1);
    }

    #[test]
    fn test_filter_all_records() {
        let text = "       123                      Bob 1/19/2013\n";
        let mut reader = reader_over(text, schema(), FixedLengthOptions::default())
            .with_unpartitioned_filter(|_| true);
        assert!(reader.read_record().unwrap().is_none());
        assert_eq!(reader.physical_record_number(), 1);
        assert_eq!(reader.logical_record_number(), 0);
    }

    #[test]
    fn test_selector_by_record_length() {
        let narrow = {
            let mut schema = FixedLengthSchema::new();
            schema.add_column(Int32Column::new("id"), 4);
            Arc::new(schema)
        };
        let wide = {
            let mut schema = FixedLengthSchema::new();
            schema
                .add_column(Int32Column::new("id"), 4)
                .add_column(StringColumn::new("name"), 5);
            Arc::new(schema)
        };
        let mut selector = FixedLengthSchemaSelector::new();
        selector
            .when(|record: &str| record.chars().count() == 4)
            .using(narrow);
        selector
            .when(|record: &str| record.chars().count() == 9)
            .using(wide);

        let mut reader = FixedLengthReader::with_selector(
            Cursor::new(b"   1\n   2Sue  \n".to_vec()),
            selector,
            FixedLengthOptions::default(),
        )
        .unwrap();
        assert_eq!(reader.read_record().unwrap().unwrap().len(), 1);
        let record = reader.read_record().unwrap().unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record[1], FieldValue::String("Sue".to_string()));
    }

    #[test]
    fn test_raw_record_access() {
        let text = "       123                      Bob 1/19/2013";
        let mut reader = reader_over(text, schema(), FixedLengthOptions::default());
        reader.read_record().unwrap();
        assert_eq!(reader.raw_record(), Some(text));
    }

    #[test]
    fn test_records_iterator() {
        let text = "       123                      Bob 1/19/2013\n       456                      Sue 1/20/2013\n";
        let mut reader = reader_over(text, schema(), FixedLengthOptions::default());
        let records: Vec<_> = reader.records().collect::<Result<_>>().unwrap();
        assert_eq!(records.len(), 2);
    }
}
