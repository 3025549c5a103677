// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema-driven writer for fixed-length files.

use std::io::Write;
use std::sync::Arc;

use crate::core::{FieldValue, Result};
use crate::io::traits::RecordWriter;
use crate::schema::{ColumnContext, FixedLengthSchema, FixedLengthSchemaInjector};

use super::FixedLengthOptions;

enum SchemaMode {
    /// One explicit schema for every record
    Fixed(Arc<FixedLengthSchema>),
    /// Per-record schema selection by value shape
    Injected(FixedLengthSchemaInjector),
}

/// Writes fixed-length records, fitting each value into its window.
///
/// Values are padded with the fill character per alignment, or truncated
/// per the window's overflow policy when too long.
pub struct FixedLengthWriter<W: Write> {
    sink: W,
    mode: SchemaMode,
    options: FixedLengthOptions,
    header_written: bool,
    records_written: u64,
}

impl<W: Write> FixedLengthWriter<W> {
    /// Create a writer with an explicit schema.
    pub fn new(
        sink: W,
        schema: Arc<FixedLengthSchema>,
        options: FixedLengthOptions,
    ) -> Result<Self> {
        schema.validate()?;
        Ok(Self::build(sink, SchemaMode::Fixed(schema), options))
    }

    /// Create a writer choosing a schema per record by its values.
    pub fn with_injector(
        sink: W,
        injector: FixedLengthSchemaInjector,
        options: FixedLengthOptions,
    ) -> Result<Self> {
        Ok(Self::build(sink, SchemaMode::Injected(injector), options))
    }

    fn build(sink: W, mode: SchemaMode, options: FixedLengthOptions) -> Self {
        Self {
            sink,
            mode,
            options,
            header_written: false,
            records_written: 0,
        }
    }

    /// The schema used by this writer, if a single one is known.
    pub fn schema(&self) -> Option<&Arc<FixedLengthSchema>> {
        match &self.mode {
            SchemaMode::Fixed(schema) => Some(schema),
            SchemaMode::Injected(_) => None,
        }
    }

    /// Write the column names as a header record, fitted to their windows.
    ///
    /// Ignored once the header or any record has been written, and a no-op
    /// when no single schema is known.
    pub fn write_header(&mut self) -> Result<()> {
        if self.header_written {
            return Ok(());
        }
        self.header_written = true;
        let SchemaMode::Fixed(schema) = &self.mode else {
            return Ok(());
        };
        let header = schema.format_header(
            self.options.alignment,
            self.options.fill_char,
            self.options.truncation,
        );
        self.sink.write_all(header.as_bytes())?;
        self.write_record_separator()?;
        Ok(())
    }

    fn write_record_separator(&mut self) -> Result<()> {
        if let Some(separator) = &self.options.record_separator {
            self.sink.write_all(separator.write_text().as_bytes())?;
        }
        Ok(())
    }
}

impl<W: Write> RecordWriter for FixedLengthWriter<W> {
    fn write_record(&mut self, values: &[FieldValue]) -> Result<()> {
        if !self.header_written {
            if self.options.is_first_record_header {
                self.write_header()?;
            }
            self.header_written = true;
        }
        let context = ColumnContext {
            physical_record_number: self.records_written + 1,
            logical_record_number: self.records_written + 1,
            column_index: 0,
        };
        let record = match &self.mode {
            SchemaMode::Fixed(schema) => schema.format_record(
                &context,
                values,
                self.options.alignment,
                self.options.fill_char,
                self.options.truncation,
            )?,
            SchemaMode::Injected(injector) => {
                let schema = injector.resolve(values, self.records_written + 1)?;
                schema.format_record(
                    &context,
                    values,
                    self.options.alignment,
                    self.options.fill_char,
                    self.options.truncation,
                )?
            }
        };
        self.sink.write_all(record.as_bytes())?;
        self.write_record_separator()?;
        self.records_written += 1;
        Ok(())
    }

    fn write_raw(&mut self, data: &str, write_record_separator: bool) -> Result<()> {
        self.sink.write_all(data.as_bytes())?;
        if write_record_separator {
            self.write_record_separator()?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }

    fn record_count(&self) -> u64 {
        self.records_written
    }
}
