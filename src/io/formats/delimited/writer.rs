// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema-driven writer for delimited files.

use std::io::Write;
use std::sync::Arc;

use crate::core::{FieldValue, Result};
use crate::io::traits::RecordWriter;
use crate::schema::{ColumnContext, DelimitedSchema, DelimitedSchemaInjector};

use super::DelimitedOptions;

enum SchemaMode {
    /// One explicit schema for every record
    Fixed(Arc<DelimitedSchema>),
    /// Per-record schema selection by value shape
    Injected(DelimitedSchemaInjector),
    /// No schema: values written through their plain text form
    Untyped,
}

/// Builds textual representations of records by separating fields with a
/// delimiter.
///
/// Values are quoted only when they contain the separator, the quote
/// character, or a record separator character (embedded quotes doubled),
/// unless `always_quote` is set.
pub struct DelimitedWriter<W: Write> {
    sink: W,
    mode: SchemaMode,
    options: DelimitedOptions,
    schema_written: bool,
    records_written: u64,
}

impl<W: Write> DelimitedWriter<W> {
    /// Create a writer with an explicit schema.
    pub fn new(sink: W, schema: Arc<DelimitedSchema>, options: DelimitedOptions) -> Result<Self> {
        options.validate()?;
        schema.validate()?;
        Ok(Self::build(sink, SchemaMode::Fixed(schema), options))
    }

    /// Create a writer with no schema.
    ///
    /// Values are written through their plain text form; no header is ever
    /// written, even when `is_first_record_schema` is set.
    pub fn without_schema(sink: W, options: DelimitedOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::build(sink, SchemaMode::Untyped, options))
    }

    /// Create a writer choosing a schema per record by its values.
    pub fn with_injector(
        sink: W,
        injector: DelimitedSchemaInjector,
        options: DelimitedOptions,
    ) -> Result<Self> {
        options.validate()?;
        Ok(Self::build(sink, SchemaMode::Injected(injector), options))
    }

    fn build(sink: W, mode: SchemaMode, options: DelimitedOptions) -> Self {
        Self {
            sink,
            mode,
            options,
            schema_written: false,
            records_written: 0,
        }
    }

    /// The schema used by this writer, if a single one is known.
    pub fn schema(&self) -> Option<&Arc<DelimitedSchema>> {
        match &self.mode {
            SchemaMode::Fixed(schema) => Some(schema),
            _ => None,
        }
    }

    /// Write the column names as a header record.
    ///
    /// Ignored once the header or any record has been written, and a no-op
    /// when no single schema is known.
    pub fn write_schema(&mut self) -> Result<()> {
        if self.schema_written {
            return Ok(());
        }
        self.schema_written = true;
        let SchemaMode::Fixed(schema) = &self.mode else {
            return Ok(());
        };
        let names = schema.column_names();
        let line = self.join_fields(&names);
        self.sink.write_all(line.as_bytes())?;
        self.write_record_separator()?;
        Ok(())
    }

    fn write_record_separator(&mut self) -> Result<()> {
        self.sink
            .write_all(self.options.record_separator.write_text().as_bytes())?;
        Ok(())
    }

    fn join_fields(&self, fields: &[String]) -> String {
        let quoted: Vec<String> = fields.iter().map(|field| self.quote_field(field)).collect();
        quoted.join(&self.options.separator)
    }

    /// Quote a field if it needs it (or always, when configured).
    fn quote_field(&self, field: &str) -> String {
        let needs_quote = self.options.always_quote
            || field.contains(&self.options.separator)
            || field.contains(self.options.quote)
            || field
                .chars()
                .any(|c| self.options.record_separator.contains_char(c));
        if !needs_quote {
            return field.to_string();
        }
        let quote = self.options.quote;
        let mut quoted = String::with_capacity(field.len() + 2);
        quoted.push(quote);
        for c in field.chars() {
            if c == quote {
                quoted.push(quote);
            }
            quoted.push(c);
        }
        quoted.push(quote);
        quoted
    }
}

impl<W: Write> RecordWriter for DelimitedWriter<W> {
    fn write_record(&mut self, values: &[FieldValue]) -> Result<()> {
        if !self.schema_written {
            if self.options.is_first_record_schema {
                self.write_schema()?;
            }
            self.schema_written = true;
        }
        let context = ColumnContext {
            physical_record_number: self.records_written + 1,
            logical_record_number: self.records_written + 1,
            column_index: 0,
        };
        let fields = match &self.mode {
            SchemaMode::Fixed(schema) => schema.format_values(&context, values)?,
            SchemaMode::Injected(injector) => {
                let schema = injector.resolve(values, self.records_written + 1)?;
                schema.format_values(&context, values)?
            }
            SchemaMode::Untyped => values.iter().map(FieldValue::to_text).collect(),
        };
        let line = self.join_fields(&fields);
        self.sink.write_all(line.as_bytes())?;
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
