// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema-driven reader for delimited files.

use std::io::Read;
use std::sync::Arc;

use tracing::debug;

use crate::core::{DecodedRecord, FieldValue, Result};
use crate::io::traits::RecordReader;
use crate::schema::{
    ColumnContext, DelimitedSchema, DelimitedSchemaSelector, StringColumn,
};

use super::parser::DelimitedRecordParser;
use super::DelimitedOptions;

/// Predicate deciding whether a raw record is skipped (true = skip).
pub type RecordFilter = Box<dyn Fn(&[String]) -> bool + Send + Sync>;

enum SchemaMode {
    /// One explicit schema for every record
    Fixed(Arc<DelimitedSchema>),
    /// Per-record schema selection
    Selected(DelimitedSchemaSelector),
    /// No schema: header names only, or fully untyped
    Untyped,
}

/// Reads delimited records, converting fields through a schema.
///
/// Three schema modes are supported:
/// - an explicit schema (optionally skipping a header row),
/// - header-derived: `is_first_record_schema` with no schema builds a
///   string schema from the first record,
/// - per-record selection through a [`DelimitedSchemaSelector`].
///
/// Without any schema, fields decode as strings (empty fields as null).
pub struct DelimitedReader<R: Read> {
    parser: DelimitedRecordParser<R>,
    mode: SchemaMode,
    header_schema: Option<Arc<DelimitedSchema>>,
    is_first_record_schema: bool,
    filter: Option<RecordFilter>,
    header_handled: bool,
    physical: u64,
    logical: u64,
}

impl<R: Read> DelimitedReader<R> {
    /// Create a reader with an explicit schema.
    ///
    /// With `is_first_record_schema` set, the first record is skipped and
    /// the given schema is used for the rest.
    pub fn new(inner: R, schema: Arc<DelimitedSchema>, options: DelimitedOptions) -> Result<Self> {
        options.validate()?;
        schema.validate()?;
        Ok(Self::build(inner, SchemaMode::Fixed(schema), options))
    }

    /// Create a reader with no schema.
    ///
    /// With `is_first_record_schema` set, a string schema is built from the
    /// header names; otherwise every field decodes as a string.
    pub fn without_schema(inner: R, options: DelimitedOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::build(inner, SchemaMode::Untyped, options))
    }

    /// Create a reader choosing a schema per record.
    pub fn with_selector(
        inner: R,
        selector: DelimitedSchemaSelector,
        options: DelimitedOptions,
    ) -> Result<Self> {
        options.validate()?;
        Ok(Self::build(inner, SchemaMode::Selected(selector), options))
    }

    fn build(inner: R, mode: SchemaMode, options: DelimitedOptions) -> Self {
        let is_first_record_schema = options.is_first_record_schema;
        Self {
            parser: DelimitedRecordParser::new(inner, &options),
            mode,
            header_schema: None,
            is_first_record_schema,
            filter: None,
            header_handled: false,
            physical: 0,
            logical: 0,
        }
    }

    /// Skip raw records for which the filter returns true.
    ///
    /// The filter sees raw string fields before any conversion; filtered
    /// records advance the physical record number only.
    pub fn with_record_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&[String]) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(filter));
        self
    }

    /// The schema in effect, if a single one is known.
    ///
    /// In header-derived mode this is `None` until the header is read.
    pub fn schema(&self) -> Option<&Arc<DelimitedSchema>> {
        match &self.mode {
            SchemaMode::Fixed(schema) => Some(schema),
            SchemaMode::Untyped => self.header_schema.as_ref(),
            SchemaMode::Selected(_) => None,
        }
    }

    fn handle_header(&mut self) -> Result<()> {
        if self.header_handled {
            return Ok(());
        }
        self.header_handled = true;
        if !self.is_first_record_schema {
            return Ok(());
        }
        let Some(fields) = self.parser.read_record()? else {
            return Ok(());
        };
        self.physical += 1;
        if matches!(self.mode, SchemaMode::Untyped) {
            let mut schema = DelimitedSchema::new().with_name("header");
            for name in &fields {
                schema.add_column(StringColumn::new(name));
            }
            schema.validate()?;
            self.header_schema = Some(Arc::new(schema));
        } else {
            debug!(record = self.physical, "skipped header record");
        }
        Ok(())
    }

    /// Pull the next unfiltered raw record.
    fn next_raw(&mut self) -> Result<Option<Vec<String>>> {
        self.handle_header()?;
        loop {
            let Some(fields) = self.parser.read_record()? else {
                return Ok(None);
            };
            self.physical += 1;
            // A blank line is not a record
            if self.parser.raw_record().is_empty()
                && fields.len() == 1
                && fields[0].is_empty()
            {
                debug!(record = self.physical, "skipped blank record");
                continue;
            }
            if let Some(filter) = &self.filter {
                if filter(&fields) {
                    debug!(record = self.physical, "skipped filtered record");
                    continue;
                }
            }
            return Ok(Some(fields));
        }
    }
}

impl<R: Read> RecordReader for DelimitedReader<R> {
    fn read_record(&mut self) -> Result<Option<DecodedRecord>> {
        let Some(fields) = self.next_raw()? else {
            return Ok(None);
        };
        let context = ColumnContext {
            physical_record_number: self.physical,
            logical_record_number: self.logical + 1,
            column_index: 0,
        };
        let values = match &self.mode {
            SchemaMode::Fixed(schema) => schema.parse_values(&context, &fields)?,
            SchemaMode::Selected(selector) => {
                let schema = selector.resolve(&fields, self.physical)?;
                schema.parse_values(&context, &fields)?
            }
            SchemaMode::Untyped => match &self.header_schema {
                Some(schema) => schema.parse_values(&context, &fields)?,
                None => fields
                    .into_iter()
                    .map(|field| {
                        if field.is_empty() {
                            FieldValue::Null
                        } else {
                            FieldValue::String(field)
                        }
                    })
                    .collect(),
            },
        };
        self.logical += 1;
        Ok(Some(values))
    }

    fn skip_record(&mut self) -> Result<bool> {
        Ok(self.next_raw()?.is_some())
    }

    fn raw_record(&self) -> Option<&str> {
        let raw = self.parser.raw_record();
        if raw.is_empty() {
            None
        } else {
            Some(raw)
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
            SchemaMode::Untyped => self
                .header_schema
                .as_ref()
                .map(|schema| schema.column_names())
                .unwrap_or_default(),
            SchemaMode::Selected(_) => Vec::new(),
        }
    }
}
