// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Flatcodec
//!
//! Flat file codec library for delimited and fixed-length text files.
//!
//! This library provides schema-driven reading and writing for flat files,
//! organized by format:
//! - **Delimited** (CSV-like) support in [`io::formats::delimited`](crate::io::formats::delimited)
//! - **Fixed-length** support in [`io::formats::fixed`](crate::io::formats::fixed)
//! - **Schemas and columns** in the [`schema`](crate::schema) module
//! - **Format detection** in [`io::detection`](crate::io::detection)
//!
//! ## Architecture
//!
//! The library is organized into three layers:
//! - `core/` - the error and value model plus the schema registry
//! - `schema/` - typed column definitions, windows, selectors, TOML configs
//! - `io/` - the streaming tokenizer (circular buffer + retry reader) and
//!   the format-specific readers and writers
//!
//! ## Example: Reading delimited records
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use flatcodec::io::{DelimitedOptions, DelimitedReader, RecordReader};
//! use flatcodec::schema::{DelimitedSchema, Int32Column, StringColumn};
//! use std::sync::Arc;
//!
//! let mut schema = DelimitedSchema::new();
//! schema
//!     .add_column(Int32Column::new("id"))
//!     .add_column(StringColumn::new("name"));
//!
//! let data = "1,Bob\n2,Sue\n";
//! let mut reader = DelimitedReader::new(
//!     data.as_bytes(),
//!     Arc::new(schema),
//!     DelimitedOptions::default(),
//! )?;
//! while let Some(record) = reader.read_record()? {
//!     println!("id: {}", record[0]);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Writing fixed-length records
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use flatcodec::io::{FixedLengthOptions, FixedLengthWriter, RecordWriter};
//! use flatcodec::schema::{Alignment, FixedLengthSchema, Int32Column, StringColumn, Window};
//! use flatcodec::FieldValue;
//! use std::sync::Arc;
//!
//! let mut schema = FixedLengthSchema::new();
//! schema
//!     .add_column(Int32Column::new("id"), Window::new(6).with_alignment(Alignment::Right))
//!     .add_column(StringColumn::new("name"), 10);
//!
//! let mut out = Vec::new();
//! let mut writer =
//!     FixedLengthWriter::new(&mut out, Arc::new(schema), FixedLengthOptions::default())?;
//! writer.write_record(&[FieldValue::Int32(1), FieldValue::String("Bob".into())])?;
//! writer.finish()?;
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{
    record_to_map, DecodedRecord, FieldType, FieldValue, FlatError, Format, RegisteredSchema,
    Result, SchemaRegistry,
};

// Schema definitions and value conversion
pub mod schema;

// I/O: tokenizer, separators, detection, format readers/writers
pub mod io;

// Re-export key I/O types
pub use io::traits::{RecordReader, RecordStream, RecordWriter, Records};
pub use io::{
    DelimitedOptions, DelimitedReader, DelimitedWriter, FixedLengthOptions, FixedLengthReader,
    FixedLengthWriter, RecordSeparator,
};
