// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema definitions for flat file records.
//!
//! A schema is an ordered list of typed column definitions. Delimited
//! schemas pair columns with field positions; fixed-length schemas pair
//! columns with [`Window`]s. Schemas drive both directions of the value
//! conversion pipeline: raw text to [`FieldValue`](crate::core::FieldValue)
//! on read, and back on write.
//!
//! - [`column`] - the [`ColumnDefinition`] trait and shared column behavior
//! - [`columns`] - concrete columns, one per field type
//! - [`window`] - fixed-length window geometry
//! - [`selector`] - per-record schema selection for multi-schema files
//! - [`config`] - TOML schema definitions

pub mod column;
pub mod columns;
pub mod config;
pub mod delimited;
pub mod fixed;
pub mod selector;
pub mod window;

pub use column::{ColumnContext, ColumnDefinition, ColumnOptions, NullFormatter, Preprocessor};
pub use columns::{
    BoolColumn, DateColumn, DateTimeColumn, Float32Column, Float64Column, GuidColumn,
    IgnoredColumn, Int16Column, Int32Column, Int64Column, Int8Column, StringColumn, UInt16Column,
    UInt32Column, UInt64Column, UInt8Column,
};
pub use config::{ColumnConfig, ConfigError, SchemaConfig, SchemaMeta};
pub use delimited::DelimitedSchema;
pub use fixed::FixedLengthSchema;
pub use selector::{
    DelimitedSchemaInjector, DelimitedSchemaSelector, FixedLengthSchemaInjector,
    FixedLengthSchemaSelector, SchemaChooser, SchemaWhenBuilder,
};
pub use window::{Alignment, OverflowPolicy, Window};
