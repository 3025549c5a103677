// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema registry for name-based schema lookup.
//!
//! This module provides a registry pattern for schemas, allowing:
//! - Registration of delimited and fixed-length schemas under a name
//! - Thread-safe lookup from readers, writers, and the CLI
//! - Centralized schema management
//!
//! # Example
//!
//! ```
//! use flatcodec::core::{RegisteredSchema, SchemaRegistry};
//! use flatcodec::schema::{DelimitedSchema, StringColumn};
//! use std::sync::Arc;
//!
//! let registry = SchemaRegistry::new();
//! let mut schema = DelimitedSchema::new();
//! schema.add_column(StringColumn::new("name"));
//! registry.register("people", RegisteredSchema::Delimited(Arc::new(schema)));
//! assert!(registry.get("people").is_some());
//! ```

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::schema::{DelimitedSchema, FixedLengthSchema};

use super::Format;

/// A schema registered under a name, for either supported format.
#[derive(Clone)]
pub enum RegisteredSchema {
    /// A delimited schema
    Delimited(Arc<DelimitedSchema>),
    /// A fixed-length schema
    FixedLength(Arc<FixedLengthSchema>),
}

impl std::fmt::Debug for RegisteredSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredSchema")
            .field("format", &self.format())
            .field("columns", &self.column_names())
            .finish()
    }
}

impl RegisteredSchema {
    /// Get the format this schema describes.
    pub fn format(&self) -> Format {
        match self {
            RegisteredSchema::Delimited(_) => Format::Delimited,
            RegisteredSchema::FixedLength(_) => Format::FixedLength,
        }
    }

    /// Get the delimited schema, if this is one.
    pub fn as_delimited(&self) -> Option<&Arc<DelimitedSchema>> {
        match self {
            RegisteredSchema::Delimited(schema) => Some(schema),
            _ => None,
        }
    }

    /// Get the fixed-length schema, if this is one.
    pub fn as_fixed_length(&self) -> Option<&Arc<FixedLengthSchema>> {
        match self {
            RegisteredSchema::FixedLength(schema) => Some(schema),
            _ => None,
        }
    }

    /// Get the column names of the underlying schema.
    pub fn column_names(&self) -> Vec<String> {
        match self {
            RegisteredSchema::Delimited(schema) => schema.column_names(),
            RegisteredSchema::FixedLength(schema) => schema.column_names(),
        }
    }
}

/// Registry for named schemas.
///
/// This registry allows registration of schemas by name and provides a
/// centralized, thread-safe way to resolve them at runtime.
#[derive(Default)]
pub struct SchemaRegistry {
    // Use RwLock for thread-safe access
    schemas: RwLock<HashMap<String, RegisteredSchema>>,
}

impl SchemaRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema under a name.
    ///
    /// An existing schema with the same name is replaced.
    pub fn register(&self, name: impl Into<String>, schema: RegisteredSchema) {
        let mut schemas = self.schemas.write().unwrap();
        schemas.insert(name.into(), schema);
    }

    /// Unregister a schema.
    ///
    /// Returns `true` if a schema was unregistered, `false` if not found.
    pub fn unregister(&self, name: &str) -> bool {
        let mut schemas = self.schemas.write().unwrap();
        schemas.remove(name).is_some()
    }

    /// Check if a schema is registered.
    pub fn has_schema(&self, name: &str) -> bool {
        let schemas = self.schemas.read().unwrap();
        schemas.contains_key(name)
    }

    /// Get a schema by name.
    pub fn get(&self, name: &str) -> Option<RegisteredSchema> {
        let schemas = self.schemas.read().unwrap();
        schemas.get(name).cloned()
    }

    /// Get all registered schema names.
    pub fn registered_names(&self) -> Vec<String> {
        let schemas = self.schemas.read().unwrap();
        schemas.keys().cloned().collect()
    }

    /// Get the number of registered schemas.
    pub fn count(&self) -> usize {
        let schemas = self.schemas.read().unwrap();
        schemas.len()
    }
}
