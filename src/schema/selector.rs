// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Per-record schema selection.
//!
//! Files that interleave several record shapes (e.g. header/detail/footer
//! layouts) need the schema chosen record by record. A chooser holds an
//! ordered list of predicate -> schema matchers plus an optional default;
//! the first matching predicate wins, and a record matching nothing is an
//! error.
//!
//! Four concrete forms cover both formats and both directions:
//! - [`DelimitedSchemaSelector`] - read side, predicates over raw fields
//! - [`DelimitedSchemaInjector`] - write side, predicates over values
//! - [`FixedLengthSchemaSelector`] - read side, predicates over record text
//! - [`FixedLengthSchemaInjector`] - write side, predicates over values
//!
//! # Example
//!
//! ```
//! use flatcodec::schema::{DelimitedSchemaSelector, DelimitedSchema, Int32Column, StringColumn};
//! use std::sync::Arc;
//!
//! let mut detail = DelimitedSchema::new();
//! detail.add_column(Int32Column::new("id")).add_column(StringColumn::new("name"));
//!
//! let mut selector = DelimitedSchemaSelector::new();
//! selector
//!     .when(|fields| fields.len() == 2)
//!     .using(Arc::new(detail));
//! ```

use std::sync::Arc;

use crate::core::{FieldValue, FlatError, Result};

use super::delimited::DelimitedSchema;
use super::fixed::FixedLengthSchema;

struct SchemaMatcher<S, I: ?Sized> {
    schema: Arc<S>,
    predicate: Box<dyn Fn(&I) -> bool + Send + Sync>,
}

/// Ordered predicate -> schema matchers with an optional default.
pub struct SchemaChooser<S, I: ?Sized> {
    matchers: Vec<SchemaMatcher<S, I>>,
    default_schema: Option<Arc<S>>,
}

impl<S, I: ?Sized> SchemaChooser<S, I> {
    /// Create an empty chooser.
    pub fn new() -> Self {
        Self {
            matchers: Vec::new(),
            default_schema: None,
        }
    }

    /// Begin registering a schema used when the predicate returns true.
    ///
    /// Earlier registrations win over later ones.
    pub fn when<F>(&mut self, predicate: F) -> SchemaWhenBuilder<'_, S, I>
    where
        F: Fn(&I) -> bool + Send + Sync + 'static,
    {
        SchemaWhenBuilder {
            chooser: self,
            predicate: Box::new(predicate),
        }
    }

    /// Set the schema used when no other matcher applies.
    pub fn with_default(&mut self, schema: Arc<S>) -> &mut Self {
        self.default_schema = Some(schema);
        self
    }

    /// The number of registered matchers, default excluded.
    pub fn matcher_count(&self) -> usize {
        self.matchers.len()
    }

    /// Resolve the schema for one record.
    pub fn resolve(&self, input: &I, record_number: u64) -> Result<Arc<S>> {
        for matcher in &self.matchers {
            if (matcher.predicate)(input) {
                return Ok(matcher.schema.clone());
            }
        }
        if let Some(default) = &self.default_schema {
            return Ok(default.clone());
        }
        Err(FlatError::record(record_number, "no schema matched the record"))
    }
}

impl<S, I: ?Sized> Default for SchemaChooser<S, I> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder returned by [`SchemaChooser::when`]; call [`using`](Self::using)
/// to finish the registration.
pub struct SchemaWhenBuilder<'a, S, I: ?Sized> {
    chooser: &'a mut SchemaChooser<S, I>,
    predicate: Box<dyn Fn(&I) -> bool + Send + Sync>,
}

impl<'a, S, I: ?Sized> SchemaWhenBuilder<'a, S, I> {
    /// Use the given schema when the predicate matches.
    pub fn using(self, schema: Arc<S>) {
        self.chooser.matchers.push(SchemaMatcher {
            schema,
            predicate: self.predicate,
        });
    }
}

/// Read-side schema selection for delimited files, keyed on raw fields.
pub type DelimitedSchemaSelector = SchemaChooser<DelimitedSchema, [String]>;

/// Write-side schema selection for delimited files, keyed on values.
pub type DelimitedSchemaInjector = SchemaChooser<DelimitedSchema, [FieldValue]>;

/// Read-side schema selection for fixed-length files, keyed on record text.
pub type FixedLengthSchemaSelector = SchemaChooser<FixedLengthSchema, str>;

/// Write-side schema selection for fixed-length files, keyed on values.
pub type FixedLengthSchemaInjector = SchemaChooser<FixedLengthSchema, [FieldValue]>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::columns::{Int32Column, StringColumn};

    fn narrow_schema() -> Arc<DelimitedSchema> {
        let mut schema = DelimitedSchema::new().with_name("narrow");
        schema.add_column(Int32Column::new("id"));
        Arc::new(schema)
    }

    fn wide_schema() -> Arc<DelimitedSchema> {
        let mut schema = DelimitedSchema::new().with_name("wide");
        schema
            .add_column(Int32Column::new("id"))
            .add_column(StringColumn::new("name"));
        Arc::new(schema)
    }

    fn fields(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_first_match_wins() {
        let mut selector = DelimitedSchemaSelector::new();
        selector.when(|fields| fields.len() == 1).using(narrow_schema());
        selector.when(|fields| fields.len() == 2).using(wide_schema());

        let schema = selector.resolve(&fields(&["1"]), 0).unwrap();
        assert_eq!(schema.name(), "narrow");
        let schema = selector.resolve(&fields(&["1", "Bob"]), 0).unwrap();
        assert_eq!(schema.name(), "wide");
    }

    #[test]
    fn test_registration_order_wins() {
        let mut selector = DelimitedSchemaSelector::new();
        selector.when(|_| true).using(narrow_schema());
        selector.when(|_| true).using(wide_schema());

        let schema = selector.resolve(&fields(&["anything"]), 0).unwrap();
        assert_eq!(schema.name(), "narrow");
    }

    #[test]
    fn test_default_schema() {
        let mut selector = DelimitedSchemaSelector::new();
        selector.when(|fields| fields.len() == 1).using(narrow_schema());
        selector.with_default(wide_schema());

        let schema = selector.resolve(&fields(&["1", "2", "3"]), 0).unwrap();
        assert_eq!(schema.name(), "wide");
    }

    #[test]
    fn test_no_match_is_error() {
        let mut selector = DelimitedSchemaSelector::new();
        selector.when(|fields| fields.len() == 1).using(narrow_schema());

        let err = selector.resolve(&fields(&["1", "2"]), 7).unwrap_err();
        assert!(matches!(err, FlatError::RecordError { .. }));
        assert!(err.to_string().contains("Record 7"));
    }

    #[test]
    fn test_fixed_length_selector_on_record_text() {
        let mut schema = FixedLengthSchema::new();
        schema.add_column(Int32Column::new("id"), 10);
        let schema = Arc::new(schema);

        let mut selector = FixedLengthSchemaSelector::new();
        selector.when(|record: &str| record.len() == 10).using(schema);

        assert!(selector.resolve("1234567890", 0).is_ok());
        assert!(selector.resolve("123", 0).is_err());
    }

    #[test]
    fn test_injector_on_values() {
        let mut injector = DelimitedSchemaInjector::new();
        injector
            .when(|values: &[FieldValue]| values.len() == 1)
            .using(narrow_schema());

        assert!(injector.resolve(&[FieldValue::Int32(1)], 0).is_ok());
        assert!(injector
            .resolve(&[FieldValue::Int32(1), FieldValue::Null], 0)
            .is_err());
    }

    #[test]
    fn test_matcher_count() {
        let mut selector = DelimitedSchemaSelector::new();
        assert_eq!(selector.matcher_count(), 0);
        selector.when(|_| true).using(narrow_schema());
        assert_eq!(selector.matcher_count(), 1);
    }
}
