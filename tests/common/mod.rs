// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use flatcodec::schema::{
    DateColumn, DelimitedSchema, FixedLengthSchema, Int32Column, StringColumn, Window,
};

// ============================================================================
// Temp Files
// ============================================================================

/// Get a unique temporary directory for test files
fn temp_dir() -> PathBuf {
    let random = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let thread_id = format!("{:?}", std::thread::current().id());
    std::env::temp_dir().join(format!(
        "flatcodec_test_{}_{}_{}",
        std::process::id(),
        thread_id,
        random
    ))
}

/// Create a temporary file path with cleanup guard
pub fn temp_path(ext: &str) -> (PathBuf, CleanupGuard) {
    let dir = temp_dir();
    fs::create_dir_all(&dir).ok();
    let path = dir.join(format!("test_{}.{}", std::process::id(), ext));
    let guard = CleanupGuard(dir);
    (path, guard)
}

/// Cleanup guard for test temporary files
#[derive(Debug)]
pub struct CleanupGuard(PathBuf);

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

// ============================================================================
// Shared Schemas
// ============================================================================

/// `id,name,created` delimited schema with US-style dates accepted
pub fn people_delimited_schema() -> Arc<DelimitedSchema> {
    let mut schema = DelimitedSchema::new().with_name("people");
    schema
        .add_column(Int32Column::new("id"))
        .add_column(StringColumn::new("name"))
        .add_column(DateColumn::new("created").with_input_formats(["%m/%d/%Y", "%Y-%m-%d"]));
    Arc::new(schema)
}

/// `id,name,created` fixed-length schema: windows 10/25/10
pub fn people_fixed_schema() -> Arc<FixedLengthSchema> {
    let mut schema = FixedLengthSchema::new().with_name("people");
    schema
        .add_column(Int32Column::new("id"), Window::new(10))
        .add_column(StringColumn::new("name"), Window::new(25))
        .add_column(
            DateColumn::new("created").with_input_formats(["%m/%d/%Y", "%Y-%m-%d"]),
            Window::new(10),
        );
    Arc::new(schema)
}
