// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI command implementations.

pub mod convert;
pub mod inspect;
pub mod schema;

pub use convert::ConvertCmd;
pub use inspect::InspectCmd;
pub use schema::SchemaCmd;
