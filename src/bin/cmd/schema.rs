// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema command - show and validate schema configuration files.

use std::path::PathBuf;

use clap::Subcommand;

use crate::common::Result;
use flatcodec::core::RegisteredSchema;
use flatcodec::schema::SchemaConfig;

/// Schema operations (show, validate).
#[derive(Subcommand, Clone, Debug)]
pub enum SchemaCmd {
    /// Show the columns a schema configuration declares
    Show {
        /// Schema configuration file (TOML)
        #[arg(value_name = "CONFIG")]
        config: PathBuf,
    },

    /// Validate a schema configuration file
    Validate {
        /// Schema configuration file (TOML)
        #[arg(value_name = "CONFIG")]
        config: PathBuf,
    },
}

impl SchemaCmd {
    pub fn run(self) -> Result<()> {
        match self {
            SchemaCmd::Show { config } => cmd_show(config),
            SchemaCmd::Validate { config } => cmd_validate(config),
        }
    }
}

/// Show the columns a schema declares.
fn cmd_show(config: PathBuf) -> Result<()> {
    let config = SchemaConfig::from_path(&config)?;
    println!("Schema: {} ({})", config.schema.name, config.schema.format);
    for column in &config.columns {
        let mut details = vec![column.column_type.clone()];
        if let Some(width) = column.width {
            details.push(format!("width {width}"));
        }
        if column.trailing {
            details.push("trailing".to_string());
        }
        if let Some(alignment) = &column.alignment {
            details.push(alignment.clone());
        }
        if let Some(null) = &column.null {
            details.push(format!("null {null:?}"));
        }
        println!("  {:20} {}", column.name, details.join(", "));
    }
    Ok(())
}

/// Validate a schema configuration file.
fn cmd_validate(config: PathBuf) -> Result<()> {
    let parsed = SchemaConfig::from_path(&config)?;
    let built = parsed.build()?;
    let columns = match &built {
        RegisteredSchema::Delimited(schema) => schema.column_count(),
        RegisteredSchema::FixedLength(schema) => schema.column_count(),
    };
    println!(
        "OK: '{}' is a valid {} schema with {} columns",
        parsed.schema.name,
        built.format().as_str(),
        columns
    );
    Ok(())
}
