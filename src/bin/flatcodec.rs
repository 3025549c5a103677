// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Flatcodec CLI
//!
//! Unified command-line tool for flat file operations.
//!
//! ## Usage
//!
//! ```sh
//! # Show file information
//! flatcodec inspect info data.csv
//!
//! # Preview records as JSON lines
//! flatcodec inspect head data.csv -n 5 --schema people.toml
//!
//! # Convert between renditions
//! flatcodec convert data.csv data.txt --schema people.toml --out-schema people_fixed.toml
//!
//! # Schema operations
//! flatcodec schema validate people.toml
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{ConvertCmd, InspectCmd, SchemaCmd};
use common::Result;

/// Flatcodec - flat file toolkit
///
/// Work with delimited and fixed-length files through a unified interface.
/// Content sniffing means you rarely need to specify separators by hand.
#[derive(Parser, Clone)]
#[command(name = "flatcodec")]
#[command(about = "Flat file toolkit for delimited and fixed-length files", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Inspect file contents (info, head)
    #[command(subcommand)]
    Inspect(InspectCmd),

    /// Convert between delimited and fixed-length renditions
    Convert(ConvertCmd),

    /// Schema operations (show, validate)
    #[command(subcommand)]
    Schema(SchemaCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect(cmd) => cmd.run(),
        Commands::Convert(cmd) => cmd.run(),
        Commands::Schema(cmd) => cmd.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
