// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Inspect command - report file information and preview records.

use std::fs::File;
use std::path::PathBuf;

use clap::Subcommand;
use regex::Regex;

use crate::common::{format_size, load_schema, Result};
use flatcodec::core::RegisteredSchema;
use flatcodec::io::detection::{detect_format, DetectedFormat};
use flatcodec::io::{
    DelimitedOptions, DelimitedReader, FixedLengthOptions, FixedLengthReader, RecordReader,
};
use flatcodec::record_to_map;

/// Inspect file contents (info, head).
#[derive(Subcommand, Clone, Debug)]
pub enum InspectCmd {
    /// Show file information (format, size, record count)
    Info {
        /// Input file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the first records as JSON lines
    Head {
        /// Input file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Number of records to print
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,

        /// Schema configuration file (TOML)
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Only print records with a field matching this pattern
        #[arg(short, long)]
        filter: Option<String>,
    },
}

impl InspectCmd {
    pub fn run(self) -> Result<()> {
        match self {
            InspectCmd::Info { file } => cmd_info(file),
            InspectCmd::Head {
                file,
                count,
                schema,
                filter,
            } => cmd_head(file, count, schema, filter),
        }
    }
}

/// Show file information.
fn cmd_info(file: PathBuf) -> Result<()> {
    let size = std::fs::metadata(&file)?.len();
    let format = detect_format(&file)?;

    println!("File:   {}", file.display());
    println!("Size:   {}", format_size(size));
    match &format {
        DetectedFormat::Delimited { separator } => {
            println!("Format: delimited (separator {separator:?})");
            let options = DelimitedOptions::default().with_separator(separator.clone());
            let mut reader = DelimitedReader::without_schema(File::open(&file)?, options)?;
            let mut records = 0u64;
            let mut fields = 0usize;
            while let Some(record) = reader.read_record()? {
                fields = fields.max(record.len());
                records += 1;
            }
            println!("Records: {records}");
            println!("Fields:  up to {fields} per record");
        }
        DetectedFormat::FixedLength { width } => {
            println!("Format: fixed-length (width {width})");
            let records = std::fs::read_to_string(&file)?
                .lines()
                .filter(|line| !line.is_empty())
                .count();
            println!("Records: {records}");
        }
        DetectedFormat::Unknown => {
            println!("Format: unknown");
        }
    }
    Ok(())
}

/// Print the first records as JSON lines.
fn cmd_head(
    file: PathBuf,
    count: usize,
    schema: Option<PathBuf>,
    filter: Option<String>,
) -> Result<()> {
    let filter = filter.map(|pattern| Regex::new(&pattern)).transpose()?;
    let keep = move |fields: &[String]| -> bool {
        match &filter {
            // The reader filter skips on true
            Some(regex) => !fields.iter().any(|field| regex.is_match(field)),
            None => false,
        }
    };

    match schema {
        Some(path) => match load_schema(&path)? {
            RegisteredSchema::Delimited(schema) => {
                let names = schema.value_names();
                let mut reader = DelimitedReader::new(
                    File::open(&file)?,
                    schema,
                    DelimitedOptions::default(),
                )?
                .with_record_filter(keep);
                print_records(&mut reader, &names, count)
            }
            RegisteredSchema::FixedLength(schema) => {
                let names = schema.value_names();
                let mut reader = FixedLengthReader::new(
                    File::open(&file)?,
                    schema,
                    FixedLengthOptions::default(),
                )?
                .with_partitioned_filter(keep);
                print_records(&mut reader, &names, count)
            }
        },
        None => {
            let separator = match detect_format(&file)? {
                DetectedFormat::Delimited { separator } => separator,
                _ => ",".to_string(),
            };
            let options = DelimitedOptions::default().with_separator(separator);
            let mut reader = DelimitedReader::without_schema(File::open(&file)?, options)?
                .with_record_filter(keep);
            for _ in 0..count {
                let Some(record) = reader.read_record()? else {
                    break;
                };
                println!("{}", serde_json::to_string(&record)?);
            }
            Ok(())
        }
    }
}

fn print_records<R: RecordReader>(reader: &mut R, names: &[String], count: usize) -> Result<()> {
    let names: Vec<String> = names.to_vec();
    for _ in 0..count {
        let Some(record) = reader.read_record()? else {
            break;
        };
        let map = record_to_map(&names, &record);
        println!("{}", serde_json::to_string(&map)?);
    }
    Ok(())
}
