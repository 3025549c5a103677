// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Convert command - stream records between flat file renditions.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Args;

use crate::common::{load_schema, ProgressBar, Result};
use flatcodec::core::RegisteredSchema;
use flatcodec::io::{
    DelimitedOptions, DelimitedReader, DelimitedWriter, FixedLengthOptions, FixedLengthReader,
    FixedLengthWriter, RecordReader, RecordWriter,
};

/// Convert between delimited and fixed-length renditions of the same data.
#[derive(Args, Clone, Debug)]
pub struct ConvertCmd {
    /// Input file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Schema configuration for the input (TOML)
    #[arg(short, long)]
    schema: PathBuf,

    /// Schema configuration for the output; defaults to the input schema
    #[arg(long)]
    out_schema: Option<PathBuf>,

    /// Skip a header record in the input
    #[arg(long)]
    skip_header: bool,

    /// Write a header record to the output
    #[arg(long)]
    write_header: bool,
}

impl ConvertCmd {
    pub fn run(self) -> Result<()> {
        println!("Converting:");
        println!("  Input:  {}", self.input.display());
        println!("  Output: {}", self.output.display());

        let in_schema = load_schema(&self.schema)?;
        let out_schema = match &self.out_schema {
            Some(path) => load_schema(path)?,
            None => in_schema.clone(),
        };

        let mut reader = open_reader(&self.input, in_schema, self.skip_header)?;
        let mut writer = open_writer(&self.output, out_schema, self.write_header)?;

        let progress = ProgressBar::spinner("records");
        let mut converted = 0u64;
        while let Some(record) = reader.read_record()? {
            writer.write_record(&record)?;
            converted += 1;
            progress.inc(1);
        }
        writer.finish()?;
        progress.finish_with_message("done".to_string());

        println!("  Records converted: {converted}");
        Ok(())
    }
}

fn open_reader(
    path: &PathBuf,
    schema: RegisteredSchema,
    skip_header: bool,
) -> Result<Box<dyn RecordReader>> {
    let file = File::open(path)?;
    Ok(match schema {
        RegisteredSchema::Delimited(schema) => {
            let options = DelimitedOptions::default().with_first_record_schema(skip_header);
            Box::new(DelimitedReader::new(file, schema, options)?)
        }
        RegisteredSchema::FixedLength(schema) => {
            let options = FixedLengthOptions::default().with_first_record_header(skip_header);
            Box::new(FixedLengthReader::new(file, schema, options)?)
        }
    })
}

fn open_writer(
    path: &PathBuf,
    schema: RegisteredSchema,
    write_header: bool,
) -> Result<Box<dyn RecordWriter>> {
    let file = BufWriter::new(File::create(path)?);
    Ok(match schema {
        RegisteredSchema::Delimited(schema) => {
            let options = DelimitedOptions::default().with_first_record_schema(write_header);
            Box::new(DelimitedWriter::new(file, schema, options)?)
        }
        RegisteredSchema::FixedLength(schema) => {
            let options = FixedLengthOptions::default().with_first_record_header(write_header);
            Box::new(FixedLengthWriter::new(file, schema, options)?)
        }
    })
}
