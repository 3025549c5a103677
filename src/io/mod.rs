// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Streaming record I/O.
//!
//! This module holds the pieces shared by both formats and the formats
//! themselves:
//!
//! - [`buffer`] - the fixed-capacity circular buffer behind the tokenizer
//! - [`retry`] - the streaming character reader with peek/retry probes
//! - [`separator`] - record and field separator matching
//! - [`traits`] - the [`RecordReader`]/[`RecordWriter`] abstractions
//! - [`detection`] - content sniffing for unknown files
//! - [`formats`] - the delimited and fixed-length readers and writers

pub mod buffer;
pub mod detection;
pub mod formats;
pub mod retry;
pub mod separator;
pub mod traits;

pub use buffer::CircularBuffer;
pub use detection::{detect_format, DetectedFormat};
pub use retry::RetryReader;
pub use separator::{RecordSeparator, SeparatorMatcher};
pub use traits::{RecordReader, RecordStream, RecordWriter, Records};

pub use formats::delimited::{
    DelimitedOptions, DelimitedReader, DelimitedRecordParser, DelimitedWriter,
};
pub use formats::fixed::{FixedLengthOptions, FixedLengthReader, FixedLengthWriter};
