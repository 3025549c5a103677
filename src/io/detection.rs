// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Format detection using content sniffing and file analysis.
//!
//! This module provides format detection that goes beyond simple file
//! extension checking. A sample of the file is scored for candidate field
//! separators by per-line count consistency; files whose lines carry no
//! separator but share one width are reported as fixed-length.
//!
//! The library readers never guess: detection exists for the CLI and other
//! callers that want a starting point for unknown files.
//!
//! # Example
//!
//! ```no_run
//! use flatcodec::io::detection::{detect_format, DetectedFormat};
//!
//! let format = detect_format("data.csv")?;
//! match format {
//!     DetectedFormat::Delimited { separator } => println!("separator: {separator:?}"),
//!     DetectedFormat::FixedLength { width } => println!("width: {width}"),
//!     DetectedFormat::Unknown => println!("unknown format"),
//! }
//! # Ok::<(), flatcodec::FlatError>(())
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::warn;

use crate::core::Result;

/// Candidate separators scored by the sniffer, in priority order.
const CANDIDATES: &[char] = &[',', '\t', ';', '|'];

/// How many bytes of the file the sniffer samples.
const SAMPLE_SIZE: usize = 4096;

/// The outcome of format detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectedFormat {
    /// Delimited records with the sniffed separator
    Delimited {
        /// The winning field separator
        separator: String,
    },
    /// Fixed-length records of one shared width
    FixedLength {
        /// The shared record width in characters
        width: usize,
    },
    /// Nothing conclusive
    Unknown,
}

/// Try to detect the flat file format from the file content.
///
/// Reads a sample of the file and sniffs it, falling back to the file
/// extension (`.csv` and `.tsv`) when the content is inconclusive.
pub fn detect_format<P: AsRef<Path>>(path: P) -> Result<DetectedFormat> {
    let path_ref = path.as_ref();

    let mut file = File::open(path_ref)?;
    let mut sample = vec![0u8; SAMPLE_SIZE];
    let read = file.read(&mut sample)?;
    sample.truncate(read);
    let text = String::from_utf8_lossy(&sample);

    match sniff(&text) {
        DetectedFormat::Unknown => {}
        format => return Ok(format),
    }

    // Fall back to extension detection
    let extension = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());
    Ok(match extension.as_deref() {
        Some("csv") => DetectedFormat::Delimited {
            separator: ",".to_string(),
        },
        Some("tsv") => DetectedFormat::Delimited {
            separator: "\t".to_string(),
        },
        _ => DetectedFormat::Unknown,
    })
}

/// Sniff a text sample for its format.
///
/// A separator candidate wins when it appears the same number of times (at
/// least once) on every sampled line. Lines of one shared width with no
/// winning separator are reported as fixed-length.
pub fn sniff(sample: &str) -> DetectedFormat {
    // The last line may be cut mid-record by the sample window
    let mut lines: Vec<&str> = sample.lines().filter(|line| !line.is_empty()).collect();
    if lines.len() > 1 && !sample.ends_with('\n') && !sample.ends_with('\r') {
        lines.pop();
    }
    if lines.is_empty() {
        return DetectedFormat::Unknown;
    }

    let mut winners: Vec<(char, usize)> = Vec::new();
    for &candidate in CANDIDATES {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| line.matches(candidate).count())
            .collect();
        let first = counts[0];
        if first > 0 && counts.iter().all(|&count| count == first) {
            winners.push((candidate, first));
        }
    }
    if winners.len() > 1 {
        warn!(
            candidates = ?winners.iter().map(|(c, _)| *c).collect::<Vec<_>>(),
            "ambiguous separator sniff, using the highest-priority candidate"
        );
    }
    if let Some((separator, _)) = winners.first() {
        return DetectedFormat::Delimited {
            separator: separator.to_string(),
        };
    }

    let width = lines[0].chars().count();
    if width > 0
        && lines.len() > 1
        && lines.iter().all(|line| line.chars().count() == width)
    {
        return DetectedFormat::FixedLength { width };
    }
    DetectedFormat::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_sniff_comma() {
        let format = sniff("a,b,c\nd,e,f\n");
        assert_eq!(
            format,
            DetectedFormat::Delimited {
                separator: ",".to_string()
            }
        );
    }

    #[test]
    fn test_sniff_tab() {
        let format = sniff("a\tb\nc\td\n");
        assert_eq!(
            format,
            DetectedFormat::Delimited {
                separator: "\t".to_string()
            }
        );
    }

    #[test]
    fn test_sniff_semicolon() {
        let format = sniff("a;b;c\nd;e;f\n");
        assert_eq!(
            format,
            DetectedFormat::Delimited {
                separator: ";".to_string()
            }
        );
    }

    #[test]
    fn test_sniff_inconsistent_counts_rejected() {
        // Commas per line differ, pipes are consistent
        let format = sniff("a,b|c\nd|e\n");
        assert_eq!(
            format,
            DetectedFormat::Delimited {
                separator: "|".to_string()
            }
        );
    }

    #[test]
    fn test_sniff_fixed_length() {
        let format = sniff("ABCDE12345\nFGHIJ67890\n");
        assert_eq!(format, DetectedFormat::FixedLength { width: 10 });
    }

    #[test]
    fn test_sniff_unknown() {
        assert_eq!(sniff(""), DetectedFormat::Unknown);
        assert_eq!(sniff("just one line of prose"), DetectedFormat::Unknown);
    }

    #[test]
    fn test_sniff_ignores_truncated_last_line() {
        // No trailing newline: the final line is likely cut by the sample
        let format = sniff("a,b,c\nd,e,f\ng,h");
        assert_eq!(
            format,
            DetectedFormat::Delimited {
                separator: ",".to_string()
            }
        );
    }

    #[test]
    fn test_detect_format_from_content() {
        let dir = std::env::temp_dir().join(format!("flatcodec_detect_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sample.dat");
        {
            let mut file = File::create(&path).unwrap();
            file.write_all(b"a;b;c\nd;e;f\n").unwrap();
        }
        let format = detect_format(&path).unwrap();
        assert_eq!(
            format,
            DetectedFormat::Delimited {
                separator: ";".to_string()
            }
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_detect_format_extension_fallback() {
        let dir = std::env::temp_dir().join(format!("flatcodec_detect_ext_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("empty.csv");
        File::create(&path).unwrap();
        let format = detect_format(&path).unwrap();
        assert_eq!(
            format,
            DetectedFormat::Delimited {
                separator: ",".to_string()
            }
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_detect_format_missing_file() {
        assert!(detect_format("/nonexistent/file.csv").is_err());
    }
}
