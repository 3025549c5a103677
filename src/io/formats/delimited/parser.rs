// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Single-pass tokenizer for delimited records.
//!
//! The tokenizer walks a [`RetryReader`] character by character. Separators
//! (field and record, both possibly multi-character) are probed with
//! consume-on-full-match semantics, so a partial separator match falls
//! through and its first character is treated as data.
//!
//! Quoting follows the doubled-quote convention: a field starting with the
//! quote character runs to the next lone quote, `""` inside is a literal
//! quote, and separators or newlines inside quotes are data. After a closing
//! quote only whitespace, a separator, or end of input may follow.

use std::io::Read;

use crate::core::{FlatError, Result};
use crate::io::retry::RetryReader;
use crate::io::separator::SeparatorMatcher;

use super::DelimitedOptions;

/// How a token ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenEnd {
    /// A field separator follows
    Separator,
    /// A record separator was consumed
    EndOfRecord,
    /// The input is exhausted
    EndOfStream,
}

/// Streaming tokenizer producing one record of raw fields at a time.
pub struct DelimitedRecordParser<R: Read> {
    reader: RetryReader<R>,
    separator: SeparatorMatcher,
    separator_text: String,
    record_separator: SeparatorMatcher,
    quote: char,
    preserve_white_space: bool,
    raw: String,
}

impl<R: Read> DelimitedRecordParser<R> {
    /// Create a tokenizer over the given source.
    pub fn new(inner: R, options: &DelimitedOptions) -> Self {
        Self {
            reader: RetryReader::new(inner),
            separator: SeparatorMatcher::from_text(&options.separator),
            separator_text: options.separator.clone(),
            record_separator: SeparatorMatcher::from_record_separator(&options.record_separator),
            quote: options.quote,
            preserve_white_space: options.preserve_white_space,
            raw: String::new(),
        }
    }

    /// Whether all input has been consumed.
    pub fn eof(&mut self) -> Result<bool> {
        self.reader.eof()
    }

    /// The raw text of the most recent record, record separator excluded.
    pub fn raw_record(&self) -> &str {
        &self.raw
    }

    /// Read the raw fields of the next record.
    ///
    /// Returns `None` at end of input. The final record may or may not be
    /// terminated by a record separator.
    pub fn read_record(&mut self) -> Result<Option<Vec<String>>> {
        if self.eof()? {
            return Ok(None);
        }
        self.raw.clear();
        let mut values = Vec::new();
        loop {
            let (value, end) = self.read_token()?;
            values.push(value);
            if end != TokenEnd::Separator {
                break;
            }
        }
        Ok(Some(values))
    }

    fn read_token(&mut self) -> Result<(String, TokenEnd)> {
        if !self.preserve_white_space {
            // Leading whitespace is discarded, but a whitespace character
            // that opens a separator must win the probe first.
            loop {
                if let Some(end) = self.try_separators()? {
                    return Ok((String::new(), end));
                }
                if !self.reader.is_whitespace()? {
                    break;
                }
                self.raw.push(self.reader.current());
            }
        } else if let Some(end) = self.try_separators()? {
            return Ok((String::new(), end));
        }
        match self.reader.peek()? {
            Some(c) if c == self.quote => {
                self.reader.read()?;
                self.raw.push(self.quote);
                self.read_quoted_token()
            }
            _ => self.read_unquoted_token(),
        }
    }

    /// Probe the field separator, then the record separator.
    fn try_separators(&mut self) -> Result<Option<TokenEnd>> {
        if self.reader.eof()? {
            return Ok(Some(TokenEnd::EndOfStream));
        }
        if self.separator.is_match(&mut self.reader)? {
            self.raw.push_str(&self.separator_text);
            return Ok(Some(TokenEnd::Separator));
        }
        if self.record_separator.is_match(&mut self.reader)? {
            return Ok(Some(TokenEnd::EndOfRecord));
        }
        Ok(None)
    }

    fn read_unquoted_token(&mut self) -> Result<(String, TokenEnd)> {
        let mut value = String::new();
        loop {
            if let Some(end) = self.try_separators()? {
                let value = if self.preserve_white_space {
                    value
                } else {
                    value.trim_end().to_string()
                };
                return Ok((value, end));
            }
            if let Some(c) = self.reader.read()? {
                value.push(c);
                self.raw.push(c);
            }
        }
    }

    fn read_quoted_token(&mut self) -> Result<(String, TokenEnd)> {
        let mut value = String::new();
        loop {
            let Some(c) = self.reader.read()? else {
                return Err(FlatError::parse(
                    "DelimitedRecordParser",
                    "unmatched quote at end of input",
                ));
            };
            self.raw.push(c);
            if c != self.quote {
                value.push(c);
                continue;
            }
            // A doubled quote is a literal quote inside the field
            if self.reader.is_match(self.quote)? {
                value.push(self.quote);
                self.raw.push(self.quote);
                continue;
            }
            // Closing quote: only whitespace may precede the next separator
            loop {
                if let Some(end) = self.try_separators()? {
                    return Ok((value, end));
                }
                if !self.preserve_white_space && self.reader.is_whitespace()? {
                    self.raw.push(self.reader.current());
                    continue;
                }
                return Err(FlatError::parse(
                    "DelimitedRecordParser",
                    "text appears after a closing quote",
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::separator::RecordSeparator;
    use std::io::Cursor;

    fn parse_all(text: &str, options: &DelimitedOptions) -> Vec<Vec<String>> {
        let mut parser = DelimitedRecordParser::new(Cursor::new(text.as_bytes().to_vec()), options);
        let mut records = Vec::new();
        while let Some(record) = parser.read_record().unwrap() {
            records.push(record);
        }
        records
    }

    fn defaults() -> DelimitedOptions {
        DelimitedOptions::default()
    }

    #[test]
    fn test_single_record() {
        let records = parse_all("a,b,c", &defaults());
        assert_eq!(records, vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn test_multiple_records() {
        let records = parse_all("a,b\nc,d\n", &defaults());
        assert_eq!(records, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_trailing_newline_yields_no_extra_record() {
        let records = parse_all("a,b\n", &defaults());
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_newline_styles() {
        for text in ["a\nb", "a\rb", "a\r\nb"] {
            let records = parse_all(text, &defaults());
            assert_eq!(records, vec![vec!["a"], vec!["b"]], "failed for {text:?}");
        }
    }

    #[test]
    fn test_mixed_newline_styles() {
        let records = parse_all("first\r\nsecond\nthird\rfourth", &defaults());
        assert_eq!(
            records,
            vec![vec!["first"], vec!["second"], vec!["third"], vec!["fourth"]]
        );
    }

    #[test]
    fn test_empty_fields() {
        let records = parse_all(",b,", &defaults());
        assert_eq!(records, vec![vec!["", "b", ""]]);
    }

    #[test]
    fn test_lone_separator_yields_two_empty_fields() {
        let records = parse_all(",", &defaults());
        assert_eq!(records, vec![vec!["", ""]]);
    }

    #[test]
    fn test_whitespace_trimmed_by_default() {
        let records = parse_all("  a  ,  b  ", &defaults());
        assert_eq!(records, vec![vec!["a", "b"]]);
    }

    #[test]
    fn test_preserve_white_space() {
        let options = defaults().with_preserve_white_space(true);
        let records = parse_all(" a , b ", &options);
        assert_eq!(records, vec![vec![" a ", " b "]]);
    }

    #[test]
    fn test_quoted_field() {
        let records = parse_all("\"a,b\",c", &defaults());
        assert_eq!(records, vec![vec!["a,b", "c"]]);
    }

    #[test]
    fn test_doubled_quote_is_literal() {
        let records = parse_all("\"He said \"\"hi\"\"\",x", &defaults());
        assert_eq!(records, vec![vec!["He said \"hi\"", "x"]]);
    }

    #[test]
    fn test_newline_inside_quotes_is_data() {
        let records = parse_all("\"line one\nline two\",x", &defaults());
        assert_eq!(records, vec![vec!["line one\nline two", "x"]]);
    }

    #[test]
    fn test_quoted_preserves_inner_white_space() {
        let records = parse_all("\"  spaced  \"", &defaults());
        assert_eq!(records, vec![vec!["  spaced  "]]);
    }

    #[test]
    fn test_white_space_around_quotes_discarded() {
        let records = parse_all("  \"a\"  ,b", &defaults());
        assert_eq!(records, vec![vec!["a", "b"]]);
    }

    #[test]
    fn test_unmatched_quote_is_error() {
        let mut parser = DelimitedRecordParser::new(
            Cursor::new(b"\"unterminated".to_vec()),
            &defaults(),
        );
        assert!(parser.read_record().is_err());
    }

    #[test]
    fn test_text_after_closing_quote_is_error() {
        let mut parser =
            DelimitedRecordParser::new(Cursor::new(b"\"a\"junk,b".to_vec()), &defaults());
        assert!(parser.read_record().is_err());
    }

    #[test]
    fn test_custom_single_char_separator() {
        let options = defaults().with_separator(";");
        let records = parse_all("a;b;c", &options);
        assert_eq!(records, vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn test_multi_char_separator() {
        let options = defaults().with_separator("::");
        let records = parse_all("a::b::c", &options);
        assert_eq!(records, vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn test_partial_multi_char_separator_is_data() {
        let options = defaults().with_separator("::");
        let records = parse_all("a:b::c", &options);
        assert_eq!(records, vec![vec!["a:b", "c"]]);
    }

    #[test]
    fn test_tab_separator_not_eaten_by_trimming() {
        let options = defaults().with_separator("\t");
        let records = parse_all("a\t\tb", &options);
        assert_eq!(records, vec![vec!["a", "", "b"]]);
    }

    #[test]
    fn test_custom_record_separator() {
        let options = defaults().with_record_separator(RecordSeparator::literal("BOOM"));
        let records = parse_all("a,bBOOMc,d", &options);
        assert_eq!(records, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_raw_record_text() {
        let mut parser =
            DelimitedRecordParser::new(Cursor::new(b"a,\"b,c\"\nnext".to_vec()), &defaults());
        parser.read_record().unwrap();
        assert_eq!(parser.raw_record(), "a,\"b,c\"");
        parser.read_record().unwrap();
        assert_eq!(parser.raw_record(), "next");
    }

    #[test]
    fn test_quote_inside_unquoted_field_is_data() {
        let records = parse_all("it's,fine", &defaults());
        assert_eq!(records, vec![vec!["it's", "fine"]]);
    }

    #[test]
    fn test_creativyst_example() {
        // Classic CSV torture sample: quoted commas, doubled quotes, spaces
        let text = "John,Doe,120 jefferson st.,Riverside, NJ, 08075\n\
                    Jack,McGinnis,220 hobo Av.,Phila, PA,09119\n\
                    \"John \"\"Da Man\"\"\",Repici,120 Jefferson St.,Riverside, NJ,08075\n";
        let records = parse_all(text, &defaults());
        assert_eq!(records.len(), 3);
        assert_eq!(records[0][3], "Riverside");
        assert_eq!(records[0][4], "NJ");
        assert_eq!(records[2][0], "John \"Da Man\"");
    }
}
