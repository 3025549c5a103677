// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Record and field separator matching.
//!
//! Matchers probe a [`RetryReader`] and consume the separator only on a full
//! match, so a partial match leaves every character in place for the
//! tokenizer to treat as data. The default record separator recognizes all
//! three newline conventions, `\r\n` greedily before `\r`.

use std::io::Read;

use crate::core::Result;

use super::retry::RetryReader;

/// Record separator configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSeparator {
    /// Recognize `\r\n`, `\n`, or `\r`, in any mix; write `\n`
    Auto,
    /// An explicit separator string
    Literal(String),
}

impl RecordSeparator {
    /// An explicit separator string.
    pub fn literal(separator: impl Into<String>) -> Self {
        RecordSeparator::Literal(separator.into())
    }

    /// The text written between records.
    pub fn write_text(&self) -> &str {
        match self {
            RecordSeparator::Auto => "\n",
            RecordSeparator::Literal(text) => text,
        }
    }

    /// Whether the separator contains the given character.
    ///
    /// Used by writers to decide when a value needs quoting.
    pub fn contains_char(&self, c: char) -> bool {
        match self {
            RecordSeparator::Auto => c == '\r' || c == '\n',
            RecordSeparator::Literal(text) => text.contains(c),
        }
    }
}

impl Default for RecordSeparator {
    fn default() -> Self {
        RecordSeparator::Auto
    }
}

/// A compiled separator matcher over a [`RetryReader`].
#[derive(Debug, Clone)]
pub enum SeparatorMatcher {
    /// `\r\n`, `\n`, or `\r`
    Default,
    /// A single character
    One(char),
    /// Exactly two characters
    Two(char, char),
    /// Three or more characters
    Seq(Vec<char>),
}

impl SeparatorMatcher {
    /// Compile a matcher for a record separator.
    pub fn from_record_separator(separator: &RecordSeparator) -> Self {
        match separator {
            RecordSeparator::Auto => SeparatorMatcher::Default,
            RecordSeparator::Literal(text) => Self::from_text(text),
        }
    }

    /// Compile a matcher for a literal separator string.
    pub fn from_text(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        match chars.as_slice() {
            [first] => SeparatorMatcher::One(*first),
            [first, second] => SeparatorMatcher::Two(*first, *second),
            _ => SeparatorMatcher::Seq(chars),
        }
    }

    /// The maximum number of characters this matcher consumes.
    pub fn size(&self) -> usize {
        match self {
            SeparatorMatcher::Default => 2,
            SeparatorMatcher::One(_) => 1,
            SeparatorMatcher::Two(..) => 2,
            SeparatorMatcher::Seq(chars) => chars.len(),
        }
    }

    /// Probe the reader, consuming the separator only on a full match.
    pub fn is_match<R: Read>(&self, reader: &mut RetryReader<R>) -> Result<bool> {
        match self {
            SeparatorMatcher::Default => {
                if reader.is_match2('\r', '\n')? {
                    return Ok(true);
                }
                if reader.is_match('\n')? {
                    return Ok(true);
                }
                reader.is_match('\r')
            }
            SeparatorMatcher::One(first) => reader.is_match(*first),
            SeparatorMatcher::Two(first, second) => reader.is_match2(*first, *second),
            SeparatorMatcher::Seq(chars) => reader.is_match_seq(chars),
        }
    }

    /// Strip one matched separator off the end of a raw record.
    pub fn trim<'a>(&self, value: &'a str) -> &'a str {
        match self {
            SeparatorMatcher::Default => {
                if let Some(stripped) = value.strip_suffix("\r\n") {
                    return stripped;
                }
                if let Some(stripped) = value.strip_suffix('\n') {
                    return stripped;
                }
                value.strip_suffix('\r').unwrap_or(value)
            }
            SeparatorMatcher::One(first) => value.strip_suffix(*first).unwrap_or(value),
            SeparatorMatcher::Two(first, second) => {
                let mut chars = value.chars().rev();
                if chars.next() == Some(*second) && chars.next() == Some(*first) {
                    let end = value.len() - first.len_utf8() - second.len_utf8();
                    &value[..end]
                } else {
                    value
                }
            }
            SeparatorMatcher::Seq(chars) => {
                let suffix: String = chars.iter().collect();
                value.strip_suffix(suffix.as_str()).unwrap_or(value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(text: &str) -> RetryReader<Cursor<Vec<u8>>> {
        RetryReader::new(Cursor::new(text.as_bytes().to_vec()))
    }

    #[test]
    fn test_default_matches_all_newline_styles() {
        let matcher = SeparatorMatcher::Default;
        for text in ["\r\nx", "\nx", "\rx"] {
            let mut r = reader(text);
            assert!(matcher.is_match(&mut r).unwrap(), "failed for {text:?}");
            assert_eq!(r.read().unwrap(), Some('x'));
        }
    }

    #[test]
    fn test_default_crlf_is_greedy() {
        let matcher = SeparatorMatcher::Default;
        let mut r = reader("\r\nx");
        assert!(matcher.is_match(&mut r).unwrap());
        // Both characters consumed in one match
        assert_eq!(r.read().unwrap(), Some('x'));
    }

    #[test]
    fn test_default_no_match() {
        let matcher = SeparatorMatcher::Default;
        let mut r = reader("abc");
        assert!(!matcher.is_match(&mut r).unwrap());
        assert_eq!(r.read().unwrap(), Some('a'));
    }

    #[test]
    fn test_one_char_matcher() {
        let matcher = SeparatorMatcher::from_text(";");
        assert_eq!(matcher.size(), 1);
        let mut r = reader(";x");
        assert!(matcher.is_match(&mut r).unwrap());
        assert_eq!(r.read().unwrap(), Some('x'));
    }

    #[test]
    fn test_two_char_matcher_partial_consumes_nothing() {
        let matcher = SeparatorMatcher::from_text("BO");
        let mut r = reader("Bx");
        assert!(!matcher.is_match(&mut r).unwrap());
        assert_eq!(r.read().unwrap(), Some('B'));
        assert_eq!(r.read().unwrap(), Some('x'));
    }

    #[test]
    fn test_seq_matcher() {
        let matcher = SeparatorMatcher::from_text("BOOM");
        assert_eq!(matcher.size(), 4);
        let mut r = reader("BOOMx");
        assert!(matcher.is_match(&mut r).unwrap());
        assert_eq!(r.read().unwrap(), Some('x'));
    }

    #[test]
    fn test_trim_default() {
        let matcher = SeparatorMatcher::Default;
        assert_eq!(matcher.trim("abc\r\n"), "abc");
        assert_eq!(matcher.trim("abc\n"), "abc");
        assert_eq!(matcher.trim("abc\r"), "abc");
        assert_eq!(matcher.trim("abc"), "abc");
    }

    #[test]
    fn test_trim_two_char() {
        let matcher = SeparatorMatcher::from_text("::");
        assert_eq!(matcher.trim("abc::"), "abc");
        assert_eq!(matcher.trim("abc:"), "abc:");
        assert_eq!(matcher.trim("::"), "");
    }

    #[test]
    fn test_trim_seq() {
        let matcher = SeparatorMatcher::from_text("BOOM");
        assert_eq!(matcher.trim("abcBOOM"), "abc");
        assert_eq!(matcher.trim("abcBOO"), "abcBOO");
    }

    #[test]
    fn test_record_separator_write_text() {
        assert_eq!(RecordSeparator::Auto.write_text(), "\n");
        assert_eq!(RecordSeparator::literal("\r\n").write_text(), "\r\n");
    }

    #[test]
    fn test_record_separator_contains_char() {
        assert!(RecordSeparator::Auto.contains_char('\n'));
        assert!(RecordSeparator::Auto.contains_char('\r'));
        assert!(!RecordSeparator::Auto.contains_char(','));
        assert!(RecordSeparator::literal("::").contains_char(':'));
    }
}
