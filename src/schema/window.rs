// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Fixed-length window definitions.
//!
//! A window describes the span of one column within a fixed-length record:
//! its width, how values are aligned within it, the fill character used for
//! padding, and what happens when a formatted value is too long.

use crate::core::{FlatError, Result};

/// Alignment of a value within its window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Value at the start, fill at the end
    Left,
    /// Value at the end, fill at the start
    Right,
}

/// What to do when a formatted value is wider than its window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Drop characters from the end of the value
    TruncateTrailing,
    /// Drop characters from the start of the value
    TruncateLeading,
}

/// The span of one column within a fixed-length record.
///
/// Alignment, fill character, and overflow policy are optional per window;
/// unset properties fall back to the writer/reader options.
#[derive(Debug, Clone)]
pub struct Window {
    width: usize,
    alignment: Option<Alignment>,
    fill_char: Option<char>,
    truncation: Option<OverflowPolicy>,
    trailing: bool,
}

impl Window {
    /// Create a window of the given width.
    pub fn new(width: usize) -> Self {
        Self {
            width,
            alignment: None,
            fill_char: None,
            truncation: None,
            trailing: false,
        }
    }

    /// Create a trailing window spanning the rest of the record.
    ///
    /// Only valid as the last window of a schema. A trailing window is never
    /// padded or truncated; it absorbs whatever text remains.
    pub fn trailing() -> Self {
        Self {
            width: 0,
            alignment: None,
            fill_char: None,
            truncation: None,
            trailing: true,
        }
    }

    /// Override the alignment for this window.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Override the fill character for this window.
    pub fn with_fill_char(mut self, fill_char: char) -> Self {
        self.fill_char = Some(fill_char);
        self
    }

    /// Override the overflow policy for this window.
    pub fn with_truncation(mut self, truncation: OverflowPolicy) -> Self {
        self.truncation = Some(truncation);
        self
    }

    /// The window width in characters (0 for trailing windows).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether this is a trailing rest-of-record window.
    pub fn is_trailing(&self) -> bool {
        self.trailing
    }

    /// The alignment, falling back to the given default.
    pub fn alignment_or(&self, default: Alignment) -> Alignment {
        self.alignment.unwrap_or(default)
    }

    /// The fill character, falling back to the given default.
    pub fn fill_char_or(&self, default: char) -> char {
        self.fill_char.unwrap_or(default)
    }

    /// The overflow policy, falling back to the given default.
    pub fn truncation_or(&self, default: OverflowPolicy) -> OverflowPolicy {
        self.truncation.unwrap_or(default)
    }

    /// Pad or truncate a formatted value to fit this window.
    pub fn fit(
        &self,
        value: &str,
        default_alignment: Alignment,
        default_fill: char,
        default_truncation: OverflowPolicy,
    ) -> String {
        if self.trailing {
            return value.to_string();
        }
        let length = value.chars().count();
        if length == self.width {
            return value.to_string();
        }
        if length > self.width {
            // Truncation operates on characters, not bytes
            return match self.truncation_or(default_truncation) {
                OverflowPolicy::TruncateTrailing => value.chars().take(self.width).collect(),
                OverflowPolicy::TruncateLeading => {
                    value.chars().skip(length - self.width).collect()
                }
            };
        }
        let fill: String = std::iter::repeat(self.fill_char_or(default_fill))
            .take(self.width - length)
            .collect();
        match self.alignment_or(default_alignment) {
            Alignment::Left => format!("{value}{fill}"),
            Alignment::Right => format!("{fill}{value}"),
        }
    }

    /// Strip the fill character from a raw cell extracted from a record.
    ///
    /// Fill is stripped from both ends; the column's own trimming handles
    /// any remaining whitespace.
    pub fn strip(&self, cell: &str, default_fill: char) -> String {
        if self.trailing {
            return cell.to_string();
        }
        let fill = self.fill_char_or(default_fill);
        cell.trim_matches(fill).to_string()
    }

    /// Validate the window for use in a schema.
    pub fn validate(&self, schema_name: &str) -> Result<()> {
        if !self.trailing && self.width == 0 {
            return Err(FlatError::invalid_schema(
                schema_name,
                "window width must be greater than zero",
            ));
        }
        Ok(())
    }
}

impl From<usize> for Window {
    fn from(width: usize) -> Self {
        Window::new(width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULTS: (Alignment, char, OverflowPolicy) =
        (Alignment::Left, ' ', OverflowPolicy::TruncateTrailing);

    fn fit(window: &Window, value: &str) -> String {
        window.fit(value, DEFAULTS.0, DEFAULTS.1, DEFAULTS.2)
    }

    #[test]
    fn test_fit_pads_left_aligned() {
        let window = Window::new(6);
        assert_eq!(fit(&window, "abc"), "abc   ");
    }

    #[test]
    fn test_fit_pads_right_aligned() {
        let window = Window::new(6).with_alignment(Alignment::Right);
        assert_eq!(fit(&window, "abc"), "   abc");
    }

    #[test]
    fn test_fit_custom_fill() {
        let window = Window::new(6)
            .with_alignment(Alignment::Right)
            .with_fill_char('0');
        assert_eq!(fit(&window, "42"), "000042");
    }

    #[test]
    fn test_fit_exact_width() {
        let window = Window::new(3);
        assert_eq!(fit(&window, "abc"), "abc");
    }

    #[test]
    fn test_fit_truncates_trailing() {
        let window = Window::new(3);
        assert_eq!(fit(&window, "abcdef"), "abc");
    }

    #[test]
    fn test_fit_truncates_leading() {
        let window = Window::new(3).with_truncation(OverflowPolicy::TruncateLeading);
        assert_eq!(fit(&window, "abcdef"), "def");
    }

    #[test]
    fn test_fit_trailing_window_is_untouched() {
        let window = Window::trailing();
        assert_eq!(fit(&window, "anything at all"), "anything at all");
    }

    #[test]
    fn test_strip_default_fill() {
        let window = Window::new(6);
        assert_eq!(window.strip("  abc ", ' '), "abc");
    }

    #[test]
    fn test_strip_custom_fill() {
        let window = Window::new(6).with_fill_char('@');
        assert_eq!(window.strip("@@42@@", ' '), "42");
    }

    #[test]
    fn test_strip_trailing_window() {
        let window = Window::trailing();
        assert_eq!(window.strip("  raw  ", ' '), "  raw  ");
    }

    #[test]
    fn test_validate_zero_width() {
        assert!(Window::new(0).validate("test").is_err());
        assert!(Window::trailing().validate("test").is_ok());
        assert!(Window::new(1).validate("test").is_ok());
    }

    #[test]
    fn test_from_usize() {
        let window: Window = 10.into();
        assert_eq!(window.width(), 10);
    }
}
