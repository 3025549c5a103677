// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Streaming character reader with peek/retry semantics.
//!
//! [`RetryReader`] pulls UTF-8 chunks from an inner [`Read`] into a
//! [`CircularBuffer`] and exposes character-level probes that consume input
//! only on a full match. Multi-character separators can therefore be matched
//! across chunk boundaries: a partial match peeks at buffered characters and
//! leaves them in place, so the tokenizer can retry a different separator or
//! treat the character as data.
//!
//! A multi-byte UTF-8 sequence split across chunks is carried over and
//! completed by the next chunk; bytes that remain incomplete at end of
//! stream are a parse error.

use std::io::Read;

use crate::core::{FlatError, Result};

use super::buffer::CircularBuffer;

const BUFFER_CAPACITY: usize = 4096;
const CHUNK_SIZE: usize = 1024;

/// Streaming character reader over a byte source.
pub struct RetryReader<R: Read> {
    inner: R,
    buffer: CircularBuffer<char>,
    chunk: Vec<u8>,
    // Incomplete UTF-8 tail carried to the next chunk
    carry: [u8; 4],
    carry_len: usize,
    exhausted: bool,
    current: char,
}

impl<R: Read> RetryReader<R> {
    /// Create a reader with the default buffer and chunk sizes.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buffer: CircularBuffer::new(BUFFER_CAPACITY),
            chunk: vec![0u8; CHUNK_SIZE],
            carry: [0u8; 4],
            carry_len: 0,
            exhausted: false,
            current: '\0',
        }
    }

    /// The character consumed by the most recent successful probe or read.
    pub fn current(&self) -> char {
        self.current
    }

    /// Whether all input has been consumed.
    pub fn eof(&mut self) -> Result<bool> {
        self.ensure(1)?;
        Ok(self.buffer.is_empty())
    }

    /// Consume and return the next character.
    pub fn read(&mut self) -> Result<Option<char>> {
        self.ensure(1)?;
        match self.buffer.peek() {
            Some(c) => {
                self.buffer.dequeue(1);
                self.current = c;
                Ok(Some(c))
            }
            None => Ok(None),
        }
    }

    /// Peek at the next character without consuming it.
    pub fn peek(&mut self) -> Result<Option<char>> {
        self.ensure(1)?;
        Ok(self.buffer.peek())
    }

    /// Consume the next character if it equals `expected`.
    pub fn is_match(&mut self, expected: char) -> Result<bool> {
        self.ensure(1)?;
        if self.buffer.peek() == Some(expected) {
            self.buffer.dequeue(1);
            self.current = expected;
            return Ok(true);
        }
        Ok(false)
    }

    /// Consume the next two characters if they equal `first` then `second`.
    pub fn is_match2(&mut self, first: char, second: char) -> Result<bool> {
        self.ensure(2)?;
        if self.buffer.peek_at(0) == Some(first) && self.buffer.peek_at(1) == Some(second) {
            self.buffer.dequeue(2);
            self.current = second;
            return Ok(true);
        }
        Ok(false)
    }

    /// Consume the next characters if they equal the whole sequence.
    ///
    /// A partial match consumes nothing.
    pub fn is_match_seq(&mut self, sequence: &[char]) -> Result<bool> {
        if sequence.is_empty() {
            return Ok(false);
        }
        self.ensure(sequence.len())?;
        for (index, expected) in sequence.iter().enumerate() {
            if self.buffer.peek_at(index) != Some(*expected) {
                return Ok(false);
            }
        }
        self.buffer.dequeue(sequence.len());
        self.current = sequence[sequence.len() - 1];
        Ok(true)
    }

    /// Consume the next character if it is whitespace.
    pub fn is_whitespace(&mut self) -> Result<bool> {
        self.ensure(1)?;
        match self.buffer.peek() {
            Some(c) if c.is_whitespace() => {
                self.buffer.dequeue(1);
                self.current = c;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Make at least `min` characters available, source permitting.
    fn ensure(&mut self, min: usize) -> Result<()> {
        while self.buffer.len() < min && !self.exhausted {
            self.load_chunk()?;
        }
        Ok(())
    }

    /// Pull one chunk from the source and decode it into the buffer.
    fn load_chunk(&mut self) -> Result<()> {
        self.chunk[..self.carry_len].copy_from_slice(&self.carry[..self.carry_len]);
        let read = self.inner.read(&mut self.chunk[self.carry_len..])?;
        let total = self.carry_len + read;
        if read == 0 {
            self.exhausted = true;
            if self.carry_len > 0 {
                return Err(FlatError::parse(
                    "RetryReader",
                    "stream ends with an incomplete UTF-8 sequence",
                ));
            }
            return Ok(());
        }

        let (decoded, tail) = match std::str::from_utf8(&self.chunk[..total]) {
            Ok(text) => (text, 0),
            Err(err) => {
                let valid = err.valid_up_to();
                // A short tail is an in-progress multi-byte sequence; anything
                // else is genuinely invalid input.
                if err.error_len().is_some() || total - valid >= 4 {
                    return Err(FlatError::parse(
                        "RetryReader",
                        format!("invalid UTF-8 at byte offset {valid}"),
                    ));
                }
                let text = std::str::from_utf8(&self.chunk[..valid])
                    .expect("validity established by valid_up_to");
                (text, total - valid)
            }
        };

        let mut chars = decoded.chars();
        let block = self.buffer.prepare_block();
        let mut written = 0;
        for slot in block.iter_mut() {
            match chars.next() {
                Some(c) => {
                    *slot = c;
                    written += 1;
                }
                None => break,
            }
        }
        debug_assert!(chars.next().is_none(), "chunk exceeds buffer capacity");
        self.buffer.record_growth(written);

        let tail_start = total - tail;
        for (index, offset) in (tail_start..total).enumerate() {
            self.carry[index] = self.chunk[offset];
        }
        self.carry_len = tail;
        Ok(())
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
    fn test_read_all_characters() {
        let mut r = reader("abc");
        assert_eq!(r.read().unwrap(), Some('a'));
        assert_eq!(r.current(), 'a');
        assert_eq!(r.read().unwrap(), Some('b'));
        assert_eq!(r.read().unwrap(), Some('c'));
        assert_eq!(r.read().unwrap(), None);
        assert!(r.eof().unwrap());
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut r = reader("ab");
        assert_eq!(r.peek().unwrap(), Some('a'));
        assert_eq!(r.peek().unwrap(), Some('a'));
        assert_eq!(r.read().unwrap(), Some('a'));
    }

    #[test]
    fn test_is_match_consumes_only_on_match() {
        let mut r = reader("ab");
        assert!(!r.is_match('x').unwrap());
        assert!(r.is_match('a').unwrap());
        assert_eq!(r.current(), 'a');
        assert_eq!(r.read().unwrap(), Some('b'));
    }

    #[test]
    fn test_is_match2_partial_match_consumes_nothing() {
        let mut r = reader("ax");
        assert!(!r.is_match2('a', 'b').unwrap());
        // 'a' must still be there after the failed two-char probe
        assert_eq!(r.read().unwrap(), Some('a'));
        assert_eq!(r.read().unwrap(), Some('x'));
    }

    #[test]
    fn test_is_match2_at_eof() {
        let mut r = reader("a");
        assert!(!r.is_match2('a', 'b').unwrap());
        assert_eq!(r.read().unwrap(), Some('a'));
    }

    #[test]
    fn test_is_match_seq() {
        let mut r = reader("::rest");
        assert!(!r.is_match_seq(&[':', ':', ':']).unwrap());
        assert!(r.is_match_seq(&[':', ':']).unwrap());
        assert_eq!(r.read().unwrap(), Some('r'));
    }

    #[test]
    fn test_is_whitespace() {
        let mut r = reader(" a");
        assert!(r.is_whitespace().unwrap());
        assert!(!r.is_whitespace().unwrap());
        assert_eq!(r.read().unwrap(), Some('a'));
    }

    #[test]
    fn test_multibyte_characters() {
        let mut r = reader("héllo");
        assert_eq!(r.read().unwrap(), Some('h'));
        assert_eq!(r.read().unwrap(), Some('é'));
        assert_eq!(r.read().unwrap(), Some('l'));
    }

    #[test]
    fn test_multibyte_split_across_chunks() {
        // 1025 'a's push the two-byte 'é' across the 1024-byte chunk boundary
        let mut text = "a".repeat(1023);
        text.push('é');
        text.push_str("xyz");
        let mut r = reader(&text);
        for _ in 0..1023 {
            assert_eq!(r.read().unwrap(), Some('a'));
        }
        assert_eq!(r.read().unwrap(), Some('é'));
        assert_eq!(r.read().unwrap(), Some('x'));
        assert_eq!(r.read().unwrap(), Some('y'));
        assert_eq!(r.read().unwrap(), Some('z'));
        assert_eq!(r.read().unwrap(), None);
    }

    #[test]
    fn test_invalid_utf8_is_error() {
        let mut r = RetryReader::new(Cursor::new(vec![b'a', 0xFF, b'b']));
        assert!(r.read().is_err());
    }

    #[test]
    fn test_truncated_utf8_at_eof_is_error() {
        // First byte of a two-byte sequence, then EOF
        let mut r = RetryReader::new(Cursor::new(vec![0xC3]));
        assert!(r.read().is_err());
    }

    #[test]
    fn test_empty_input() {
        let mut r = reader("");
        assert!(r.eof().unwrap());
        assert_eq!(r.read().unwrap(), None);
    }

    #[test]
    fn test_long_input_spans_many_chunks() {
        let text = "0123456789".repeat(1000);
        let mut r = reader(&text);
        let mut count = 0usize;
        while let Some(c) = r.read().unwrap() {
            assert_eq!(c, char::from_digit((count % 10) as u32, 10).unwrap());
            count += 1;
        }
        assert_eq!(count, 10_000);
    }
}
