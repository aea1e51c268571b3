//! Lexer for path data.
//!
//! The tokenizer never fails. Characters it cannot place are skipped, and
//! converting a numeric token into a float is left to the caller, which
//! decides how fatal a bad number is.
//!
//! Numbers follow the compact path convention: a sign that is not the first
//! character of a token (and does not follow an exponent marker) starts the
//! next number, so `1.5-2.3` is two numbers. A second decimal point does the
//! same, so `0.5.5` is `0.5` and `.5`.

use std::ops::Range;

use crate::errors::{PathError, SourceContext};
use crate::log::warn;

/// A numeric token: its text and byte range in the path data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub start: usize,
}

impl<'a> Token<'a> {
    pub fn span(&self) -> Range<usize> {
        self.start..self.start + self.text.len()
    }

    /// Convert to a float, reporting the token on failure.
    pub fn to_f64(&self, source: &str) -> Result<f64, PathError> {
        match self.text.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(PathError::InvalidNumber {
                token: self.text.to_string(),
                src: SourceContext::new("path data", source).named_source(),
                span: (self.start, self.text.len().max(1)).into(),
            }),
        }
    }
}

/// What the cursor is looking at after separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookahead {
    Command(char),
    Number,
    End,
}

/// Whether `c` is a path command letter.
pub fn is_command(c: char) -> bool {
    matches!(
        c,
        'M' | 'm' | 'L' | 'l' | 'H' | 'h' | 'V' | 'v' | 'C' | 'c' | 'S' | 's' | 'Q' | 'q' | 'T'
            | 't' | 'A' | 'a' | 'Z' | 'z'
    )
}

fn starts_number(c: u8) -> bool {
    c.is_ascii_digit() || matches!(c, b'-' | b'+' | b'.')
}

fn is_separator(c: u8) -> bool {
    c.is_ascii_whitespace() || c == b','
}

#[derive(Debug, Clone)]
pub struct PathTokenizer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> PathTokenizer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    pub fn source(&self) -> &'a str {
        self.src
    }

    /// Byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn peek_byte(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    /// Advance past whitespace and commas.
    pub fn skip_separators(&mut self) {
        while let Some(c) = self.peek_byte() {
            if !is_separator(c) {
                break;
            }
            self.pos += 1;
        }
    }

    /// Skip one unrecognised character (a recovered tokenize error).
    fn skip_garbage(&mut self) {
        if let Some(c) = self.src[self.pos..].chars().next() {
            warn!(position = self.pos, character = %c, "skipping unexpected character in path data");
            self.pos += c.len_utf8();
        }
    }

    /// Classify the next token, skipping separators and stray characters.
    pub fn lookahead(&mut self) -> Lookahead {
        loop {
            self.skip_separators();
            let Some(c) = self.peek_byte() else {
                return Lookahead::End;
            };
            if starts_number(c) {
                return Lookahead::Number;
            }
            if is_command(c as char) {
                return Lookahead::Command(c as char);
            }
            self.skip_garbage();
        }
    }

    /// Consume a command letter if one is next.
    pub fn next_command(&mut self) -> Option<char> {
        match self.lookahead() {
            Lookahead::Command(c) => {
                self.pos += 1;
                Some(c)
            }
            _ => None,
        }
    }

    /// Greedily consume one numeric token.
    ///
    /// Returns `None` only when the next token is not numeric at all.
    pub fn extract_number(&mut self) -> Option<Token<'a>> {
        if self.lookahead() != Lookahead::Number {
            return None;
        }
        let bytes = self.src.as_bytes();
        let start = self.pos;
        let mut end = start;
        let mut seen_dot = false;
        let mut seen_exp = false;

        while let Some(&c) = bytes.get(end) {
            match c {
                b'0'..=b'9' => {}
                b'-' | b'+' => {
                    let after_exp = end > start && matches!(bytes[end - 1], b'e' | b'E');
                    if end != start && !after_exp {
                        break;
                    }
                }
                b'.' => {
                    if seen_dot || seen_exp {
                        break;
                    }
                    seen_dot = true;
                }
                b'e' | b'E' => {
                    if seen_exp || end == start {
                        break;
                    }
                    seen_exp = true;
                }
                _ => break,
            }
            end += 1;
        }

        self.pos = end;
        Some(Token {
            text: &self.src[start..end],
            start,
        })
    }

    /// Consume an arc flag. Flags may be packed without separators, so a
    /// leading `0` or `1` is taken as a single-character token.
    pub fn extract_flag(&mut self) -> Option<Token<'a>> {
        if self.lookahead() != Lookahead::Number {
            return None;
        }
        match self.peek_byte() {
            Some(b'0' | b'1') => {
                let start = self.pos;
                self.pos += 1;
                Some(Token {
                    text: &self.src[start..start + 1],
                    start,
                })
            }
            _ => self.extract_number(),
        }
    }
}
