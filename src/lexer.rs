//! Byte cursor and scalar readers.
//!
//! The lexer owns the single forward-only position into the input. It knows
//! how to skip whitespace and how to read the scalar productions of the
//! grammar: literals, numbers and strings. Structure (arrays, objects,
//! nesting) is handled by the parser, which drives the cursor.
//!
//! The input is a `&str`, so it is already valid UTF-8. String contents are
//! copied out in runs between escapes; every run boundary sits on an ASCII
//! byte, so slicing the input there is always on a char boundary.

use crate::error::{JsonResult, ParseError};
use crate::value::Number;

/// Forward-only cursor over JSON text.
pub(crate) struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Create a lexer positioned at the start of `input`.
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    /// Current byte offset.
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    /// Peek at the current byte without consuming it.
    pub(crate) fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    /// Consume and return the current byte.
    pub(crate) fn advance(&mut self) -> Option<u8> {
        let b = self.peek();
        if b.is_some() {
            self.pos += 1;
        }
        b
    }

    /// The character starting at the cursor, for error reports.
    pub(crate) fn current_char(&self) -> char {
        self.char_at(self.pos)
    }

    fn char_at(&self, pos: usize) -> char {
        self.input
            .get(pos..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    /// Skip space, tab, CR and LF.
    pub(crate) fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.pos += 1;
        }
    }

    /// Match `literal` byte-for-byte at the cursor.
    pub(crate) fn read_literal(&mut self, literal: &'static str) -> JsonResult<()> {
        let offset = self.pos;
        let end = offset + literal.len();
        if self.bytes.get(offset..end) != Some(literal.as_bytes()) {
            return Err(ParseError::InvalidLiteral {
                expected: literal,
                offset,
            });
        }
        self.pos = end;
        Ok(())
    }

    /// Read a number token. The cursor must be on `-` or a digit.
    pub(crate) fn read_number(&mut self) -> JsonResult<Number> {
        let start = self.pos;

        if self.peek() == Some(b'-') {
            self.pos += 1;
        }

        // Integer part
        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                if let Some(b'0'..=b'9') = self.peek() {
                    return Err(ParseError::InvalidNumber(start));
                }
            }
            Some(b'1'..=b'9') => {
                self.skip_digits();
            }
            _ => return Err(ParseError::InvalidNumber(start)),
        }

        let mut integral = true;

        if self.peek() == Some(b'.') {
            integral = false;
            self.pos += 1;
            if self.skip_digits() == 0 {
                return Err(ParseError::InvalidNumber(start));
            }
        }

        if let Some(b'e' | b'E') = self.peek() {
            integral = false;
            self.pos += 1;
            if let Some(b'+' | b'-') = self.peek() {
                self.pos += 1;
            }
            if self.skip_digits() == 0 {
                return Err(ParseError::InvalidNumber(start));
            }
        }

        let text = &self.input[start..self.pos];

        // Integral tokens that fit keep every digit, so they print back
        // unchanged. "-0" stays a float so the sign survives.
        if integral && text != "-0" {
            if let Ok(n) = text.parse::<i64>() {
                return Ok(Number::Int(n));
            }
        }

        let value: f64 = text
            .parse()
            .map_err(|_| ParseError::InvalidNumber(start))?;
        if value.is_infinite() {
            return Err(ParseError::NumberOutOfRange(start));
        }
        Ok(Number::Float(value))
    }

    /// Consume a run of ASCII digits, returning how many were consumed.
    fn skip_digits(&mut self) -> usize {
        let start = self.pos;
        while let Some(b'0'..=b'9') = self.peek() {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Read a string. The cursor must be on the opening quote.
    pub(crate) fn read_string(&mut self) -> JsonResult<String> {
        let start = self.pos;
        self.pos += 1;

        let mut result = String::new();
        let mut run_start = self.pos;

        loop {
            match self.peek() {
                None => return Err(ParseError::UnterminatedString(start)),
                Some(b'"') => {
                    result.push_str(&self.input[run_start..self.pos]);
                    self.pos += 1;
                    return Ok(result);
                }
                Some(b'\\') => {
                    result.push_str(&self.input[run_start..self.pos]);
                    let ch = self.read_escape_sequence(start)?;
                    result.push(ch);
                    run_start = self.pos;
                }
                Some(byte) if byte < 0x20 => {
                    return Err(ParseError::ControlCharacter {
                        byte,
                        offset: self.pos,
                    });
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    /// Read an escape sequence. The cursor must be on the backslash.
    fn read_escape_sequence(&mut self, string_start: usize) -> JsonResult<char> {
        let offset = self.pos;
        self.pos += 1;

        match self.advance() {
            None => Err(ParseError::UnterminatedString(string_start)),
            Some(b'"') => Ok('"'),
            Some(b'\\') => Ok('\\'),
            Some(b'/') => Ok('/'),
            Some(b'b') => Ok('\x08'),
            Some(b'f') => Ok('\x0C'),
            Some(b'n') => Ok('\n'),
            Some(b'r') => Ok('\r'),
            Some(b't') => Ok('\t'),
            Some(b'u') => self.read_unicode_escape(offset),
            Some(_) => Err(ParseError::InvalidEscape {
                found: self.char_at(offset + 1),
                offset,
            }),
        }
    }

    /// Read the `XXXX` of a `\uXXXX` escape, joining surrogate pairs.
    fn read_unicode_escape(&mut self, offset: usize) -> JsonResult<char> {
        let unit = self.read_hex4(offset)?;

        match unit {
            0xD800..=0xDBFF => {
                if self.peek() != Some(b'\\') || self.peek_at(1) != Some(b'u') {
                    return Err(ParseError::InvalidSurrogate(offset));
                }
                self.pos += 2;
                let low = self
                    .read_hex4(offset)
                    .map_err(|_| ParseError::InvalidSurrogate(offset))?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(ParseError::InvalidSurrogate(offset));
                }
                let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                char::from_u32(combined).ok_or(ParseError::InvalidSurrogate(offset))
            }
            0xDC00..=0xDFFF => Err(ParseError::InvalidSurrogate(offset)),
            _ => char::from_u32(unit).ok_or(ParseError::InvalidUnicodeEscape(offset)),
        }
    }

    /// Read exactly four hex digits.
    fn read_hex4(&mut self, offset: usize) -> JsonResult<u32> {
        let mut value = 0u32;
        for _ in 0..4 {
            let digit = self
                .advance()
                .and_then(|b| char::from(b).to_digit(16))
                .ok_or(ParseError::InvalidUnicodeEscape(offset))?;
            value = (value << 4) | digit;
        }
        Ok(value)
    }
}
