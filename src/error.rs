//! Error handling for the JSON parser.
//!
//! Only parsing can fail. Accessors and the serializer are total, so every
//! error in this crate is a [`ParseError`] describing the first malformation
//! found in the input, together with the byte offset where it was detected.

use thiserror::Error;

/// Broad category of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A value was required but the input ended.
    ExpectedValue,
    /// A literal was misspelled, or no value can start with the character found.
    InvalidValue,
    /// A number token broke the numeric grammar or overflowed `f64`.
    InvalidNumber,
    /// A string was unterminated, contained a raw control byte, or had a bad escape.
    InvalidString,
    /// A delimiter (`:`, `,`, `]`, `}`) or an object key was missing or misplaced.
    Structural,
    /// Arrays and objects were nested deeper than the configured limit.
    DepthExceeded,
    /// Non-whitespace content followed the top-level value.
    TrailingGarbage,
    /// The input bytes were not valid UTF-8.
    InvalidEncoding,
}

/// A parse failure. The first one encountered is the one reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum ParseError {
    /// Input ended where a value was required.
    #[error("expected value, got end of input at offset {0}")]
    UnexpectedEnd(usize),

    /// `null`, `true` or `false` was truncated or misspelled.
    #[error("invalid literal at offset {offset}: expected `{expected}`")]
    InvalidLiteral {
        /// The literal selected by the first character.
        expected: &'static str,
        /// Offset of the literal's first byte.
        offset: usize,
    },

    /// No JSON value starts with this character.
    #[error("unexpected character {found:?} at offset {offset}")]
    UnexpectedCharacter {
        /// The offending character.
        found: char,
        /// Offset of the character.
        offset: usize,
    },

    /// Number token violates `-? (0|[1-9][0-9]*) (.[0-9]+)? ([eE][+-]?[0-9]+)?`.
    #[error("invalid number at offset {0}")]
    InvalidNumber(usize),

    /// Number is syntactically valid but does not fit in an `f64`.
    #[error("number out of range at offset {0}")]
    NumberOutOfRange(usize),

    /// Input ended before the closing quote.
    #[error("unterminated string starting at offset {0}")]
    UnterminatedString(usize),

    /// Unescaped byte below 0x20 inside a string.
    #[error("unescaped control character 0x{byte:02X} in string at offset {offset}")]
    ControlCharacter {
        /// The raw byte.
        byte: u8,
        /// Offset of the byte.
        offset: usize,
    },

    /// Backslash followed by an unknown escape character.
    #[error("invalid escape {found:?} at offset {offset}")]
    InvalidEscape {
        /// Character after the backslash.
        found: char,
        /// Offset of the backslash.
        offset: usize,
    },

    /// `\u` not followed by four hex digits.
    #[error("bad \\u escape at offset {0}")]
    InvalidUnicodeEscape(usize),

    /// Unpaired or mismatched UTF-16 surrogate in a `\u` escape.
    #[error("invalid unicode surrogate at offset {0}")]
    InvalidSurrogate(usize),

    /// Object member does not start with a quoted key.
    #[error("expected string key at offset {0}")]
    MissingKey(usize),

    /// Object key is not followed by `:`.
    #[error("expected ':' after object key at offset {0}")]
    MissingColon(usize),

    /// Array element is followed by neither `,` nor `]`.
    #[error("expected ',' or ']' at offset {0}")]
    MissingCommaOrBracket(usize),

    /// Object member is followed by neither `,` nor `}`.
    #[error("expected ',' or '}}' at offset {0}")]
    MissingCommaOrBrace(usize),

    /// `,` directly before `]` or `}`.
    #[error("trailing comma at offset {0}")]
    TrailingComma(usize),

    /// Nesting exceeded [`Limits::max_nesting_depth`](crate::Limits).
    #[error("nesting too deep at offset {offset}: depth {depth} exceeds limit {limit}")]
    NestingTooDeep {
        /// Depth reached.
        depth: u32,
        /// Configured maximum.
        limit: u32,
        /// Offset of the opening bracket that crossed the limit.
        offset: usize,
    },

    /// Content after the top-level value.
    #[error("unexpected trailing {found:?} at offset {offset}")]
    TrailingCharacters {
        /// First non-whitespace character after the value.
        found: char,
        /// Offset of that character.
        offset: usize,
    },

    /// Input bytes are not valid UTF-8.
    #[error("invalid UTF-8 at offset {0}")]
    InvalidUtf8(usize),
}

impl ParseError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::UnexpectedEnd(_) => ErrorKind::ExpectedValue,
            ParseError::InvalidLiteral { .. } | ParseError::UnexpectedCharacter { .. } => {
                ErrorKind::InvalidValue
            }
            ParseError::InvalidNumber(_) | ParseError::NumberOutOfRange(_) => {
                ErrorKind::InvalidNumber
            }
            ParseError::UnterminatedString(_)
            | ParseError::ControlCharacter { .. }
            | ParseError::InvalidEscape { .. }
            | ParseError::InvalidUnicodeEscape(_)
            | ParseError::InvalidSurrogate(_) => ErrorKind::InvalidString,
            ParseError::MissingKey(_)
            | ParseError::MissingColon(_)
            | ParseError::MissingCommaOrBracket(_)
            | ParseError::MissingCommaOrBrace(_)
            | ParseError::TrailingComma(_) => ErrorKind::Structural,
            ParseError::NestingTooDeep { .. } => ErrorKind::DepthExceeded,
            ParseError::TrailingCharacters { .. } => ErrorKind::TrailingGarbage,
            ParseError::InvalidUtf8(_) => ErrorKind::InvalidEncoding,
        }
    }

    /// Byte offset into the input where the error was detected.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnexpectedEnd(offset)
            | ParseError::InvalidNumber(offset)
            | ParseError::NumberOutOfRange(offset)
            | ParseError::UnterminatedString(offset)
            | ParseError::InvalidUnicodeEscape(offset)
            | ParseError::InvalidSurrogate(offset)
            | ParseError::MissingKey(offset)
            | ParseError::MissingColon(offset)
            | ParseError::MissingCommaOrBracket(offset)
            | ParseError::MissingCommaOrBrace(offset)
            | ParseError::TrailingComma(offset)
            | ParseError::InvalidUtf8(offset) => *offset,
            ParseError::InvalidLiteral { offset, .. }
            | ParseError::UnexpectedCharacter { offset, .. }
            | ParseError::ControlCharacter { offset, .. }
            | ParseError::InvalidEscape { offset, .. }
            | ParseError::NestingTooDeep { offset, .. }
            | ParseError::TrailingCharacters { offset, .. } => *offset,
        }
    }

    /// Stable name of the variant, for reports.
    pub fn name(&self) -> &'static str {
        match self {
            ParseError::UnexpectedEnd(_) => "UnexpectedEnd",
            ParseError::InvalidLiteral { .. } => "InvalidLiteral",
            ParseError::UnexpectedCharacter { .. } => "UnexpectedCharacter",
            ParseError::InvalidNumber(_) => "InvalidNumber",
            ParseError::NumberOutOfRange(_) => "NumberOutOfRange",
            ParseError::UnterminatedString(_) => "UnterminatedString",
            ParseError::ControlCharacter { .. } => "ControlCharacter",
            ParseError::InvalidEscape { .. } => "InvalidEscape",
            ParseError::InvalidUnicodeEscape(_) => "InvalidUnicodeEscape",
            ParseError::InvalidSurrogate(_) => "InvalidSurrogate",
            ParseError::MissingKey(_) => "MissingKey",
            ParseError::MissingColon(_) => "MissingColon",
            ParseError::MissingCommaOrBracket(_) => "MissingCommaOrBracket",
            ParseError::MissingCommaOrBrace(_) => "MissingCommaOrBrace",
            ParseError::TrailingComma(_) => "TrailingComma",
            ParseError::NestingTooDeep { .. } => "NestingTooDeep",
            ParseError::TrailingCharacters { .. } => "TrailingCharacters",
            ParseError::InvalidUtf8(_) => "InvalidUtf8",
        }
    }
}

/// Result type for parsing operations.
pub type JsonResult<T> = Result<T, ParseError>;
