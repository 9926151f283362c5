//! Recursive-descent JSON parser.
//!
//! The [`Parser`] is the context of one parse: it owns the lexer cursor, the
//! limits and the current nesting depth, and is threaded through every
//! recursive call. Parsing is fail-fast: the first malformation aborts the
//! whole parse through `?`, so the error reported is always the first one
//! found and nothing after it is examined.

use std::str::FromStr;

use crate::error::{JsonResult, ParseError};
use crate::lexer::Lexer;
use crate::limits::Limits;
use crate::value::{Array, Json, Object};

/// JSON parser over one input document.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    limits: Limits,
    depth: u32,
}

impl<'a> Parser<'a> {
    /// Create a parser for `input`. The depth limit is clamped to
    /// [`MAX_NESTING_DEPTH`](crate::limits::MAX_NESTING_DEPTH) even when the
    /// field was set directly.
    pub fn new(input: &'a str, limits: Limits) -> Self {
        Self {
            lexer: Lexer::new(input),
            limits: Limits::new(limits.max_nesting_depth),
            depth: 0,
        }
    }

    /// Parse exactly one value, rejecting anything but whitespace after it.
    pub fn parse(&mut self) -> JsonResult<Json> {
        let value = self.parse_value()?;

        self.lexer.skip_whitespace();
        if self.lexer.peek().is_some() {
            return Err(ParseError::TrailingCharacters {
                found: self.lexer.current_char(),
                offset: self.lexer.position(),
            });
        }

        Ok(value)
    }

    /// Parse a whitespace-separated sequence of values until end of input.
    pub fn parse_multi(&mut self) -> JsonResult<Vec<Json>> {
        let mut values = Vec::new();
        loop {
            self.lexer.skip_whitespace();
            if self.lexer.peek().is_none() {
                return Ok(values);
            }
            values.push(self.parse_value()?);
        }
    }

    /// Parse a single JSON value.
    fn parse_value(&mut self) -> JsonResult<Json> {
        self.lexer.skip_whitespace();
        let offset = self.lexer.position();

        match self.lexer.peek() {
            None => Err(ParseError::UnexpectedEnd(offset)),
            Some(b'n') => {
                self.lexer.read_literal("null")?;
                Ok(Json::null())
            }
            Some(b't') => {
                self.lexer.read_literal("true")?;
                Ok(Json::from(true))
            }
            Some(b'f') => {
                self.lexer.read_literal("false")?;
                Ok(Json::from(false))
            }
            Some(b'"') => Ok(Json::from(self.lexer.read_string()?)),
            Some(b'-' | b'0'..=b'9') => Ok(Json::from(self.lexer.read_number()?)),
            Some(b'[') => self.parse_array(),
            Some(b'{') => self.parse_object(),
            Some(_) => Err(ParseError::UnexpectedCharacter {
                found: self.lexer.current_char(),
                offset,
            }),
        }
    }

    /// Enter an array or object, enforcing the nesting limit.
    fn enter(&mut self) -> JsonResult<()> {
        self.depth += 1;
        if self.depth > self.limits.max_nesting_depth {
            return Err(ParseError::NestingTooDeep {
                depth: self.depth,
                limit: self.limits.max_nesting_depth,
                offset: self.lexer.position(),
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Parse a JSON array.
    fn parse_array(&mut self) -> JsonResult<Json> {
        self.enter()?;

        // Consume opening bracket
        self.lexer.advance();

        let mut items = Array::new();

        self.lexer.skip_whitespace();
        if self.lexer.peek() == Some(b']') {
            self.lexer.advance();
            self.leave();
            return Ok(Json::from(items));
        }

        loop {
            items.push(self.parse_value()?);

            self.lexer.skip_whitespace();
            let offset = self.lexer.position();
            match self.lexer.peek() {
                Some(b',') => {
                    self.lexer.advance();
                    self.lexer.skip_whitespace();
                    if self.lexer.peek() == Some(b']') {
                        return Err(ParseError::TrailingComma(offset));
                    }
                }
                Some(b']') => {
                    self.lexer.advance();
                    break;
                }
                _ => return Err(ParseError::MissingCommaOrBracket(offset)),
            }
        }

        self.leave();
        Ok(Json::from(items))
    }

    /// Parse a JSON object. Repeated keys keep the last value.
    fn parse_object(&mut self) -> JsonResult<Json> {
        self.enter()?;

        // Consume opening brace
        self.lexer.advance();

        let mut members = Object::new();

        self.lexer.skip_whitespace();
        if self.lexer.peek() == Some(b'}') {
            self.lexer.advance();
            self.leave();
            return Ok(Json::from(members));
        }

        loop {
            self.lexer.skip_whitespace();
            if self.lexer.peek() != Some(b'"') {
                return Err(ParseError::MissingKey(self.lexer.position()));
            }
            let key = self.lexer.read_string()?;

            self.lexer.skip_whitespace();
            if self.lexer.peek() != Some(b':') {
                return Err(ParseError::MissingColon(self.lexer.position()));
            }
            self.lexer.advance();

            let value = self.parse_value()?;
            members.insert(key, value);

            self.lexer.skip_whitespace();
            let offset = self.lexer.position();
            match self.lexer.peek() {
                Some(b',') => {
                    self.lexer.advance();
                    self.lexer.skip_whitespace();
                    if self.lexer.peek() == Some(b'}') {
                        return Err(ParseError::TrailingComma(offset));
                    }
                }
                Some(b'}') => {
                    self.lexer.advance();
                    break;
                }
                _ => return Err(ParseError::MissingCommaOrBrace(offset)),
            }
        }

        self.leave();
        Ok(Json::from(members))
    }
}

/// Parse a document, returning null if it is malformed.
///
/// Use [`try_parse`] to find out why a document was rejected.
pub fn parse(input: &str) -> Json {
    try_parse(input).unwrap_or_default()
}

/// Parse a document with the default [`Limits`].
pub fn try_parse(input: &str) -> JsonResult<Json> {
    parse_with_limits(input, Limits::default())
}

/// Parse a document with custom limits.
pub fn parse_with_limits(input: &str, limits: Limits) -> JsonResult<Json> {
    Parser::new(input, limits).parse()
}

/// Parse a document from raw bytes, rejecting input that is not UTF-8.
pub fn parse_slice(input: &[u8], limits: Limits) -> JsonResult<Json> {
    let text =
        std::str::from_utf8(input).map_err(|e| ParseError::InvalidUtf8(e.valid_up_to()))?;
    parse_with_limits(text, limits)
}

/// Parse a sequence of whitespace-separated documents, e.g. `1 [2] {"a": 3}`.
pub fn parse_multi(input: &str) -> JsonResult<Vec<Json>> {
    Parser::new(input, Limits::default()).parse_multi()
}

impl Json {
    /// Parse a document, returning null if it is malformed. See [`parse`].
    pub fn parse(input: &str) -> Json {
        parse(input)
    }
}

impl FromStr for Json {
    type Err = ParseError;

    fn from_str(s: &str) -> JsonResult<Self> {
        try_parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::MAX_NESTING_DEPTH;
    use crate::value::JsonType;

    #[test]
    fn test_parse_null() {
        assert_eq!(try_parse("null").unwrap(), Json::null());
    }

    #[test]
    fn test_parse_booleans() {
        assert_eq!(try_parse("true").unwrap(), Json::from(true));
        assert_eq!(try_parse("false").unwrap(), Json::from(false));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(try_parse("42").unwrap(), Json::from(42));
        assert_eq!(try_parse("-123").unwrap(), Json::from(-123));
        assert_eq!(try_parse("0.5").unwrap(), Json::from(0.5));
    }

    #[test]
    fn test_parse_string() {
        assert_eq!(try_parse(r#""hello""#).unwrap(), Json::from("hello"));
    }

    #[test]
    fn test_parse_array() {
        let result = try_parse("[1, 2, 3]").unwrap();
        assert_eq!(result, Json::array([1, 2, 3]));
        assert_eq!(try_parse("[]").unwrap(), Json::array(Vec::<Json>::new()));
        assert_eq!(try_parse("[ \n ]").unwrap().size(), 0);
    }

    #[test]
    fn test_parse_object() {
        let result = try_parse(r#"{"a": 1, "b": 2}"#).unwrap();
        assert_eq!(result, Json::object([("a", 1), ("b", 2)]));
        assert_eq!(try_parse("{ }").unwrap().json_type(), JsonType::Object);
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let result = try_parse(r#"{"a": 1, "a": 2}"#).unwrap();
        assert_eq!(result.size(), 1);
        assert_eq!(result["a"].int_value(), 2);
    }

    #[test]
    fn test_whitespace_everywhere() {
        let result = try_parse(" \t{ \"a\" :\r\n[ 1 ,2 ] } \n").unwrap();
        assert_eq!(result["a"][1].int_value(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(try_parse(""), Err(ParseError::UnexpectedEnd(0)));
        assert_eq!(try_parse("  \n"), Err(ParseError::UnexpectedEnd(3)));
    }

    #[test]
    fn test_trailing_content_rejected() {
        assert_eq!(
            try_parse("null extra"),
            Err(ParseError::TrailingCharacters {
                found: 'e',
                offset: 5
            })
        );
        assert!(try_parse("[1] [2]").is_err());
    }

    #[test]
    fn test_trailing_comma_rejected() {
        assert_eq!(try_parse("[1, 2,]"), Err(ParseError::TrailingComma(5)));
        assert_eq!(try_parse(r#"{"a": 1,}"#), Err(ParseError::TrailingComma(7)));
    }

    #[test]
    fn test_structural_errors() {
        assert_eq!(try_parse("[1 2]"), Err(ParseError::MissingCommaOrBracket(3)));
        assert_eq!(try_parse("[1"), Err(ParseError::MissingCommaOrBracket(2)));
        assert_eq!(try_parse(r#"{"a" 1}"#), Err(ParseError::MissingColon(5)));
        assert_eq!(try_parse("{a: 1}"), Err(ParseError::MissingKey(1)));
        assert_eq!(try_parse(r#"{"a": 1 "b": 2}"#), Err(ParseError::MissingCommaOrBrace(8)));
    }

    #[test]
    fn test_missing_value_in_object() {
        assert_eq!(
            try_parse(r#"{"a":}"#),
            Err(ParseError::UnexpectedCharacter {
                found: '}',
                offset: 5
            })
        );
    }

    #[test]
    fn test_first_error_wins() {
        // The bad escape comes first; the trailing comma after it is never seen.
        let err = try_parse(r#"["\q", 1,]"#).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidEscape {
                found: 'q',
                offset: 2
            }
        );
    }

    #[test]
    fn test_nesting_depth_limit() {
        let limits = Limits::new(2);

        // Depth 2 is allowed
        assert!(parse_with_limits("[[1]]", limits).is_ok());
        assert!(parse_with_limits(r#"{"a": [1]}"#, limits).is_ok());

        // Depth 3 exceeds limit
        assert_eq!(
            parse_with_limits("[[[1]]]", limits),
            Err(ParseError::NestingTooDeep {
                depth: 3,
                limit: 2,
                offset: 2
            })
        );
    }

    #[test]
    fn test_oversized_limit_is_clamped() {
        let limits = Limits {
            max_nesting_depth: u32::MAX,
        };
        let depth = MAX_NESTING_DEPTH as usize + 1;
        let input = format!("{}{}", "[".repeat(depth), "]".repeat(depth));

        // Recursing to the ceiling needs more stack than a test thread gets.
        let result = std::thread::Builder::new()
            .stack_size(64 * 1024 * 1024)
            .spawn(move || parse_with_limits(&input, limits))
            .unwrap()
            .join()
            .unwrap();
        assert!(matches!(
            result,
            Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                ..
            })
        ));
    }

    #[test]
    fn test_depth_is_released_between_siblings() {
        let limits = Limits::new(2);
        assert!(parse_with_limits("[[1], [2], {\"a\": 1}, []]", limits).is_ok());
    }

    #[test]
    fn test_parse_returns_null_on_failure() {
        assert!(parse("[1,]").is_null());
        assert!(parse("01").is_null());
        assert!(Json::parse("{").is_null());
        assert_eq!(parse("[true]")[0], Json::from(true));
    }

    #[test]
    fn test_from_str() {
        let value: Json = "[1, \"a\"]".parse().unwrap();
        assert_eq!(value[1].string_value(), "a");
        assert!("[".parse::<Json>().is_err());
    }

    #[test]
    fn test_parse_slice() {
        let value = parse_slice(br#"{"k": "\u00e9"}"#, Limits::default()).unwrap();
        assert_eq!(value["k"].string_value(), "\u{e9}");

        assert_eq!(
            parse_slice(b"[\"ab\xFF\"]", Limits::default()),
            Err(ParseError::InvalidUtf8(4))
        );
    }

    #[test]
    fn test_parse_multi() {
        let values = parse_multi(r#" 1 [2] {"a": 3} "x" "#).unwrap();
        assert_eq!(values.len(), 4);
        assert_eq!(values[0], Json::from(1));
        assert_eq!(values[1], Json::array([2]));
        assert_eq!(values[2]["a"].int_value(), 3);
        assert_eq!(values[3].string_value(), "x");

        assert!(parse_multi("").unwrap().is_empty());
        assert!(parse_multi(" \n ").unwrap().is_empty());
        assert!(parse_multi("1 [").is_err());
    }

    #[test]
    fn test_nested_structure() {
        let result = try_parse(r#"{"arr": [1, {"nested": true}], "num": 42}"#).unwrap();
        assert!(result.is_object());
        assert!(result["arr"].is_array());
        assert!(result["arr"][1]["nested"].bool_value());
        assert_eq!(result["num"].number_value(), 42.0);
    }
}
