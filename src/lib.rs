//! jsonpp - immutable JSON values with a parser and canonical serializer.
//!
//! The core type is [`Json`], a cheap-to-clone handle to an immutable JSON
//! value (null, bool, number, string, array or object). Values are shared by
//! reference count and can be read concurrently from any thread.
//!
//! # Architecture
//!
//! - [`value`] - the value representation, total accessors, ordering
//! - [`parser`] - recursive-descent parser (with the private `lexer` cursor)
//! - [`dump`] - canonical single-line serializer
//! - [`limits`] - nesting limits applied while parsing
//! - [`error`] - parse errors
//!
//! # Example
//!
//! ```
//! use jsonpp::{dump, try_parse, Json};
//!
//! let value = try_parse(r#"{"b": [1, 2.5], "a": null}"#).unwrap();
//! assert_eq!(value["b"][1].number_value(), 2.5);
//! assert!(value["missing"].is_null());
//!
//! // Keys come out sorted.
//! assert_eq!(dump(&value), r#"{"a": null, "b": [1, 2.5]}"#);
//!
//! // Numbers compare by value, whatever they were built from.
//! assert_eq!(Json::from(1), Json::from(1.0));
//! ```

// Library code reports failures through ParseError and never panics.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod dump;
pub mod error;
mod lexer;
pub mod limits;
pub mod parser;
mod serde_impl;
pub mod value;

// Re-export commonly used types
pub use dump::{dump, dump_to};
pub use error::{ErrorKind, JsonResult, ParseError};
pub use limits::{Limits, DEFAULT_MAX_DEPTH, MAX_NESTING_DEPTH};
pub use parser::{parse, parse_multi, parse_slice, parse_with_limits, try_parse, Parser};
pub use value::{Array, Json, JsonType, JsonValue, Number, Object};
