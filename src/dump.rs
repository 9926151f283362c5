//! Canonical single-line serialization.
//!
//! Output is deterministic: object keys come out in sorted order (the
//! natural order of the underlying map), separators are always `", "` and
//! `": "`, and there is no configurable indentation. Numbers that JSON cannot
//! represent (NaN, infinities) are written as `null`.

use crate::value::{Json, JsonValue, Number};

/// Serialize a value to JSON text.
pub fn dump(value: &Json) -> String {
    let mut output = String::new();
    dump_to(value, &mut output);
    output
}

/// Serialize a value, appending to `output`.
pub fn dump_to(value: &Json, output: &mut String) {
    match value.value() {
        JsonValue::Null => output.push_str("null"),
        JsonValue::Bool(true) => output.push_str("true"),
        JsonValue::Bool(false) => output.push_str("false"),
        JsonValue::Number(n) => serialize_number(*n, output),
        JsonValue::String(s) => serialize_string(s, output),
        JsonValue::Array(items) => {
            output.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    output.push_str(", ");
                }
                dump_to(item, output);
            }
            output.push(']');
        }
        JsonValue::Object(members) => {
            output.push('{');
            for (i, (key, item)) in members.iter().enumerate() {
                if i > 0 {
                    output.push_str(", ");
                }
                serialize_string(key, output);
                output.push_str(": ");
                dump_to(item, output);
            }
            output.push('}');
        }
    }
}

/// Shortest decimal form that reads back to the same `f64`.
fn serialize_number(n: Number, output: &mut String) {
    match n {
        Number::Int(i) => output.push_str(&i.to_string()),
        Number::Float(f) if f.is_finite() => output.push_str(&f.to_string()),
        Number::Float(_) => output.push_str("null"),
    }
}

/// Quote and escape a string. `/` and non-ASCII pass through untouched.
fn serialize_string(s: &str, output: &mut String) {
    output.push('"');
    for ch in s.chars() {
        match ch {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\x08' => output.push_str("\\b"),
            '\x0C' => output.push_str("\\f"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            c if c < '\x20' => output.push_str(&format!("\\u{:04X}", c as u32)),
            c => output.push(c),
        }
    }
    output.push('"');
}
