//! JSON value types.
//!
//! [`Json`] is a cheap, shareable handle to an immutable [`JsonValue`].
//! Cloning a handle bumps a reference count; the payload itself is never
//! copied or modified after construction. Null, `true` and `false` are
//! process-wide singletons, so building them never allocates.
//!
//! Two layers sit on top of the representation:
//!
//! - [`Json::value`] exposes the enum for exhaustive pattern matching.
//! - The accessors (`number_value`, `string_value`, indexing, ...) never fail.
//!   On a type mismatch they return a neutral default instead.
//!
//! Values are totally ordered: first by [`JsonType`] rank, then by payload.
//! Numbers compare through their `f64` projection regardless of whether they
//! were built from an integer or a float.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use once_cell::sync::Lazy;

/// Array payload.
pub type Array = Vec<Json>;

/// Object payload. Keys iterate (and serialize) in sorted order.
pub type Object = BTreeMap<String, Json>;

static NULL: Lazy<Json> = Lazy::new(|| Json::alloc(JsonValue::Null));
static TRUE: Lazy<Json> = Lazy::new(|| Json::alloc(JsonValue::Bool(true)));
static FALSE: Lazy<Json> = Lazy::new(|| Json::alloc(JsonValue::Bool(false)));
static EMPTY_OBJECT: Object = BTreeMap::new();

/// Variant tag, declared in ordering rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JsonType {
    /// `null`
    Null,
    /// Any number
    Number,
    /// A string
    String,
    /// `true` or `false`
    Bool,
    /// An ordered sequence of values
    Array,
    /// A key-sorted map of values
    Object,
}

impl JsonType {
    /// Lowercase name, for messages.
    pub fn name(self) -> &'static str {
        match self {
            JsonType::Null => "null",
            JsonType::Number => "number",
            JsonType::String => "string",
            JsonType::Bool => "boolean",
            JsonType::Array => "array",
            JsonType::Object => "object",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A JSON number.
///
/// `Int` holds integral values exactly, so they print back with every digit.
/// Comparison never looks at the variant: `Int(1) == Float(1.0)`, and
/// integers beyond 2^53 compare through their rounded `f64` projection.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// Integer-valued number
    Int(i64),
    /// Any other number
    Float(f64),
}

impl Number {
    /// The `f64` projection used for comparison.
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(f) => f,
        }
    }

    /// Integer projection: truncates toward zero, saturates at the `i64`
    /// bounds, NaN becomes 0.
    pub fn as_i64(self) -> i64 {
        match self {
            Number::Int(n) => n,
            Number::Float(f) => f as i64,
        }
    }

    /// Whether the number can be written as JSON.
    pub fn is_finite(self) -> bool {
        match self {
            Number::Int(_) => true,
            Number::Float(f) => f.is_finite(),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (self.as_f64(), other.as_f64());
        // IEEE order where it is defined (so 0.0 == -0.0); NaNs fall back to
        // the bitwise total order.
        a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
    }
}

/// The payload behind a [`Json`] handle.
///
/// Variants are declared in [`JsonType`] rank, so the derived ordering is
/// "tag first, then payload".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum JsonValue {
    /// JSON null literal
    Null,
    /// JSON number
    Number(Number),
    /// JSON string
    String(String),
    /// JSON boolean
    Bool(bool),
    /// JSON array
    Array(Array),
    /// JSON object
    Object(Object),
}

impl JsonValue {
    /// Variant tag.
    pub fn json_type(&self) -> JsonType {
        match self {
            JsonValue::Null => JsonType::Null,
            JsonValue::Number(_) => JsonType::Number,
            JsonValue::String(_) => JsonType::String,
            JsonValue::Bool(_) => JsonType::Bool,
            JsonValue::Array(_) => JsonType::Array,
            JsonValue::Object(_) => JsonType::Object,
        }
    }
}

/// Shared handle to an immutable JSON value.
#[derive(Clone)]
pub struct Json {
    value: Arc<JsonValue>,
}

impl Json {
    fn alloc(value: JsonValue) -> Self {
        Self {
            value: Arc::new(value),
        }
    }

    /// The null value.
    pub fn null() -> Self {
        NULL.clone()
    }

    /// Build an array from anything convertible to `Json`.
    pub fn array<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Json>,
    {
        Self::alloc(JsonValue::Array(items.into_iter().map(Into::into).collect()))
    }

    /// Build an object from key/value pairs. A repeated key keeps its last value.
    pub fn object<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Json>,
    {
        Self::alloc(JsonValue::Object(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }

    /// The underlying value, for exhaustive matching.
    pub fn value(&self) -> &JsonValue {
        &self.value
    }

    /// Variant tag.
    pub fn json_type(&self) -> JsonType {
        self.value.json_type()
    }

    /// Returns true if this is a null value.
    pub fn is_null(&self) -> bool {
        self.json_type() == JsonType::Null
    }

    /// Returns true if this is a number value.
    pub fn is_number(&self) -> bool {
        self.json_type() == JsonType::Number
    }

    /// Returns true if this is a string value.
    pub fn is_string(&self) -> bool {
        self.json_type() == JsonType::String
    }

    /// Returns true if this is a boolean value.
    pub fn is_bool(&self) -> bool {
        self.json_type() == JsonType::Bool
    }

    /// Returns true if this is an array value.
    pub fn is_array(&self) -> bool {
        self.json_type() == JsonType::Array
    }

    /// Returns true if this is an object value.
    pub fn is_object(&self) -> bool {
        self.json_type() == JsonType::Object
    }

    /// The number as `f64`, or `0.0` if this is not a number.
    pub fn number_value(&self) -> f64 {
        match self.value() {
            JsonValue::Number(n) => n.as_f64(),
            _ => 0.0,
        }
    }

    /// The number truncated toward zero, or `0` if this is not a number.
    pub fn int_value(&self) -> i64 {
        match self.value() {
            JsonValue::Number(n) => n.as_i64(),
            _ => 0,
        }
    }

    /// The boolean, or `false` if this is not a boolean.
    pub fn bool_value(&self) -> bool {
        matches!(self.value(), JsonValue::Bool(true))
    }

    /// The string contents, or `""` if this is not a string.
    pub fn string_value(&self) -> &str {
        match self.value() {
            JsonValue::String(s) => s,
            _ => "",
        }
    }

    /// The array elements, or an empty slice if this is not an array.
    pub fn array_items(&self) -> &[Json] {
        match self.value() {
            JsonValue::Array(items) => items,
            _ => &[],
        }
    }

    /// The object members, or an empty map if this is not an object.
    pub fn object_items(&self) -> &Object {
        match self.value() {
            JsonValue::Object(members) => members,
            _ => &EMPTY_OBJECT,
        }
    }

    /// Array element at `index`, if this is an array and the index is in bounds.
    pub fn get(&self, index: usize) -> Option<&Json> {
        self.array_items().get(index)
    }

    /// Object member under `key`, if this is an object and the key is present.
    pub fn get_key(&self, key: &str) -> Option<&Json> {
        self.object_items().get(key)
    }

    /// Byte length of a string, element count of an array or object, else 0.
    pub fn size(&self) -> usize {
        match self.value() {
            JsonValue::String(s) => s.len(),
            JsonValue::Array(items) => items.len(),
            JsonValue::Object(members) => members.len(),
            _ => 0,
        }
    }

    /// A new array with `item` appended. Non-arrays are treated as `[]`.
    ///
    /// Existing elements are shared with `self`, not deep-copied.
    pub fn push(&self, item: impl Into<Json>) -> Json {
        let mut items = self.array_items().to_vec();
        items.push(item.into());
        Json::from(items)
    }

    /// A new object with `key` set to `value`. Non-objects are treated as `{}`.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Json>) -> Json {
        let mut members = self.object_items().clone();
        members.insert(key.into(), value.into());
        Json::from(members)
    }

    /// Serialize to a single-line JSON document. See [`crate::dump`].
    pub fn dump(&self) -> String {
        crate::dump::dump(self)
    }
}

impl Default for Json {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Debug for Json {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.value(), f)
    }
}

impl fmt::Display for Json {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump())
    }
}

impl PartialEq for Json {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.value, &other.value) || self.value == other.value
    }
}

impl Eq for Json {}

impl PartialOrd for Json {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Json {
    fn cmp(&self, other: &Self) -> Ordering {
        if Arc::ptr_eq(&self.value, &other.value) {
            return Ordering::Equal;
        }
        self.value.cmp(&other.value)
    }
}

impl Index<usize> for Json {
    type Output = Json;

    /// Never panics: out of bounds or non-array yields null.
    fn index(&self, index: usize) -> &Json {
        self.get(index).unwrap_or(&*NULL)
    }
}

impl Index<&str> for Json {
    type Output = Json;

    /// Never panics: a missing key or non-object yields null.
    fn index(&self, key: &str) -> &Json {
        self.get_key(key).unwrap_or(&*NULL)
    }
}

impl From<JsonValue> for Json {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Json::null(),
            JsonValue::Bool(b) => Json::from(b),
            other => Json::alloc(other),
        }
    }
}

impl From<()> for Json {
    fn from(_: ()) -> Self {
        Json::null()
    }
}

impl<T: Into<Json>> From<Option<T>> for Json {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Json::null, Into::into)
    }
}

impl From<bool> for Json {
    fn from(value: bool) -> Self {
        if value {
            TRUE.clone()
        } else {
            FALSE.clone()
        }
    }
}

impl From<Number> for Json {
    fn from(value: Number) -> Self {
        Json::alloc(JsonValue::Number(value))
    }
}

impl From<i64> for Json {
    fn from(value: i64) -> Self {
        Json::from(Number::Int(value))
    }
}

impl From<i32> for Json {
    fn from(value: i32) -> Self {
        Json::from(i64::from(value))
    }
}

impl From<u32> for Json {
    fn from(value: u32) -> Self {
        Json::from(i64::from(value))
    }
}

impl From<f64> for Json {
    fn from(value: f64) -> Self {
        Json::from(Number::Float(value))
    }
}

impl From<f32> for Json {
    fn from(value: f32) -> Self {
        Json::from(f64::from(value))
    }
}

impl From<String> for Json {
    fn from(value: String) -> Self {
        Json::alloc(JsonValue::String(value))
    }
}

impl From<&String> for Json {
    fn from(value: &String) -> Self {
        Json::from(value.clone())
    }
}

impl From<&str> for Json {
    fn from(value: &str) -> Self {
        Json::from(value.to_owned())
    }
}

impl From<Array> for Json {
    fn from(value: Array) -> Self {
        Json::alloc(JsonValue::Array(value))
    }
}

impl From<Object> for Json {
    fn from(value: Object) -> Self {
        Json::alloc(JsonValue::Object(value))
    }
}

impl FromIterator<Json> for Json {
    fn from_iter<I: IntoIterator<Item = Json>>(iter: I) -> Self {
        Json::from(iter.into_iter().collect::<Array>())
    }
}

impl FromIterator<(String, Json)> for Json {
    fn from_iter<I: IntoIterator<Item = (String, Json)>>(iter: I) -> Self {
        Json::from(iter.into_iter().collect::<Object>())
    }
}
