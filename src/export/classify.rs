//! Structural classification of document values
//!
//! Every value met during field discovery is classified exactly once into a
//! [`Shape`]. The checks run in a fixed order and the first match wins, so an
//! identifier string is never mistaken for anything else.

use crate::types::Shape;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

static OBJECT_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{24}$").unwrap()
});

/// Extended JSON wrapper keys for document-store types
pub(crate) const OID_KEY: &str = "$oid";
pub(crate) const DATE_KEY: &str = "$date";
pub(crate) const CODE_KEY: &str = "$code";

/// Classify a value into the shape field discovery acts on
pub fn classify(value: &Value) -> Shape {
    if is_id_like(value) {
        return Shape::IdLike;
    }

    match value {
        Value::Array(items) if !items.is_empty() => {
            if is_plain_object(&items[0]) {
                Shape::ArrayOfObject
            } else {
                Shape::ArrayOfScalar
            }
        }
        Value::Object(obj) if is_plain_object(value) && !obj.is_empty() => Shape::Object,
        _ if is_truthy(value) => Shape::Scalar,
        _ => Shape::Unset,
    }
}

/// A 24-hex-character string, or an `$oid` wrapper around one
pub fn is_id_like(value: &Value) -> bool {
    match value {
        Value::String(s) => OBJECT_ID_REGEX.is_match(s),
        Value::Object(obj) => object_id(obj).is_some(),
        _ => false,
    }
}

/// A `{"$date": ...}` wrapper
pub fn is_temporal(value: &Value) -> bool {
    matches!(value, Value::Object(obj) if obj.len() == 1 && obj.contains_key(DATE_KEY))
}

/// A `{"$code": "..."}` wrapper, optionally carrying `$scope`
pub fn is_function(value: &Value) -> bool {
    matches!(value, Value::Object(obj) if function_source(obj).is_some())
}

/// An object that is not one of the extended JSON scalar wrappers
pub fn is_plain_object(value: &Value) -> bool {
    matches!(value, Value::Object(_))
        && !is_id_like(value)
        && !is_temporal(value)
        && !is_function(value)
}

/// Truthiness: null, false, zero and the empty string are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub(crate) fn object_id(obj: &Map<String, Value>) -> Option<&str> {
    if obj.len() != 1 {
        return None;
    }
    match obj.get(OID_KEY) {
        Some(Value::String(s)) if OBJECT_ID_REGEX.is_match(s) => Some(s),
        _ => None,
    }
}

pub(crate) fn function_source(obj: &Map<String, Value>) -> Option<&str> {
    let extra_keys = obj.keys().filter(|k| *k != CODE_KEY && *k != "$scope").count();
    if extra_keys > 0 {
        return None;
    }
    obj.get(CODE_KEY).and_then(Value::as_str)
}
