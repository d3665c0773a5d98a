use crate::export::classify::{function_source, is_function, is_temporal, DATE_KEY};
use crate::export::render::render_date;
use serde_json::{Number, Value};

/// Coarse runtime category; values in different categories are never equal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Array,
    Object,
    Function,
    Temporal,
    Other,
}

impl Category {
    fn of(value: &Value) -> Self {
        match value {
            Value::Array(_) => Category::Array,
            _ if is_function(value) => Category::Function,
            _ if is_temporal(value) => Category::Temporal,
            Value::Object(_) => Category::Object,
            _ => Category::Other,
        }
    }
}

/// Structural equality over documents.
///
/// Arrays need the same length and pairwise-equal elements; objects need the
/// same key count and every key of `a` equal in `b`. Functions (`$code`)
/// compare by source text, so two functions with identical source are equal.
/// Scalars compare by value within the same JSON type, numbers numerically.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    let category = Category::of(a);
    if category != Category::of(b) {
        return false;
    }

    match (category, a, b) {
        (Category::Array, Value::Array(left), Value::Array(right)) => {
            left.len() == right.len()
                && left.iter().zip(right.iter()).all(|(l, r)| deep_equal(l, r))
        }
        (Category::Object, Value::Object(left), Value::Object(right)) => {
            left.len() == right.len()
                && left
                    .iter()
                    .all(|(key, l)| right.get(key).map_or(false, |r| deep_equal(l, r)))
        }
        (Category::Function, Value::Object(left), Value::Object(right)) => {
            function_source(left) == function_source(right)
        }
        (Category::Temporal, Value::Object(left), Value::Object(right)) => {
            match (left.get(DATE_KEY), right.get(DATE_KEY)) {
                (Some(l), Some(r)) => render_date(l) == render_date(r),
                _ => false,
            }
        }
        _ => scalar_equal(a, b),
    }
}

fn scalar_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(l), Value::Bool(r)) => l == r,
        (Value::String(l), Value::String(r)) => l == r,
        (Value::Number(l), Value::Number(r)) => number_equal(l, r),
        _ => false,
    }
}

fn number_equal(l: &Number, r: &Number) -> bool {
    if let (Some(l), Some(r)) = (l.as_i64(), r.as_i64()) {
        return l == r;
    }
    if let (Some(l), Some(r)) = (l.as_u64(), r.as_u64()) {
        return l == r;
    }
    match (l.as_f64(), r.as_f64()) {
        (Some(l), Some(r)) => l == r,
        _ => false,
    }
}
