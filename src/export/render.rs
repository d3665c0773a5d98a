//! Text rendering of document values
//!
//! One rendering is shared by array joins, duplicate detection and CSV cells,
//! so a value always reads the same wherever it ends up.

use crate::export::classify::{function_source, object_id, DATE_KEY};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Number, Value};

/// Render a value as the text of one CSV cell
pub fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => render_number(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => join_values(items, ","),
        Value::Object(obj) => render_object(obj),
    }
}

/// Render every item and join them with `separator`; nulls become empty
pub fn join_values(items: &[Value], separator: &str) -> String {
    items
        .iter()
        .map(render_cell)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Integers verbatim, integral floats without a fractional part, other
/// floats in shortest round-trip form. Magnitudes of at least `1e21` or below
/// `1e-6` switch to exponent notation (`1e+21`, `1.5e-7`), as JavaScript
/// prints them.
pub fn render_number(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => String::from("0"),
        Some(f) if f.abs() >= 1e21 || f.abs() < 1e-6 => render_exponent(f),
        Some(f) if f.fract() == 0.0 => format!("{:.0}", f),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// `{:e}` already gives the shortest mantissa; only the exponent sign differs
fn render_exponent(f: f64) -> String {
    let formatted = format!("{:e}", f);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

fn render_object(obj: &Map<String, Value>) -> String {
    if let Some(id) = object_id(obj) {
        return id.to_string();
    }
    if let Some(source) = function_source(obj) {
        return source.to_string();
    }
    if obj.len() == 1 {
        if let Some(date) = obj.get(DATE_KEY) {
            return render_date(date);
        }
    }
    serde_json::to_string(obj).unwrap_or_default()
}

/// `$date` payloads: ISO strings pass through, epoch milliseconds
/// (plain or `$numberLong`) become `YYYY-MM-DDTHH:MM:SS.sssZ`
pub(crate) fn render_date(date: &Value) -> String {
    let millis = match date {
        Value::String(s) => return s.clone(),
        Value::Number(n) => n.as_i64(),
        Value::Object(inner) => inner
            .get("$numberLong")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<i64>().ok()),
        _ => None,
    };

    match millis.and_then(DateTime::<Utc>::from_timestamp_millis) {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => render_cell(date),
    }
}
