use crate::export::classify::is_truthy;
use crate::export::render::render_cell;
use serde_json::Value;

/// Whether any two positions hold the same present value.
///
/// A position is present when its value is truthy; two present values are
/// duplicates when their rendered text is equal, so `1` and `"1"` collide.
///
/// Plain objects render as their JSON text, so only objects with the same
/// keys and values collide. This differs from comparing `toString()` output
/// in JavaScript, where every object reads `[object Object]` and any two
/// objects count as duplicates.
pub fn has_duplicate(items: &[Value]) -> bool {
    // Scans one position past the end; `get` resolves it to absent
    for i in 0..=items.len() {
        for j in i..=items.len() {
            if i == j {
                continue;
            }
            let (Some(left), Some(right)) = (present(items.get(i)), present(items.get(j))) else {
                continue;
            };
            if render_cell(left) == render_cell(right) {
                return true;
            }
        }
    }
    false
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| is_truthy(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(v: Value) -> Vec<Value> {
        v.as_array().cloned().unwrap_or_default()
    }

    #[test]
    fn test_duplicates() {
        assert!(has_duplicate(&values(json!(["x", "y", "x"]))));
        assert!(!has_duplicate(&values(json!(["x", "y"]))));
        assert!(!has_duplicate(&[]));
    }

    #[test]
    fn test_compares_by_text() {
        assert!(has_duplicate(&values(json!([1, "1"]))));
        assert!(has_duplicate(&values(json!([[1, 2], "1,2"]))));
        assert!(has_duplicate(&values(json!([
            {"$oid": "507f1f77bcf86cd799439011"},
            "507f1f77bcf86cd799439011"
        ]))));
    }

    #[test]
    fn test_objects_compare_by_content() {
        assert!(!has_duplicate(&values(json!([{"a": 1}, {"b": 2}]))));
        assert!(has_duplicate(&values(json!([{"a": 1}, "x", {"a": 1}]))));
    }

    #[test]
    fn test_absent_values_never_match() {
        assert!(!has_duplicate(&values(json!([null, null, "", "", 0, 0, false, false]))));
        assert!(!has_duplicate(&values(json!(["only"]))));
    }
}
