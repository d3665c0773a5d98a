//! Loading datasets from JSON input
//!
//! Accepts a top-level JSON array (one document per element), a single JSON
//! document, or newline-delimited JSON. Whole-document input goes through
//! SIMD-accelerated parsing first and falls back to line-by-line parsing.

use anyhow::{Context, Result};
use serde_json::Value;
use std::io::{BufReader, Read};

/// Read every document from `reader`
pub fn read_documents<R: Read>(reader: R, ndjson: bool) -> Result<Vec<Value>> {
    let mut content = Vec::new();
    BufReader::new(reader)
        .read_to_end(&mut content)
        .context("Failed to read input")?;

    if ndjson {
        return read_lines(&content);
    }

    // simd-json parses in place, so keep the original bytes for the fallback
    let mut scratch = content.clone();
    match simd_json::serde::from_slice::<Value>(&mut scratch) {
        Ok(Value::Array(documents)) => Ok(documents),
        Ok(document) => Ok(vec![document]),
        Err(err) => {
            tracing::debug!(error = %err, "Input is not a single JSON document, reading as NDJSON");
            read_lines(&content)
        }
    }
}

fn read_lines(content: &[u8]) -> Result<Vec<Value>> {
    let text = String::from_utf8_lossy(content);
    let mut documents = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line)
            .with_context(|| format!("Failed to parse JSON on line {}", idx + 1))?;
        documents.push(value);
    }

    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_input() {
        let docs = read_documents(r#"[{"a": 1}, {"b": 2}]"#.as_bytes(), false).unwrap();
        assert_eq!(docs, vec![json!({"a": 1}), json!({"b": 2})]);
    }

    #[test]
    fn test_single_document() {
        let docs = read_documents(r#"{"a": {"b": true}}"#.as_bytes(), false).unwrap();
        assert_eq!(docs, vec![json!({"a": {"b": true}})]);
    }

    #[test]
    fn test_ndjson_fallback() {
        let input = "{\"a\": 1}\n\n{\"a\": 2}\n";
        let docs = read_documents(input.as_bytes(), false).unwrap();
        assert_eq!(docs, vec![json!({"a": 1}), json!({"a": 2})]);
    }

    #[test]
    fn test_ndjson_flag_keeps_arrays_whole() {
        let docs = read_documents("[1, 2]\n".as_bytes(), true).unwrap();
        assert_eq!(docs, vec![json!([1, 2])]);
    }

    #[test]
    fn test_key_order_is_preserved() {
        let docs = read_documents(r#"{"z": 1, "a": 2, "m": 3}"#.as_bytes(), false).unwrap();
        let keys: Vec<&String> = docs[0].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_invalid_line_reports_position() {
        let err = read_documents("{\"a\": 1}\nnot json\n".as_bytes(), true).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
