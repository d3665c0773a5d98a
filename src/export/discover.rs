use crate::export::classify::{classify, is_plain_object};
use crate::export::render::join_values;
use crate::types::{ExportConfig, FieldSet, NormalizedRecord, ObjectArrayMode, Shape};
use serde_json::{Map, Value};

/// Discovers column paths across a dataset and normalizes each record.
///
/// The field set is shared by every record passed through the same
/// discoverer: a path first seen in the 17th record still becomes a column
/// for the first 16.
pub struct FieldDiscoverer {
    config: ExportConfig,
    fields: FieldSet,
}

/// The outcome of discovering a whole dataset
#[derive(Debug, Clone)]
pub struct Discovery {
    pub fields: FieldSet,
    pub records: Vec<NormalizedRecord>,
}

impl FieldDiscoverer {
    pub fn new(config: ExportConfig) -> Self {
        Self::with_fields(config, FieldSet::new())
    }

    /// Continue discovery on top of an existing field set
    pub fn with_fields(config: ExportConfig, fields: FieldSet) -> Self {
        FieldDiscoverer { config, fields }
    }

    /// Fields discovered so far
    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    /// Record the paths of one document and return its normalized copy
    pub fn discover_record(&mut self, record: &Value) -> NormalizedRecord {
        match record {
            Value::Object(obj) => self.visit(obj, ""),
            other => {
                tracing::warn!(
                    kind = value_kind(other),
                    "Skipping non-object record; it will export as an empty row"
                );
                Map::new()
            }
        }
    }

    pub fn finish(self) -> FieldSet {
        self.fields
    }

    /// Recursively walk an object, collecting paths under `prefix`
    fn visit(&mut self, obj: &Map<String, Value>, prefix: &str) -> NormalizedRecord {
        let mut normalized = Map::with_capacity(obj.len());

        for (key, value) in obj.iter() {
            let path = format!("{}{}", prefix, key);

            let value = match classify(value) {
                Shape::IdLike | Shape::Scalar => {
                    self.fields.insert(path);
                    value.clone()
                }
                Shape::ArrayOfScalar => {
                    self.fields.insert(path);
                    let items = value.as_array().map(Vec::as_slice).unwrap_or_default();
                    Value::String(join_values(items, &self.config.array_separator))
                }
                Shape::ArrayOfObject => {
                    let items = value.as_array().map(Vec::as_slice).unwrap_or_default();
                    let collapsed = self.collapse_objects(items);
                    let nested_prefix = format!("{}{}", path, self.config.path_separator);
                    let nested = self.visit(&collapsed, &nested_prefix);
                    // An empty merge would rediscover as a scalar column; keep
                    // the array so a second pass still contributes nothing
                    if nested.is_empty() {
                        value.clone()
                    } else {
                        Value::Object(nested)
                    }
                }
                Shape::Object => match value {
                    Value::Object(nested) => {
                        let nested_prefix = format!("{}{}", path, self.config.path_separator);
                        Value::Object(self.visit(nested, &nested_prefix))
                    }
                    _ => value.clone(),
                },
                Shape::Unset => value.clone(),
            };

            normalized.insert(key.clone(), value);
        }

        normalized
    }

    /// Collapse an array of objects into one object according to the
    /// configured mode
    fn collapse_objects(&self, items: &[Value]) -> Map<String, Value> {
        let mut collapsed = Map::new();

        match self.config.object_arrays {
            ObjectArrayMode::Merge => {
                // Later elements overwrite earlier ones on key collision
                for item in items.iter().filter(|item| is_plain_object(item)) {
                    if let Value::Object(obj) = item {
                        for (key, value) in obj.iter() {
                            collapsed.insert(key.clone(), value.clone());
                        }
                    }
                }
            }
            ObjectArrayMode::Indexed => {
                for (idx, item) in items.iter().enumerate() {
                    collapsed.insert(idx.to_string(), item.clone());
                }
            }
        }

        collapsed
    }
}

/// Discover fields across a dataset and normalize every record
pub fn discover(dataset: &[Value], config: &ExportConfig) -> Discovery {
    let mut discoverer = FieldDiscoverer::new(config.clone());
    let records = dataset
        .iter()
        .map(|record| discoverer.discover_record(record))
        .collect();
    let fields = discoverer.finish();

    tracing::debug!(records = dataset.len(), fields = fields.len(), "Field discovery complete");

    Discovery { fields, records }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paths(fields: &FieldSet) -> Vec<&str> {
        fields.iter().collect()
    }

    #[test]
    fn test_scalar_array_is_joined() {
        let discovery = discover(&[json!({"tags": [1, 2, 3]})], &ExportConfig::default());

        assert_eq!(paths(&discovery.fields), vec!["tags"]);
        assert_eq!(discovery.records[0]["tags"], json!("1,2,3"));
    }

    #[test]
    fn test_nested_object() {
        let discovery = discover(&[json!({"a": {"b": 1, "c": 2}})], &ExportConfig::default());

        assert_eq!(paths(&discovery.fields), vec!["a.b", "a.c"]);
        assert_eq!(discovery.records[0]["a"], json!({"b": 1, "c": 2}));
    }

    #[test]
    fn test_object_id_is_scalar_column() {
        let discovery = discover(
            &[json!({
                "_id": "507f1f77bcf86cd799439011",
                "owner": {"$oid": "507f191e810c19729de860ea"}
            })],
            &ExportConfig::default(),
        );

        assert_eq!(paths(&discovery.fields), vec!["_id", "owner"]);
    }

    #[test]
    fn test_object_array_merges_last_wins() {
        let discovery = discover(
            &[json!({
                "variants": [
                    {"sku": "A1", "color": "red"},
                    {"sku": "A2", "size": "M"}
                ]
            })],
            &ExportConfig::default(),
        );

        assert_eq!(
            paths(&discovery.fields),
            vec!["variants.sku", "variants.color", "variants.size"]
        );
        assert_eq!(
            discovery.records[0]["variants"],
            json!({"sku": "A2", "color": "red", "size": "M"})
        );
    }

    #[test]
    fn test_object_array_indexed_mode() {
        let config = ExportConfig {
            object_arrays: ObjectArrayMode::Indexed,
            ..ExportConfig::default()
        };
        let discovery = discover(
            &[json!({"items": [{"name": "x"}, {"name": "y", "qty": 2}]})],
            &config,
        );

        assert_eq!(
            paths(&discovery.fields),
            vec!["items.0.name", "items.1.name", "items.1.qty"]
        );
    }

    #[test]
    fn test_nested_arrays_inside_object_arrays() {
        let discovery = discover(
            &[json!({"posts": [{"title": "Hi", "tags": ["rust", "csv"]}]})],
            &ExportConfig::default(),
        );

        assert_eq!(paths(&discovery.fields), vec!["posts.title", "posts.tags"]);
        assert_eq!(discovery.records[0]["posts"]["tags"], json!("rust,csv"));
    }

    #[test]
    fn test_ragged_records_accumulate() {
        let discovery = discover(
            &[json!({"a": 1}), json!({"a": 1, "b": 2})],
            &ExportConfig::default(),
        );

        assert_eq!(paths(&discovery.fields), vec!["a", "b"]);
        assert!(!discovery.records[0].contains_key("b"));
    }

    #[test]
    fn test_falsy_values_add_no_column() {
        let discovery = discover(
            &[json!({"stock": 0, "active": false, "note": "", "gone": null, "name": "x"})],
            &ExportConfig::default(),
        );

        assert_eq!(paths(&discovery.fields), vec!["name"]);
        // values are carried through untouched
        assert_eq!(discovery.records[0]["stock"], json!(0));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let input = vec![json!({"tags": ["a", "b"], "lines": [{"q": 1}]})];
        let before = input.clone();

        let _ = discover(&input, &ExportConfig::default());

        assert_eq!(input, before);
    }

    #[test]
    fn test_non_object_record_is_empty_row() {
        let discovery = discover(&[json!("oops"), json!({"a": "x"})], &ExportConfig::default());

        assert!(discovery.records[0].is_empty());
        assert_eq!(paths(&discovery.fields), vec!["a"]);
    }

    #[test]
    fn test_rediscovery_is_a_no_op() {
        let dataset = vec![
            json!({"_id": "507f1f77bcf86cd799439011", "tags": ["x", "y"], "meta": {"k": "v"}}),
            json!({"lines": [{"sku": "A", "qty": 2}, {"sku": "B"}], "empty": {}}),
        ];
        let config = ExportConfig::default();
        let first = discover(&dataset, &config);

        let mut again = FieldDiscoverer::with_fields(config.clone(), first.fields.clone());
        for record in &first.records {
            again.discover_record(&Value::Object(record.clone()));
        }
        assert_eq!(again.finish(), first.fields);

        let normalized: Vec<Value> = first.records.iter().cloned().map(Value::Object).collect();
        let fresh = discover(&normalized, &config);
        assert_eq!(fresh.fields, first.fields);
    }

    #[test]
    fn test_rediscovery_of_empty_object_arrays() {
        let dataset = vec![
            json!({"lines": [{}], "name": "x"}),
            json!({"lines": [{}, "x"]}),
            json!({"lines": [{}, {}], "meta": {"parts": [{}]}}),
        ];
        let config = ExportConfig::default();
        let first = discover(&dataset, &config);
        assert_eq!(paths(&first.fields), vec!["name"]);

        let mut again = FieldDiscoverer::with_fields(config.clone(), first.fields.clone());
        for record in &first.records {
            let renormalized = again.discover_record(&Value::Object(record.clone()));
            assert_eq!(&renormalized, record);
        }
        assert_eq!(again.finish(), first.fields);

        let normalized: Vec<Value> = first.records.iter().cloned().map(Value::Object).collect();
        assert_eq!(discover(&normalized, &config).fields, first.fields);
    }

    #[test]
    fn test_custom_separators() {
        let config = ExportConfig {
            array_separator: String::from("|"),
            path_separator: String::from("/"),
            ..ExportConfig::default()
        };
        let discovery = discover(&[json!({"a": {"b": ["x", "y"]}})], &config);

        assert_eq!(paths(&discovery.fields), vec!["a/b"]);
        assert_eq!(discovery.records[0]["a"]["b"], json!("x|y"));
    }
}
