use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::error::ExportError;
use indexmap::IndexSet;
use std::path::PathBuf;

/// A normalized record, ready to be resolved column by column
pub type NormalizedRecord = Map<String, Value>;

/// The structural shape of one value, as seen by field discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// 24-hex-character identifier, kept as an opaque scalar
    IdLike,
    /// Non-empty array whose first element is not a plain object
    ArrayOfScalar,
    /// Non-empty array whose first element is a plain object
    ArrayOfObject,
    /// Non-empty plain object, recursed into
    Object,
    /// Any other truthy value
    Scalar,
    /// Absent or falsy value, skipped
    Unset,
}

/// Ordered, deduplicated collection of column paths.
///
/// Paths keep the order in which they were first discovered. The set only
/// ever grows; use [`FieldSet::sorted`] to get the final column order.
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    paths: IndexSet<String>,
}

impl FieldSet {
    pub fn new() -> Self {
        FieldSet::default()
    }

    /// Append a path if it is not already present. Returns true if it was added.
    pub fn insert(&mut self, path: impl Into<String>) -> bool {
        self.paths.insert(path.into())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Paths in discovery order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// Paths in output column order
    pub fn sorted(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.paths.iter().cloned().collect();
        paths.sort_by(|a, b| crate::export::collate::locale_cmp(a, b));
        paths
    }
}

/// Two field sets are equal when they hold the same paths in the same
/// discovery order
impl PartialEq for FieldSet {
    fn eq(&self, other: &Self) -> bool {
        self.paths.iter().eq(other.paths.iter())
    }
}

impl Eq for FieldSet {}

impl<S: Into<String>> FromIterator<S> for FieldSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut fields = FieldSet::new();
        for path in iter {
            fields.insert(path);
        }
        fields
    }
}

/// How arrays of objects are collapsed into a single object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectArrayMode {
    /// Assign every element's properties onto one object; later elements win
    #[default]
    Merge,
    /// Key each element by its index (`items.0.name`, `items.1.name`)
    Indexed,
}

/// Row terminator written after every CSV record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

/// Configuration for the export process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Field delimiter
    pub delimiter: char,

    /// Quote character wrapped around every field
    pub quote: char,

    /// Row terminator
    pub line_ending: LineEnding,

    /// Separator used when joining arrays of scalars into one cell
    pub array_separator: String,

    /// Separator between keys of a column path
    pub path_separator: String,

    /// How arrays of objects are collapsed
    pub object_arrays: ObjectArrayMode,

    /// Whether to emit a header row with the column paths
    pub include_header: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            delimiter: ';',
            quote: '"',
            line_ending: LineEnding::Lf,
            array_separator: String::from(","),
            path_separator: String::from("."),
            object_arrays: ObjectArrayMode::Merge,
            include_header: true,
        }
    }
}

impl ExportConfig {
    /// Check the settings the CSV writer and path resolution depend on.
    ///
    /// Delimiter and quote must be single-byte characters, and the path
    /// separator must be non-empty or joined paths could not be split again.
    pub fn validate(&self) -> crate::Result<()> {
        for (name, value) in [("delimiter", self.delimiter), ("quote", self.quote)] {
            if !value.is_ascii() {
                return Err(ExportError::InvalidDialect { name, value });
            }
        }
        if self.path_separator.is_empty() {
            return Err(ExportError::EmptySeparator { name: "path_separator" });
        }
        Ok(())
    }
}

/// The result of an export: CSV text plus where it is meant to go
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportArtifact {
    /// Full CSV text
    pub text: String,

    /// Requested file name
    pub file: String,

    /// Directory the file belongs in (created before the artifact is returned)
    pub export_path: PathBuf,
}

impl ExportArtifact {
    /// Full path of the exported file
    pub fn target(&self) -> PathBuf {
        self.export_path.join(&self.file)
    }

    /// Write the CSV text to `export_path/file`, creating the directory first
    pub fn write_to_disk(&self) -> crate::Result<PathBuf> {
        std::fs::create_dir_all(&self.export_path)?;
        let target = self.target();
        std::fs::write(&target, self.text.as_bytes())?;
        tracing::info!(path = %target.display(), bytes = self.text.len(), "Export written");
        Ok(target)
    }
}
