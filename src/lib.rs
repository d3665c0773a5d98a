//! # docsv - Document to CSV export
//!
//! Flattens schemaless, arbitrarily nested documents into one deterministic
//! CSV table, discovering the columns from the data itself.
//!
//! ## Modules
//!
//! - **export**: value classification, column discovery and CSV rendering
//! - **compare**: structural equality and duplicate detection
//! - **input**: loading datasets from JSON arrays or NDJSON
//!
//! ## Quick Start
//!
//! ```rust
//! use docsv::{export_csv, ExportConfig};
//! use serde_json::json;
//!
//! # fn main() -> docsv::Result<()> {
//! let products = vec![
//!     json!({"_id": "507f1f77bcf86cd799439011", "name": "Mug", "tags": ["kitchen", "gift"]}),
//!     json!({"name": "Lamp", "stock": {"warehouse": 4}}),
//! ];
//!
//! let dir = std::env::temp_dir().join("docsv-doc");
//! let artifact = export_csv(&products, &dir, "products.csv", &ExportConfig::default())?;
//!
//! assert!(artifact.text.starts_with("\"_id\";\"name\";\"stock.warehouse\";\"tags\""));
//! # Ok(())
//! # }
//! ```
//!
//! ## Columns
//!
//! Nested objects become dotted paths (`stock.warehouse`), arrays of scalars
//! are joined into one cell, and arrays of objects are merged into a single
//! object before their keys are expanded. Columns are sorted, and a record
//! lacking a column gets an empty cell.

use serde_json::Value;
use std::path::Path;

pub mod compare;
pub mod error;
pub mod export;
pub mod input;
pub mod types;

// Re-export commonly used types for convenience
pub use compare::{deep_equal, has_duplicate};
pub use error::{ExportError, Result};
pub use export::{discover, Discovery, FieldDiscoverer, TabularSerializer};
pub use input::read_documents;
pub use types::{
    ExportArtifact, ExportConfig, FieldSet, LineEnding, NormalizedRecord, ObjectArrayMode, Shape,
};

/// Main entry point: export a dataset as CSV text destined for `export_dir/file`.
///
/// The directory is created if needed; the text is returned, not written.
/// Call [`ExportArtifact::write_to_disk`] to persist it.
pub fn export_csv<P: AsRef<Path>>(
    dataset: &[Value],
    export_dir: P,
    file: &str,
    config: &ExportConfig,
) -> Result<ExportArtifact> {
    config.validate()?;

    let Discovery { fields, records } = discover(dataset, config);

    let artifact = TabularSerializer::new(config.clone()).serialize(&records, &fields, export_dir, file)?;

    tracing::info!(
        file = %artifact.file,
        records = records.len(),
        columns = fields.len(),
        "Export prepared"
    );
    Ok(artifact)
}
