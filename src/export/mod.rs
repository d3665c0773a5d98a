//! Document-to-CSV export
//!
//! Turns a sequence of heterogeneous, arbitrarily nested documents into one
//! flat CSV table without a caller-supplied schema.
//!
//! The export runs in two passes over the dataset:
//!
//! 1. **Discovery** classifies every value, collects the column paths seen in
//!    any record and builds a normalized copy of each record (arrays
//!    collapsed, nothing else touched).
//! 2. **Serialization** sorts the paths, resolves each path in each normalized
//!    record and writes quote-all, `;`-delimited rows.

pub mod classify;
pub mod collate;
pub mod discover;
pub mod render;
pub mod serialize;

pub use classify::{classify, is_id_like, is_temporal, is_truthy};
pub use collate::locale_cmp;
pub use discover::{discover, Discovery, FieldDiscoverer};
pub use render::render_cell;
pub use serialize::{get_by_dot_path, TabularSerializer};
