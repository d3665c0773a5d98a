//! Structural comparison utilities bundled with the exporter

pub mod duplicates;
pub mod equality;

pub use duplicates::has_duplicate;
pub use equality::deep_equal;
