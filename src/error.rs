use thiserror::Error;

/// Errors raised while producing an export
#[derive(Debug, Error)]
pub enum ExportError {
    /// Directory creation or file write failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The CSV writer rejected its configuration or output
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    /// A configured delimiter or quote is not a single-byte character
    #[error("{name} must be a single-byte character, got {value:?}")]
    InvalidDialect { name: &'static str, value: char },

    /// A configured separator is empty
    #[error("{name} must not be empty")]
    EmptySeparator { name: &'static str },
}

pub type Result<T> = std::result::Result<T, ExportError>;
