//! Error types for checkin-core.

use thiserror::Error;

/// Result type alias using ImportError.
pub type Result<T> = std::result::Result<T, ImportError>;

/// Errors that can occur while reading a phrase table.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("unreadable CSV: {0}")]
    Malformed(#[from] csv::Error),

    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}
