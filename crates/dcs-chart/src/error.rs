//! Error types for view projection.

use thiserror::Error;

/// Errors raised while restoring chart views.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChartError {
    /// A navigable-state parameter has a value that cannot be restored.
    #[error("invalid view parameter {key}='{value}'")]
    InvalidQuery { key: String, value: String },
}

/// Result type for chart operations.
pub type Result<T> = std::result::Result<T, ChartError>;
