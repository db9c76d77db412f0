//! Error types for model parsing.

use thiserror::Error;

/// Errors raised when parsing canonical model values from text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModelError {
    /// Text is not a canonical tooth key such as `UR5`.
    #[error("invalid tooth key: '{0}'")]
    InvalidToothKey(String),

    /// Text is not one of the six canonical surface letters.
    #[error("invalid surface: '{0}'")]
    InvalidSurface(String),

    /// Tooth state type is not part of the closed enumeration.
    #[error("unknown tooth state type: '{0}'")]
    UnknownKind(String),

    /// Record source name is empty.
    #[error("record source must not be empty")]
    EmptySource,
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
