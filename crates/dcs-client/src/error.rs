//! Error types for the chart source client.

use thiserror::Error;

/// Errors that can occur while talking to the collaborator endpoints.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// Base URL cannot be used.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Request could not be sent or the connection failed.
    #[error("network error: {0}")]
    Network(String),

    /// Request exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// Endpoint answered with a non-success status.
    #[error("endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body does not have the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Returns a user-friendly error message suitable for display in the UI.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::InvalidUrl { .. } => "The chart server address is not valid.",
            Self::Network(_) => {
                "Could not connect to the chart server. Please check your connection."
            }
            Self::Timeout => "The chart server took too long to respond.",
            Self::Status { status, .. } if *status == 404 => "The patient chart was not found.",
            Self::Status { status, .. } if *status == 401 || *status == 403 => {
                "You are not allowed to view this chart."
            }
            Self::Status { .. } => "The chart server reported an error.",
            Self::Decode(_) => "The chart server sent data in an unexpected format.",
        }
    }

    /// Returns whether this error is potentially recoverable with a retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout => true,
            Self::Status { status, .. } => *status >= 500 || *status == 408 || *status == 429,
            Self::InvalidUrl { .. } | Self::Decode(_) => false,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<dcs_ingest::IngestError> for ClientError {
    fn from(err: dcs_ingest::IngestError) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
