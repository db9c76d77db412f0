//! Session error types.

use chrono::{DateTime, Utc};
use dcs_audit::AuditError;
use dcs_chart::ChartError;
use dcs_model::EventId;
use thiserror::Error;

/// Errors raised by chart session operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    /// Restored view state is invalid.
    #[error(transparent)]
    View(#[from] ChartError),

    /// The event to correct does not exist in this chart.
    #[error("chart event {0} not found")]
    UnknownEvent(EventId),

    /// A correction must not predate the event it supersedes.
    #[error("correction at {at} predates event {event} ({occurred_at})")]
    CorrectionPredatesEvent {
        event: EventId,
        occurred_at: DateTime<Utc>,
        at: DateTime<Utc>,
    },

    /// Audit record could not be built.
    #[error(transparent)]
    Audit(#[from] AuditError),

    /// Event snapshot could not be serialized for the audit record.
    #[error("failed to snapshot chart event: {0}")]
    Snapshot(#[from] serde_json::Error),
}

impl SessionError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::View(_) => "The saved chart view could not be restored.".to_string(),
            Self::UnknownEvent(id) => format!("Chart entry {id} no longer exists."),
            Self::CorrectionPredatesEvent { .. } => {
                "A correction must be dated on or after the entry it corrects.".to_string()
            }
            Self::Audit(error) => error.user_message(),
            Self::Snapshot(_) => "The change could not be recorded.".to_string(),
        }
    }
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
