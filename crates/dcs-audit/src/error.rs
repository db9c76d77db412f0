//! Audit error types.

use thiserror::Error;

use crate::record::AuditAction;

/// Errors raised when building audit records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AuditError {
    /// The snapshot pair does not match the action.
    #[error(
        "incomplete audit pair for {action}: before {}, after {}",
        presence(*has_before),
        presence(*has_after)
    )]
    IncompletePair {
        action: AuditAction,
        has_before: bool,
        has_after: bool,
    },

    /// A required identifying field is empty.
    #[error("audit record field '{0}' must not be empty")]
    EmptyField(&'static str),
}

impl AuditError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::IncompletePair { action, .. } => format!(
                "The {} could not be audited because its change data was incomplete.",
                action.label().to_lowercase()
            ),
            Self::EmptyField(field) => format!("The audit entry is missing its {field}."),
        }
    }
}

fn presence(present: bool) -> &'static str {
    if present { "present" } else { "absent" }
}

/// Result type for audit operations.
pub type Result<T> = std::result::Result<T, AuditError>;
