//! Render model for one audit log row.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::record::{AuditAction, AuditRecord};
use crate::summary::{AuditSummary, summarize};

/// What the audit log shows for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntryView {
    pub action: AuditAction,
    pub action_label: &'static str,
    pub entity: String,
    pub actor: String,
    pub created_at: DateTime<Utc>,
    pub summary: AuditSummary,
}

impl AuditEntryView {
    /// Build the row for a record, previewing at most `max_preview` fields.
    ///
    /// Creations and deletions have no field diff and render as `"—"`.
    pub fn from_record(record: &AuditRecord, max_preview: usize) -> Self {
        Self {
            action: record.action(),
            action_label: record.action().label(),
            entity: format!("{} {}", record.entity_type(), record.entity_id()),
            actor: record.actor().to_string(),
            created_at: record.created_at(),
            summary: summarize(&record.changed_fields(), max_preview),
        }
    }

    /// Summary text, e.g. `kind, surface +1 more`.
    pub fn summary_text(&self) -> String {
        self.summary.to_string()
    }
}
