//! Audit records.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::diff::diff;
use crate::error::{AuditError, Result};

// =============================================================================
// AUDIT ACTION
// =============================================================================

/// Kind of mutation an audit record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    /// Entity created: after only.
    Create,
    /// Entity edited: before and after.
    Update,
    /// Entity removed: before only.
    Delete,
}

impl AuditAction {
    /// Get the display label for this action.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Create => "Created",
            Self::Update => "Updated",
            Self::Delete => "Deleted",
        }
    }

    /// Whether a before/after presence pattern is complete for this action.
    pub fn accepts(&self, has_before: bool, has_after: bool) -> bool {
        match self {
            Self::Create => !has_before && has_after,
            Self::Update => has_before && has_after,
            Self::Delete => has_before && !has_after,
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        };
        f.write_str(name)
    }
}

// =============================================================================
// AUDIT RECORD
// =============================================================================

/// One mutation of one entity, with its complete before/after pair.
///
/// Records are immutable. The only ways to obtain one are [`AuditRecord::new`]
/// and deserialization, and both reject incomplete pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AuditRecordWire")]
pub struct AuditRecord {
    entity_type: String,
    entity_id: String,
    action: AuditAction,
    actor: String,
    created_at: DateTime<Utc>,
    before: Option<Value>,
    after: Option<Value>,
}

/// Unvalidated wire shape.
#[derive(Deserialize)]
struct AuditRecordWire {
    entity_type: String,
    entity_id: String,
    action: AuditAction,
    actor: String,
    created_at: DateTime<Utc>,
    #[serde(default)]
    before: Option<Value>,
    #[serde(default)]
    after: Option<Value>,
}

impl TryFrom<AuditRecordWire> for AuditRecord {
    type Error = AuditError;

    fn try_from(wire: AuditRecordWire) -> Result<Self> {
        Self::new(
            wire.entity_type,
            wire.entity_id,
            wire.action,
            wire.actor,
            wire.created_at,
            wire.before,
            wire.after,
        )
    }
}

impl AuditRecord {
    /// Build a record, validating that the pair matches the action.
    ///
    /// Identity fields and the actor must be non-blank. JSON `null` snapshots
    /// count as absent.
    pub fn new(
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
        action: AuditAction,
        actor: impl Into<String>,
        created_at: DateTime<Utc>,
        before: Option<Value>,
        after: Option<Value>,
    ) -> Result<Self> {
        let entity_type = entity_type.into();
        let entity_id = entity_id.into();
        let actor = actor.into();
        if entity_type.trim().is_empty() {
            return Err(AuditError::EmptyField("entity_type"));
        }
        if entity_id.trim().is_empty() {
            return Err(AuditError::EmptyField("entity_id"));
        }
        if actor.trim().is_empty() {
            return Err(AuditError::EmptyField("actor"));
        }

        let before = before.filter(|value| !value.is_null());
        let after = after.filter(|value| !value.is_null());
        if !action.accepts(before.is_some(), after.is_some()) {
            return Err(AuditError::IncompletePair {
                action,
                has_before: before.is_some(),
                has_after: after.is_some(),
            });
        }

        Ok(Self {
            entity_type,
            entity_id,
            action,
            actor,
            created_at,
            before,
            after,
        })
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn action(&self) -> AuditAction {
        self.action
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn before(&self) -> Option<&Value> {
        self.before.as_ref()
    }

    pub fn after(&self) -> Option<&Value> {
        self.after.as_ref()
    }

    /// Changed field names; empty for creations and deletions.
    pub fn changed_fields(&self) -> Vec<String> {
        diff(self.before(), self.after())
    }
}
