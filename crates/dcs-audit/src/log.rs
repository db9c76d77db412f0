//! Append-only audit log.

use crate::record::AuditRecord;

/// Audit records in append order.
///
/// There is no API to edit or remove a record.
#[derive(Debug, Clone, Default)]
pub struct AuditLog {
    records: Vec<AuditRecord>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    pub fn append(&mut self, record: AuditRecord) {
        tracing::debug!(
            entity_type = record.entity_type(),
            action = %record.action(),
            changed = record.changed_fields().len(),
            "audit record appended"
        );
        self.records.push(record);
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[AuditRecord] {
        &self.records
    }

    /// Records for one entity, oldest first.
    pub fn for_entity<'a>(
        &'a self,
        entity_type: &'a str,
        entity_id: &'a str,
    ) -> impl Iterator<Item = &'a AuditRecord> + 'a {
        self.records.iter().filter(move |record| {
            record.entity_type() == entity_type && record.entity_id() == entity_id
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Extend<AuditRecord> for AuditLog {
    fn extend<I: IntoIterator<Item = AuditRecord>>(&mut self, iter: I) {
        for record in iter {
            self.append(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::AuditAction;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn record(entity_id: &str, action: AuditAction) -> AuditRecord {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let value = json!({"n": entity_id});
        let (before, after) = match action {
            AuditAction::Create => (None, Some(value)),
            AuditAction::Update => (Some(json!({"n": 0})), Some(value)),
            AuditAction::Delete => (Some(value), None),
        };
        AuditRecord::new("note", entity_id, action, "dr.lee", at, before, after).unwrap()
    }

    #[test]
    fn test_append_and_filter() {
        let mut log = AuditLog::new();
        log.append(record("1", AuditAction::Create));
        log.append(record("2", AuditAction::Create));
        log.append(record("1", AuditAction::Update));

        assert_eq!(log.len(), 3);
        let actions: Vec<AuditAction> = log
            .for_entity("note", "1")
            .map(AuditRecord::action)
            .collect();
        assert_eq!(actions, vec![AuditAction::Create, AuditAction::Update]);
        assert_eq!(log.for_entity("patient", "1").count(), 0);
    }
}
