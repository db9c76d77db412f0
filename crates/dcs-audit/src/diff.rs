//! Shallow field-level diff.

use serde_json::Value;

/// Field names that differ between two snapshots.
///
/// - Either side absent (or JSON `null`) yields no fields: creations and
///   deletions are described by the action, not by a field diff.
/// - Non-object snapshots yield no fields.
/// - Comparison is shallow: a nested change is reported as its top-level key.
/// - A key present on only one side counts as changed.
///
/// Order is stable: keys of `before` in insertion order, then keys that only
/// `after` has, in insertion order.
pub fn diff(before: Option<&Value>, after: Option<&Value>) -> Vec<String> {
    let (Some(Value::Object(before)), Some(Value::Object(after))) = (before, after) else {
        return Vec::new();
    };

    let changed_or_removed = before
        .iter()
        .filter(|(key, value)| after.get(key.as_str()) != Some(*value))
        .map(|(key, _)| key.clone());
    let added = after
        .keys()
        .filter(|key| !before.contains_key(key.as_str()))
        .cloned();

    changed_or_removed.chain(added).collect()
}
