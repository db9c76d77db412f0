//! Truncated change summaries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Text shown when there is nothing to diff.
pub const EMPTY_SUMMARY: &str = "—";

/// First few changed field names plus a count of the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSummary {
    /// Field names shown, in diff order.
    pub preview: Vec<String>,
    /// Number of changed fields not shown.
    pub remaining: usize,
}

impl AuditSummary {
    /// Total changed fields.
    pub fn total(&self) -> usize {
        self.preview.len() + self.remaining
    }

    /// Whether no field changed.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl fmt::Display for AuditSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str(EMPTY_SUMMARY);
        }
        f.write_str(&self.preview.join(", "))?;
        if self.remaining > 0 {
            if !self.preview.is_empty() {
                f.write_str(" ")?;
            }
            write!(f, "+{} more", self.remaining)?;
        }
        Ok(())
    }
}

/// Keep the first `max_preview` names and count the rest.
pub fn summarize(changed: &[String], max_preview: usize) -> AuditSummary {
    let shown = changed.len().min(max_preview);
    AuditSummary {
        preview: changed[..shown].to_vec(),
        remaining: changed.len() - shown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_truncates() {
        let summary = summarize(&names(&["a", "b", "c", "d", "e"]), 2);
        assert_eq!(summary.preview, names(&["a", "b"]));
        assert_eq!(summary.remaining, 3);
        assert_eq!(summary.to_string(), "a, b +3 more");
    }

    #[test]
    fn test_fits() {
        let summary = summarize(&names(&["a", "b"]), 5);
        assert_eq!(summary.remaining, 0);
        assert_eq!(summary.to_string(), "a, b");
    }

    #[test]
    fn test_empty() {
        let summary = summarize(&[], 3);
        assert!(summary.is_empty());
        assert_eq!(summary.to_string(), "—");
    }

    #[test]
    fn test_zero_preview() {
        assert_eq!(summarize(&names(&["a", "b"]), 0).to_string(), "+2 more");
    }
}
