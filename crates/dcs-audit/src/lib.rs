//! Audit diff engine.
//!
//! Every persisted mutation produces one [`AuditRecord`] holding a complete
//! before/after pair. [`diff`] compares the pair shallowly by key and
//! [`summarize`] turns the changed field names into stable, truncated text for
//! the audit log.
//!
//! ```
//! use dcs_audit::{diff, summarize};
//! use serde_json::json;
//!
//! let before = json!({"tooth": "UR5", "kind": "filling", "note": "x"});
//! let after = json!({"tooth": "UR5", "kind": "crown", "note": "y"});
//! let changed = diff(Some(&before), Some(&after));
//! assert_eq!(summarize(&changed, 1).to_string(), "kind +1 more");
//! ```

pub mod diff;
pub mod error;
pub mod log;
pub mod record;
pub mod summary;
pub mod view;

pub use diff::diff;
pub use error::{AuditError, Result};
pub use log::AuditLog;
pub use record::{AuditAction, AuditRecord};
pub use summary::{AuditSummary, EMPTY_SUMMARY, summarize};
pub use view::AuditEntryView;
