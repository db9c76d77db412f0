//! Request sequencing for asynchronous responses.
//!
//! Responses may arrive in any order. Only the response to the most recently
//! issued request is applied; anything older is stale.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// Issues monotonically increasing request ids and tracks the latest one.
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    next: u64,
    latest: Option<RequestId>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new request id, superseding every earlier one.
    pub fn issue(&mut self) -> RequestId {
        let id = RequestId(self.next);
        self.next += 1;
        self.latest = Some(id);
        id
    }

    /// Whether a response for `id` should be applied.
    pub fn is_current(&self, id: RequestId) -> bool {
        self.latest == Some(id)
    }

    /// The most recently issued id, if still outstanding.
    pub fn latest(&self) -> Option<RequestId> {
        self.latest
    }

    /// Supersede every outstanding request without issuing a new one.
    pub fn invalidate(&mut self) {
        self.latest = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_wins() {
        let mut sequencer = RequestSequencer::new();
        let first = sequencer.issue();
        let second = sequencer.issue();
        assert!(first < second);
        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));
    }

    #[test]
    fn test_invalidate() {
        let mut sequencer = RequestSequencer::new();
        let id = sequencer.issue();
        sequencer.invalidate();
        assert!(!sequencer.is_current(id));
        assert!(sequencer.issue() > id);
    }
}
