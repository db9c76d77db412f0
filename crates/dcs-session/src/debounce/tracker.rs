//! Pending search input tracking.

use std::time::Instant;

use crate::sequencer::{RequestId, RequestSequencer};

use super::DebounceConfig;

/// A query ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub id: RequestId,
    pub query: String,
}

/// Tracks keystrokes of an incremental search box.
///
/// Each fired query gets a fresh [`RequestId`]; responses are applied only
/// when [`SearchDebouncer::accept`] confirms they answer the latest query.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    config: DebounceConfig,

    /// Latest unsent input.
    pending: Option<String>,

    /// When the most recent keystroke arrived.
    last_input: Option<Instant>,

    /// When the first unsent keystroke arrived. Reset when a query fires.
    first_pending: Option<Instant>,

    sequencer: RequestSequencer,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DebounceConfig::default())
    }
}

impl SearchDebouncer {
    pub fn new(config: DebounceConfig) -> Self {
        Self {
            config,
            pending: None,
            last_input: None,
            first_pending: None,
            sequencer: RequestSequencer::new(),
        }
    }

    /// Check if input is waiting to fire.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Record the search box content after a keystroke.
    pub fn input(&mut self, query: impl Into<String>) {
        self.input_at(query, Instant::now());
    }

    /// Record input at an explicit instant.
    pub fn input_at(&mut self, query: impl Into<String>, now: Instant) {
        self.pending = Some(query.into());
        self.last_input = Some(now);

        // Only the first keystroke since the last fired query starts the max-delay clock
        if self.first_pending.is_none() {
            self.first_pending = Some(now);
        }
    }

    /// Fire the pending query if the debounce window has elapsed.
    pub fn poll(&mut self) -> Option<SearchRequest> {
        self.poll_at(Instant::now())
    }

    /// Fire the pending query if the debounce window elapsed by `now`.
    ///
    /// Queries shorter than the configured minimum are dropped and supersede
    /// any in-flight request, so a cleared search box never shows old results.
    pub fn poll_at(&mut self, now: Instant) -> Option<SearchRequest> {
        let (Some(last), Some(first)) = (self.last_input, self.first_pending) else {
            return None;
        };
        if self.pending.is_none() {
            return None;
        }

        let since_last = millis_between(last, now);
        let since_first = millis_between(first, now);
        if !self.config.should_fire(since_last, since_first) {
            return None;
        }

        let query = self.pending.take()?;
        self.first_pending = None;

        if query.trim().chars().count() < self.config.min_query_len {
            self.sequencer.invalidate();
            return None;
        }

        let id = self.sequencer.issue();
        tracing::debug!(request = %id, "search query fired");
        Some(SearchRequest { id, query })
    }

    /// Whether a response to `id` answers the latest query.
    pub fn accept(&self, id: RequestId) -> bool {
        let current = self.sequencer.is_current(id);
        if !current {
            tracing::debug!(request = %id, "discarding stale search response");
        }
        current
    }

    /// Drop pending input and supersede any in-flight query.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.first_pending = None;
        self.sequencer.invalidate();
    }
}

fn millis_between(earlier: Instant, later: Instant) -> u64 {
    u64::try_from(later.saturating_duration_since(earlier).as_millis()).unwrap_or(u64::MAX)
}
