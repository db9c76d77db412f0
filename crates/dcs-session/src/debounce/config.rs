//! Debounce configuration.

use serde::{Deserialize, Serialize};

/// Configuration for debounced search input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    /// Whether input is debounced at all. When disabled every keystroke fires.
    pub enabled: bool,

    /// Quiet period in milliseconds.
    ///
    /// After a keystroke, the query fires once no further input arrives for
    /// this long.
    pub debounce_ms: u64,

    /// Maximum delay before forcing a query.
    ///
    /// If keystrokes keep coming, fire after this many milliseconds since the
    /// first pending keystroke.
    pub max_delay_ms: u64,

    /// Queries shorter than this (after trimming) are not sent.
    pub min_query_len: usize,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: 300,
            max_delay_ms: 2000,
            min_query_len: 1,
        }
    }
}

impl DebounceConfig {
    /// Create a config that fires on every keystroke.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Check if a pending query should fire given the time since the last
    /// keystroke and since the first pending keystroke.
    pub fn should_fire(&self, since_last_input_ms: u64, since_first_pending_ms: u64) -> bool {
        if !self.enabled {
            return true;
        }

        since_last_input_ms >= self.debounce_ms || since_first_pending_ms >= self.max_delay_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DebounceConfig::default();
        assert!(config.enabled);
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.max_delay_ms, 2000);
    }

    #[test]
    fn test_should_fire_disabled() {
        assert!(DebounceConfig::disabled().should_fire(0, 0));
    }

    #[test]
    fn test_should_fire_debounce() {
        let config = DebounceConfig::default();
        assert!(!config.should_fire(100, 100));
        assert!(config.should_fire(300, 900));
    }

    #[test]
    fn test_should_fire_max_delay() {
        let config = DebounceConfig::default();
        // Rapid typing never goes quiet, so the max delay forces a query.
        assert!(!config.should_fire(50, 1900));
        assert!(config.should_fire(50, 2100));
    }
}
