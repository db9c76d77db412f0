//! Debounced incremental search.
//!
//! Provides:
//! - `DebounceConfig` - Timing settings
//! - `SearchDebouncer` - Pending query tracking with request sequencing

mod config;
mod tracker;

pub use config::DebounceConfig;
pub use tracker::{SearchDebouncer, SearchRequest};
