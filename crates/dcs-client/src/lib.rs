//! HTTP client for the collaborator endpoints that feed the chart.
//!
//! Three feeds deliver raw rows for a patient (native procedures, the
//! treatment plan and the legacy import); the audit endpoint delivers
//! before/after records. Rows are returned unnormalized.

mod client;
mod error;
mod feed;

pub use client::{ChartSourceClient, DEFAULT_TIMEOUT};
pub use error::{ClientError, Result};
pub use feed::Feed;
