//! Dental chart normalization crate.
//!
//! Converts heterogeneous procedure rows (native entries, treatment-plan
//! entries and legacy imports) into the canonical chart model.
//!
//! # Overview
//!
//! - **Code normalization**: [`normalize_tooth`] and [`normalize_surface`] map
//!   legacy numeric and textual codes onto [`ToothKey`](dcs_model::ToothKey) and
//!   [`SurfaceKey`](dcs_model::SurfaceKey)
//! - **Row normalization**: [`normalize_row`] turns one raw row into a
//!   [`NormalizedRecord`](dcs_model::NormalizedRecord)
//! - **Event log**: [`ChartEventLog`] owns a patient's events in ingestion order
//!
//! # Design Principles
//!
//! - **Fail closed**: a code outside the known ranges never becomes a
//!   plausible-looking tooth; the row is kept and flagged `unknown`
//! - **Stateless functions**: every normalizer is total and pure
//! - **Error preservation**: unmapped rows are retained verbatim for manual resolution

mod datetime;
mod log;
mod record;
mod surface;
mod tooth;

pub use datetime::parse_occurred_at;
pub use log::{ChartEventLog, IngestSummary, NativeEntry, chronological};
pub use record::normalize_row;
pub use surface::{SurfaceOutcome, classify_surface, normalize_surface};
pub use tooth::{normalize_tooth, tooth_code_from_raw};
