//! View projection for the dental chart.
//!
//! A [`ProjectedChartState`] is derived on demand from a patient's chart
//! events, a [`ViewMode`] and an evaluation instant. Projection is a single
//! left-to-right fold over the events in `(occurred_at, id)` order, so the same
//! inputs always produce the same state.
//!
//! # Modules
//!
//! - [`mode`]: View modes and the navigable [`ViewQuery`]
//! - [`projector`]: The fold
//! - [`state`]: Projected slots and badges
//! - [`order`]: Fixed chart ordering of the 32 teeth

pub mod error;
pub mod mode;
pub mod order;
pub mod projector;
pub mod state;

pub use error::{ChartError, Result};
pub use mode::{ViewMode, ViewQuery};
pub use order::{chart_index, chart_order};
pub use projector::{project, project_at, project_query};
pub use state::{Badge, ProjectedChartState, ProjectedSlot, ToothBadges};
