//! Canonical data model for the dental chart engine.
//!
//! This crate provides the type-safe representation every other crate works in:
//! - **Addressing**: [`Quadrant`], [`ToothKey`], [`SurfaceKey`], [`SlotKey`]
//! - **Clinical kinds**: [`ToothStateType`], a closed enumeration
//! - **Events**: [`ChartEvent`] (mapped) and [`UnmappedRecord`] (unknown), joined by
//!   [`NormalizedRecord`]
//! - **Boundary rows**: [`RawChartRow`], the externally defined import schema
//!
//! # Module Organization
//!
//! - [`tooth`]: Quadrant, tooth and surface keys
//! - [`kind`]: Tooth state types
//! - [`provenance`]: Record origin and mapping confidence
//! - [`event`]: Raw rows, chart events and unmapped records

pub mod error;
pub mod event;
pub mod kind;
pub mod provenance;
pub mod tooth;

pub use error::{ModelError, Result};
pub use event::{
    ChartEvent, EventId, NormalizedRecord, RawChartRow, RowDefect, UnmappedReason, UnmappedRecord,
};
pub use kind::ToothStateType;
pub use provenance::{Confidence, Provenance, RawCode, Source};
pub use tooth::{Quadrant, SlotKey, SurfaceKey, ToothKey};
