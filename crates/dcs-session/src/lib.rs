//! Interactive chart session.
//!
//! This crate owns everything scoped to one open chart view:
//!
//! - **Selection**: the odontogram state machine with bounded undo/redo
//!   ([`SelectionState`])
//! - **Keyboard**: toolkit-independent shortcut mapping ([`keymap`])
//! - **Ordering**: request sequencing so stale responses are dropped
//!   ([`RequestSequencer`], [`SearchDebouncer`])
//! - **Session**: event log, view query, load status and audit log
//!   ([`ChartSession`])

pub mod debounce;
pub mod error;
pub mod keymap;
pub mod selection;
pub mod sequencer;
pub mod session;
pub mod settings;

pub use debounce::{DebounceConfig, SearchDebouncer, SearchRequest};
pub use error::{Result, SessionError};
pub use keymap::{Key, KeyInput, Modifiers, action_for_key};
pub use selection::{
    DEFAULT_HISTORY_DEPTH, Direction, Selection, SelectionAction, SelectionHistory,
    SelectionState, navigate,
};
pub use sequencer::{RequestId, RequestSequencer};
pub use session::{
    CHART_EVENT_ENTITY, ChartSession, Correction, LoadFailure, LoadOutcome, LoadStatus,
};
pub use settings::ChartSettings;
