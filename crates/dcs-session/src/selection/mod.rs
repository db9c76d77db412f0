//! Odontogram selection state machine.
//!
//! Provides:
//! - `Selection` - What is selected right now
//! - `SelectionAction` - Inputs to the machine
//! - `SelectionState` - Current selection plus bounded undo/redo history

mod history;
mod navigation;
mod state;

pub use history::{DEFAULT_HISTORY_DEPTH, SelectionHistory};
pub use navigation::{Direction, navigate};
pub use state::{Selection, SelectionAction, SelectionState};
