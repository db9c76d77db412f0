//! Selection values and transitions.

use std::fmt;

use dcs_model::{SurfaceKey, ToothKey};
use serde::{Deserialize, Serialize};

use super::history::SelectionHistory;
use super::navigation::{Direction, navigate};

// =============================================================================
// SELECTION
// =============================================================================

/// What is selected on the odontogram.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
    /// Nothing selected.
    #[default]
    Idle,
    /// A whole tooth.
    Tooth(ToothKey),
    /// One surface of a tooth.
    Surface(ToothKey, SurfaceKey),
}

impl Selection {
    pub fn selected_tooth(&self) -> Option<ToothKey> {
        match self {
            Self::Idle => None,
            Self::Tooth(tooth) | Self::Surface(tooth, _) => Some(*tooth),
        }
    }

    pub fn selected_surface(&self) -> Option<SurfaceKey> {
        match self {
            Self::Surface(_, surface) => Some(*surface),
            Self::Idle | Self::Tooth(_) => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("none"),
            Self::Tooth(tooth) => write!(f, "{tooth}"),
            Self::Surface(tooth, surface) => write!(f, "{tooth}/{surface}"),
        }
    }
}

// =============================================================================
// ACTIONS
// =============================================================================

/// Input to the selection machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionAction {
    /// Click or activate a tooth.
    SelectTooth(ToothKey),
    /// Toggle a surface of the selected tooth.
    ToggleSurface(SurfaceKey),
    /// Move along the chart. Not an edit.
    Navigate(Direction),
    /// Drop the selection.
    Clear,
    Undo,
    Redo,
}

impl SelectionAction {
    /// Whether the action can record undo history.
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            Self::SelectTooth(_) | Self::ToggleSurface(_) | Self::Clear
        )
    }
}

// =============================================================================
// STATE
// =============================================================================

/// Current selection plus its undo/redo history.
///
/// One value per open chart view. Transitions consume the state and return
/// the next one, so the machine can be driven without a UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    current: Selection,
    history: SelectionHistory,
}

impl SelectionState {
    /// Idle state with the given history depth.
    pub fn with_history_depth(max_depth: usize) -> Self {
        Self {
            current: Selection::Idle,
            history: SelectionHistory::new(max_depth),
        }
    }

    pub fn current(&self) -> Selection {
        self.current
    }

    pub fn history(&self) -> &SelectionHistory {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    /// Apply one action.
    ///
    /// Editing transitions that change the selection push the prior selection
    /// and clear redo. Transitions that would not change anything are no-ops
    /// and leave both stacks untouched. Navigation never touches the stacks.
    #[must_use]
    pub fn apply(mut self, action: SelectionAction) -> Self {
        match action {
            SelectionAction::SelectTooth(tooth) => self.commit(Selection::Tooth(tooth)),
            SelectionAction::ToggleSurface(surface) => {
                let next = match self.current {
                    Selection::Idle => Selection::Idle,
                    Selection::Tooth(tooth) => Selection::Surface(tooth, surface),
                    Selection::Surface(tooth, selected) if selected == surface => {
                        Selection::Tooth(tooth)
                    }
                    Selection::Surface(tooth, _) => Selection::Surface(tooth, surface),
                };
                self.commit(next);
            }
            SelectionAction::Clear => self.commit(Selection::Idle),
            SelectionAction::Navigate(direction) => {
                self.current = navigate(self.current, direction);
            }
            SelectionAction::Undo => {
                if let Some(restored) = self.history.undo(self.current) {
                    self.current = restored;
                }
            }
            SelectionAction::Redo => {
                if let Some(restored) = self.history.redo(self.current) {
                    self.current = restored;
                }
            }
        }
        self
    }

    fn commit(&mut self, next: Selection) {
        if next == self.current {
            return;
        }
        self.history.push(self.current);
        self.current = next;
    }
}
