//! Bounded undo/redo stacks.

use std::collections::VecDeque;

use super::state::Selection;

/// Default number of undo steps kept.
pub const DEFAULT_HISTORY_DEPTH: usize = 100;

/// Undo and redo stacks of past selections.
///
/// Both stacks are bounded; when full, the oldest entry is evicted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionHistory {
    undo: VecDeque<Selection>,
    redo: VecDeque<Selection>,
    max_depth: usize,
}

impl Default for SelectionHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}

impl SelectionHistory {
    /// Create empty stacks holding at most `max_depth` entries each (minimum 1).
    pub fn new(max_depth: usize) -> Self {
        let max_depth = max_depth.max(1);
        Self {
            undo: VecDeque::with_capacity(max_depth.min(DEFAULT_HISTORY_DEPTH)),
            redo: VecDeque::new(),
            max_depth,
        }
    }

    /// Record the selection an editing transition replaced.
    ///
    /// Any redo history is invalidated.
    pub fn push(&mut self, prior: Selection) {
        Self::push_bounded(&mut self.undo, prior, self.max_depth);
        self.redo.clear();
    }

    /// Step back: returns the selection to restore and remembers `current` for redo.
    pub fn undo(&mut self, current: Selection) -> Option<Selection> {
        let restored = self.undo.pop_back()?;
        Self::push_bounded(&mut self.redo, current, self.max_depth);
        Some(restored)
    }

    /// Step forward: returns the selection to restore and remembers `current` for undo.
    pub fn redo(&mut self, current: Selection) -> Option<Selection> {
        let restored = self.redo.pop_back()?;
        Self::push_bounded(&mut self.undo, current, self.max_depth);
        Some(restored)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Drop both stacks.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    fn push_bounded(stack: &mut VecDeque<Selection>, entry: Selection, max_depth: usize) {
        stack.push_back(entry);
        while stack.len() > max_depth {
            stack.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcs_model::{Quadrant, ToothKey};

    fn tooth(position: u8) -> Selection {
        Selection::Tooth(ToothKey::new(Quadrant::UpperRight, position).unwrap())
    }

    #[test]
    fn test_push_and_undo() {
        let mut history = SelectionHistory::default();
        history.push(Selection::Idle);
        assert!(history.can_undo());
        assert_eq!(history.undo(tooth(1)), Some(Selection::Idle));
        assert!(history.can_redo());
        assert_eq!(history.redo(Selection::Idle), Some(tooth(1)));
    }

    #[test]
    fn test_underflow_is_none() {
        let mut history = SelectionHistory::default();
        assert_eq!(history.undo(Selection::Idle), None);
        assert_eq!(history.redo(Selection::Idle), None);
        assert_eq!(history.redo_depth(), 0);
    }

    #[test]
    fn test_push_clears_redo() {
        let mut history = SelectionHistory::default();
        history.push(Selection::Idle);
        history.undo(tooth(1));
        history.push(tooth(2));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_oldest_entries_evicted() {
        let mut history = SelectionHistory::new(3);
        for position in 1..=5 {
            history.push(tooth(position));
        }
        assert_eq!(history.undo_depth(), 3);
        assert_eq!(history.undo(Selection::Idle), Some(tooth(5)));
        assert_eq!(history.undo(Selection::Idle), Some(tooth(4)));
        assert_eq!(history.undo(Selection::Idle), Some(tooth(3)));
        assert_eq!(history.undo(Selection::Idle), None);
    }

    #[test]
    fn test_zero_depth_is_clamped() {
        assert_eq!(SelectionHistory::new(0).max_depth(), 1);
    }
}
