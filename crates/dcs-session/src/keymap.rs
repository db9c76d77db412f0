//! Keyboard shortcuts for the odontogram.

use dcs_model::SurfaceKey;

use crate::selection::{Direction, SelectionAction};

/// A key independent of any UI toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Left,
    Right,
    Up,
    Down,
    Escape,
}

/// Modifier keys held with a key press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

/// One key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyInput {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyInput {
    /// Key press without modifiers.
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }

    /// Key press with Ctrl held.
    pub fn ctrl(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers {
                ctrl: true,
                ..Modifiers::default()
            },
        }
    }

    /// Key press with Ctrl and Shift held.
    pub fn ctrl_shift(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers {
                ctrl: true,
                shift: true,
                alt: false,
            },
        }
    }
}

/// Map a key press to a selection action.
///
/// | Key | Action |
/// |---|---|
/// | `M` `O` `D` `B` `L` `I` | toggle surface |
/// | Right / Left | next / previous tooth |
/// | Up / Down | opposite arch |
/// | Escape | clear |
/// | Ctrl+Z | undo |
/// | Ctrl+Shift+Z, Ctrl+Y | redo |
pub fn action_for_key(input: KeyInput) -> Option<SelectionAction> {
    let Modifiers { ctrl, shift, alt } = input.modifiers;
    if alt {
        return None;
    }

    match input.key {
        Key::Char(c) if ctrl => match c.to_ascii_lowercase() {
            'z' if shift => Some(SelectionAction::Redo),
            'z' => Some(SelectionAction::Undo),
            'y' => Some(SelectionAction::Redo),
            _ => None,
        },
        Key::Char(c) => SurfaceKey::from_letter(c).map(SelectionAction::ToggleSurface),
        _ if ctrl => None,
        Key::Right => Some(SelectionAction::Navigate(Direction::Next)),
        Key::Left => Some(SelectionAction::Navigate(Direction::Previous)),
        Key::Up | Key::Down => Some(SelectionAction::Navigate(Direction::OppositeArch)),
        Key::Escape => Some(SelectionAction::Clear),
    }
}
