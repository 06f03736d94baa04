//! Keyboard shortcut resolution
//!
//! The engine has no event loop of its own; the host forwards key
//! presses as [`KeyInput`] and dispatches the resolved [`EditorAction`]
//! to the editor facade. Keeping the table here means every host binds
//! the same keys.

use campkit_core::constants::{NUDGE_STEP, NUDGE_STEP_LARGE};

use crate::editor::Tool;

/// A key, stripped of platform event details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character, as typed (case does not matter).
    Char(char),
    Escape,
    Delete,
    Backspace,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
}

/// One key press with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    /// Ctrl on Windows and Linux, Cmd on macOS.
    pub command: bool,
    pub shift: bool,
}

impl KeyInput {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            command: false,
            shift: false,
        }
    }

    pub fn command(key: Key) -> Self {
        Self {
            key,
            command: true,
            shift: false,
        }
    }

    pub fn command_shift(key: Key) -> Self {
        Self {
            key,
            command: true,
            shift: true,
        }
    }

    pub fn shift(key: Key) -> Self {
        Self {
            key,
            command: false,
            shift: true,
        }
    }
}

/// A semantic editor operation resolved from input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorAction {
    Undo,
    Redo,
    Copy,
    Cut,
    Paste,
    Duplicate,
    SelectAll,
    DeleteSelection,
    /// Cancel the active gesture, else clear the selection.
    Escape,
    ToggleGrid,
    ToggleSnap,
    Nudge {
        dx: f64,
        dy: f64,
    },
    ZoomIn,
    ZoomOut,
    SwitchTool(Tool),
}

/// Resolve a key press against the shortcut table.
///
/// Letter shortcuts are case-insensitive. Returns `None` for chords the
/// editor does not bind, so hosts can layer their own shortcuts on top.
pub fn resolve_shortcut(input: KeyInput) -> Option<EditorAction> {
    let step = if input.shift { NUDGE_STEP_LARGE } else { NUDGE_STEP };

    let action = match (input.key, input.command) {
        (Key::Char(c), true) => match c.to_ascii_lowercase() {
            'z' if input.shift => EditorAction::Redo,
            'z' => EditorAction::Undo,
            'y' => EditorAction::Redo,
            'c' => EditorAction::Copy,
            'x' => EditorAction::Cut,
            'v' => EditorAction::Paste,
            'd' => EditorAction::Duplicate,
            'a' => EditorAction::SelectAll,
            _ => return None,
        },
        (Key::Char(c), false) => match c.to_ascii_lowercase() {
            'g' => EditorAction::ToggleGrid,
            's' => EditorAction::ToggleSnap,
            'v' => EditorAction::SwitchTool(Tool::Select),
            'h' => EditorAction::SwitchTool(Tool::Pan),
            '+' | '=' => EditorAction::ZoomIn,
            '-' => EditorAction::ZoomOut,
            _ => return None,
        },
        (Key::Escape, _) => EditorAction::Escape,
        (Key::Delete, _) | (Key::Backspace, _) => EditorAction::DeleteSelection,
        (Key::ArrowLeft, false) => EditorAction::Nudge { dx: -step, dy: 0.0 },
        (Key::ArrowRight, false) => EditorAction::Nudge { dx: step, dy: 0.0 },
        (Key::ArrowUp, false) => EditorAction::Nudge { dx: 0.0, dy: -step },
        (Key::ArrowDown, false) => EditorAction::Nudge { dx: 0.0, dy: step },
        _ => return None,
    };
    Some(action)
}
