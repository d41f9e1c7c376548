//! Key mapping from terminal events to viewer actions.

use crate::types::ViewerAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map a key press to a viewer action. Releases and repeats are ignored.
pub fn map_key(key: KeyEvent) -> Option<ViewerAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(ViewerAction::Quit),
            KeyCode::Char('l') | KeyCode::Char('L') => Some(ViewerAction::Redraw),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(ViewerAction::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(ViewerAction::Redraw),
        _ => None,
    }
}
