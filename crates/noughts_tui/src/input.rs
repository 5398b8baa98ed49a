//! Translation of terminal events into session signals.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use noughts::InputEvent;
use ratatui::layout::Rect;

use crate::session::Signal;
use crate::ui::cell_at;

/// Moves the highlight cursor based on arrow keys.
pub fn move_cursor(cursor: usize, key: KeyCode) -> usize {
    let (row, col) = (cursor / 3, cursor % 3);
    match key {
        KeyCode::Right if col < 2 => cursor + 1,
        KeyCode::Left if col > 0 => cursor - 1,
        KeyCode::Down if row < 2 => cursor + 3,
        KeyCode::Up if row > 0 => cursor - 3,
        // No change for other keys or edge cases
        _ => cursor,
    }
}

/// Maps a key press to a signal, moving `cursor` for arrows and digits.
pub fn key_signal(cursor: &mut usize, key: KeyEvent) -> Option<Signal> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Signal::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Signal::Quit),
        KeyCode::Char('r') | KeyCode::Char('n') => Some(Signal::NewGame),
        KeyCode::Enter | KeyCode::Char(' ') => {
            Some(Signal::Input(InputEvent::PointerReleased(Some(*cursor))))
        }
        KeyCode::Char(c @ '1'..='9') => {
            *cursor = c as usize - '1' as usize;
            Some(Signal::Input(InputEvent::PointerReleased(Some(*cursor))))
        }
        code @ (KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right) => {
            *cursor = move_cursor(*cursor, code);
            None
        }
        _ => None,
    }
}

/// Maps a left-button release to a pointer event over the cell below it.
pub fn mouse_signal(area: Rect, mouse: MouseEvent) -> Option<Signal> {
    match mouse.kind {
        MouseEventKind::Up(MouseButton::Left) => Some(Signal::Input(InputEvent::PointerReleased(
            cell_at(area, mouse.column, mouse.row),
        ))),
        _ => None,
    }
}
