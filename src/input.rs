//! Keyboard mapping: crossterm key events to game commands.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::Command;

/// Map a key event to a game command. Repeat events count as presses so
/// holding an arrow keeps moving the piece; release events are ignored.
pub fn map_key(event: &KeyEvent) -> Option<Command> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    match event.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => Some(Command::MoveRight),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => Some(Command::SoftDrop),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Some(Command::Rotate),
        KeyCode::Char('p') => Some(Command::TogglePause),
        KeyCode::Char('r') => Some(Command::Restart),
        _ => None,
    }
}

/// True for the quit chords: `q`, `Esc`, or `Ctrl-C`.
pub fn is_quit(event: &KeyEvent) -> bool {
    if event.kind == KeyEventKind::Release {
        return false;
    }
    match event.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
