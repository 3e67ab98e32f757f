//! Keyboard bindings for the terminal host.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::components::Command;

/// Maps a key press to a game command. Releases and unbound keys map to nothing.
#[must_use]
pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        KeyCode::Left | KeyCode::Char('a' | 'A') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('d' | 'D') => Some(Command::MoveRight),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Some(Command::SoftDrop),
        KeyCode::Up | KeyCode::Char('x' | 'X' | 'w' | 'W') => Some(Command::RotateClockwise),
        KeyCode::Char('z' | 'Z') => Some(Command::RotateCounterClockwise),
        KeyCode::Char(' ') => Some(Command::HardDrop),
        KeyCode::Enter | KeyCode::Char('r' | 'R') => Some(Command::Start),
        _ => None,
    }
}

#[must_use]
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q' | 'Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
