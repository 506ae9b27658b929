//! Key mapping from terminal events to app commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Key;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Play(Key),
    Start,
    Quit,
}

pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Command::Quit);
    }
    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Command::Play(Key::Left)),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Command::Play(Key::Right))
        }
        KeyCode::Char(' ') => Some(Command::Play(Key::Fire)),
        KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('S') => Some(Command::Start),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
        _ => None,
    }
}
