use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::Action;

/// Translate a terminal key press into a game action.
///
/// Letters guess, Enter or Right moves to the next word, Ctrl+G or `!` gives
/// up, Esc or Ctrl+C quits. Everything else is ignored.
pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('c') if ctrl => Some(Action::Quit),
        KeyCode::Char('g') if ctrl => Some(Action::Forfeit),
        KeyCode::Char('!') => Some(Action::Forfeit),
        KeyCode::Char(c) if !ctrl && c.is_ascii_alphabetic() => Some(Action::GuessLetter(c)),
        KeyCode::Enter | KeyCode::Right => Some(Action::NextRound),
        _ => None,
    }
}
