//! Action enum — user intents decoded from key events.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // ── Playback ─────────────────────────────────────────────────────────────
    /// Toggle the station under the cursor.
    Select,
    Stop,
    /// Play the active station again.
    Resume,
    Next,
    Prev,
    Random,

    // ── Navigation ───────────────────────────────────────────────────────────
    CursorUp,
    CursorDown,
    CursorFirst,
    CursorLast,
    JumpToCurrent,

    // ── System ───────────────────────────────────────────────────────────────
    ToggleKeys,
    Quit,
}

pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }
    let action = match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => Action::Select,
        KeyCode::Char('s') => Action::Stop,
        KeyCode::Char('p') => Action::Resume,
        KeyCode::Char('n') | KeyCode::Right => Action::Next,
        KeyCode::Char('N') | KeyCode::Left => Action::Prev,
        KeyCode::Char('r') => Action::Random,
        KeyCode::Up | KeyCode::Char('k') => Action::CursorUp,
        KeyCode::Down | KeyCode::Char('j') => Action::CursorDown,
        KeyCode::Home | KeyCode::Char('g') => Action::CursorFirst,
        KeyCode::End | KeyCode::Char('G') => Action::CursorLast,
        KeyCode::Char('.') => Action::JumpToCurrent,
        KeyCode::Char('?') => Action::ToggleKeys,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_playback_keys() {
        assert_eq!(map_key(press(KeyCode::Enter)), Some(Action::Select));
        assert_eq!(map_key(press(KeyCode::Char(' '))), Some(Action::Select));
        assert_eq!(map_key(press(KeyCode::Char('s'))), Some(Action::Stop));
        assert_eq!(map_key(press(KeyCode::Char('N'))), Some(Action::Prev));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key), Some(Action::Quit));
        let key = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key), None);
    }

    #[test]
    fn test_release_ignored() {
        let mut key = press(KeyCode::Enter);
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key), None);
    }
}
