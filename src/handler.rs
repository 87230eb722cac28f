use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Mode};
use crate::event::{Event, Input};

/// Map a key press to a browser input. The mapping depends on the mode so
/// that letters typed into a query are never read as commands.
pub fn translate(mode: Mode, key: KeyEvent) -> Option<Input> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Input::Quit);
    }

    match mode {
        Mode::Navigation => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Input::Quit),
            KeyCode::Char('/') => Some(Input::StartSearch),
            KeyCode::Down | KeyCode::Char('j') => Some(Input::Down),
            KeyCode::Up | KeyCode::Char('k') => Some(Input::Up),
            KeyCode::Home | KeyCode::Char('g') => Some(Input::Top),
            KeyCode::End | KeyCode::Char('G') => Some(Input::Bottom),
            KeyCode::Enter => Some(Input::Enter),
            KeyCode::Backspace => Some(Input::Backspace),
            KeyCode::Char(c) => Some(Input::Char(c)),
            _ => None,
        },
        Mode::SearchInput => match key.code {
            KeyCode::Esc => Some(Input::Quit),
            KeyCode::Enter => Some(Input::Enter),
            KeyCode::Backspace => Some(Input::Backspace),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Input::Char(c))
            }
            _ => None,
        },
    }
}

/// Handle a key event.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if let Some(input) = translate(app.mode, key) {
        app.handle(input);
    }
}

/// Handle any terminal event.
pub fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Resize(width, height) => app.handle(Input::Resize { width, height }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn navigation_keys() {
        let nav = Mode::Navigation;
        assert_eq!(translate(nav, key(KeyCode::Char('q'))), Some(Input::Quit));
        assert_eq!(translate(nav, key(KeyCode::Esc)), Some(Input::Quit));
        assert_eq!(translate(nav, key(KeyCode::Char('/'))), Some(Input::StartSearch));
        assert_eq!(translate(nav, key(KeyCode::Char('j'))), Some(Input::Down));
        assert_eq!(translate(nav, key(KeyCode::Down)), Some(Input::Down));
        assert_eq!(translate(nav, key(KeyCode::Char('k'))), Some(Input::Up));
        assert_eq!(translate(nav, key(KeyCode::Up)), Some(Input::Up));
        assert_eq!(translate(nav, key(KeyCode::Char('g'))), Some(Input::Top));
        assert_eq!(translate(nav, key(KeyCode::End)), Some(Input::Bottom));
        assert_eq!(translate(nav, key(KeyCode::Enter)), Some(Input::Enter));
        assert_eq!(translate(nav, key(KeyCode::F(5))), None);
    }

    #[test]
    fn search_mode_treats_letters_as_text() {
        let search = Mode::SearchInput;
        assert_eq!(translate(search, key(KeyCode::Char('q'))), Some(Input::Char('q')));
        assert_eq!(translate(search, key(KeyCode::Char('j'))), Some(Input::Char('j')));
        assert_eq!(translate(search, key(KeyCode::Char('/'))), Some(Input::Char('/')));
        assert_eq!(translate(search, key(KeyCode::Esc)), Some(Input::Quit));
        assert_eq!(translate(search, key(KeyCode::Backspace)), Some(Input::Backspace));
        assert_eq!(translate(search, key(KeyCode::Down)), None);
    }

    #[test]
    fn ctrl_c_quits_in_every_mode() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(translate(Mode::Navigation, ctrl_c), Some(Input::Quit));
        assert_eq!(translate(Mode::SearchInput, ctrl_c), Some(Input::Quit));
    }
}
