use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

use crate::error::Result;

/// Browser inputs after key translation. Every transition of the browser
/// is driven by exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Leave the browser, or cancel the query while searching.
    Quit,
    StartSearch,
    Down,
    Up,
    Top,
    Bottom,
    /// Toggle the selected directory, or commit the query while searching.
    Enter,
    Char(char),
    Backspace,
    Resize { width: u16, height: u16 },
}

/// Terminal events the browser reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Resize(u16, u16),
}

/// Blocking reader over crossterm's event queue.
#[derive(Debug, Default)]
pub struct EventSource;

impl EventSource {
    pub fn new() -> Self {
        Self
    }

    /// Block until the next key press or resize. Key releases, mouse and
    /// focus events are skipped.
    pub fn next(&mut self) -> Result<Event> {
        loop {
            match event::read()? {
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    return Ok(Event::Key(key));
                }
                CrosstermEvent::Resize(w, h) => return Ok(Event::Resize(w, h)),
                _ => {}
            }
        }
    }
}
