//! Terminal glue: decodes crossterm events into the editor's logical keys
//! and probes the window size. Raw-mode lifecycle lives in `main.rs`.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Logical keys the dispatcher understands. Escape-sequence composition
/// (arrows, Home/End, PageUp/PageDown, Delete) is crossterm's job; this
/// enum is what comes out the other side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable byte (or tab) to insert.
    Char(u8),
    /// Ctrl plus a lowercase letter byte.
    Ctrl(u8),
    Enter,
    Backspace,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Esc,
}

/// An event the main loop acts on.
pub enum Input {
    Key(Key),
    /// New terminal dimensions (cols, rows).
    Resize(u16, u16),
}

/// Blocks until the next key press or resize.
pub fn read_input() -> io::Result<Input> {
    loop {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Some(k) = decode_key(key) {
                    return Ok(Input::Key(k));
                }
            }
            Event::Resize(cols, rows) => return Ok(Input::Resize(cols, rows)),
            _ => {}
        }
    }
}

/// Maps a crossterm key event to a logical key. Keys outside the editor's
/// byte-oriented model (function keys, non-ASCII input) map to None.
fn decode_key(key: KeyEvent) -> Option<Key> {
    match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if c.is_ascii_alphabetic() {
                Some(Key::Ctrl(c.to_ascii_lowercase() as u8))
            } else {
                None
            }
        }
        KeyCode::Char(c) if c.is_ascii() && !c.is_ascii_control() => Some(Key::Char(c as u8)),
        KeyCode::Tab => Some(Key::Char(b'\t')),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Delete => Some(Key::Delete),
        KeyCode::Home => Some(Key::Home),
        KeyCode::End => Some(Key::End),
        KeyCode::PageUp => Some(Key::PageUp),
        KeyCode::PageDown => Some(Key::PageDown),
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Down => Some(Key::ArrowDown),
        KeyCode::Esc => Some(Key::Esc),
        _ => None,
    }
}

/// Current terminal size as (cols, rows).
pub fn window_size() -> io::Result<(u16, u16)> {
    crossterm::terminal::size()
}
