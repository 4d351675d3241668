//! Named key identifiers fed into task state machines.

use crate::constants::{
    KEY_BACKSPACE, KEY_CTRL_C, KEY_DELETE, KEY_DOWN, KEY_END, KEY_ENTER, KEY_ESC, KEY_HOME, KEY_LEFT, KEY_RIGHT,
    KEY_SPACE, KEY_TAB, KEY_UP,
};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::fmt;
use std::str::FromStr;

/// A single key press as seen by the tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
    Enter,
    Esc,
    CtrlC,
    Backspace,
    Delete,
    Home,
    End,
    Tab,
    /// Any other printable character
    Char(char),
}

impl Key {
    /// Whether the key produces text when typed into an input field.
    #[must_use]
    pub fn is_printable(&self) -> bool {
        matches!(self, Key::Space | Key::Char(_))
    }

    /// Character inserted by this key, if any.
    #[must_use]
    pub fn as_char(&self) -> Option<char> {
        match self {
            Key::Space => Some(' '),
            Key::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// Keys that abort any task.
    #[must_use]
    pub fn is_abort(&self) -> bool {
        matches!(self, Key::Esc | Key::CtrlC)
    }

    /// The `q` shortcut, case-insensitive.
    #[must_use]
    pub fn is_quit(&self) -> bool {
        matches!(self, Key::Char('q') | Key::Char('Q'))
    }
}

/// Error returned when a key name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown key name: {0}")]
pub struct UnknownKey(pub String);

impl FromStr for Key {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let key = match lowered.as_str() {
            KEY_UP => Key::Up,
            KEY_DOWN => Key::Down,
            KEY_LEFT => Key::Left,
            KEY_RIGHT => Key::Right,
            KEY_SPACE => Key::Space,
            KEY_ENTER => Key::Enter,
            KEY_ESC | "escape" => Key::Esc,
            KEY_CTRL_C => Key::CtrlC,
            KEY_BACKSPACE => Key::Backspace,
            KEY_DELETE => Key::Delete,
            KEY_HOME => Key::Home,
            KEY_END => Key::End,
            KEY_TAB => Key::Tab,
            _ => {
                // Single characters keep their original case
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c == ' ' => Key::Space,
                    (Some(c), None) => Key::Char(c),
                    _ => return Err(UnknownKey(s.to_string())),
                }
            }
        };
        Ok(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Up => f.write_str(KEY_UP),
            Key::Down => f.write_str(KEY_DOWN),
            Key::Left => f.write_str(KEY_LEFT),
            Key::Right => f.write_str(KEY_RIGHT),
            Key::Space => f.write_str(KEY_SPACE),
            Key::Enter => f.write_str(KEY_ENTER),
            Key::Esc => f.write_str(KEY_ESC),
            Key::CtrlC => f.write_str(KEY_CTRL_C),
            Key::Backspace => f.write_str(KEY_BACKSPACE),
            Key::Delete => f.write_str(KEY_DELETE),
            Key::Home => f.write_str(KEY_HOME),
            Key::End => f.write_str(KEY_END),
            Key::Tab => f.write_str(KEY_TAB),
            Key::Char(c) => write!(f, "{}", c),
        }
    }
}

impl Key {
    /// Translate a terminal key event. Releases, repeats of modifiers and
    /// unsupported keys yield `None`.
    #[must_use]
    pub fn from_key_event(event: KeyEvent) -> Option<Self> {
        if event.kind == KeyEventKind::Release {
            return None;
        }

        if event.modifiers.contains(KeyModifiers::CONTROL) {
            return match event.code {
                KeyCode::Char('c') | KeyCode::Char('C') => Some(Key::CtrlC),
                _ => None,
            };
        }

        match event.code {
            KeyCode::Up => Some(Key::Up),
            KeyCode::Down => Some(Key::Down),
            KeyCode::Left => Some(Key::Left),
            KeyCode::Right => Some(Key::Right),
            KeyCode::Enter => Some(Key::Enter),
            KeyCode::Esc => Some(Key::Esc),
            KeyCode::Backspace => Some(Key::Backspace),
            KeyCode::Delete => Some(Key::Delete),
            KeyCode::Home => Some(Key::Home),
            KeyCode::End => Some(Key::End),
            KeyCode::Tab => Some(Key::Tab),
            KeyCode::Char(' ') => Some(Key::Space),
            KeyCode::Char(c) => Some(Key::Char(c)),
            _ => None,
        }
    }
}
