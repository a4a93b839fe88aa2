//! Raw interaction events and keyboard shortcuts.
//!
//! Every event refreshes idle recency. Only key presses that come from the
//! window itself (not a text field) and arrive while unlocked are turned
//! into shortcuts.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Move,
    Down,
    Touch,
    Enter,
    Leave,
}

/// Where a key press originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyOrigin {
    Window,
    /// A text-entry control such as a numeric settings field.
    TextEntry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Pointer(PointerKind),
    Key { key: String, origin: KeyOrigin },
}

impl InputEvent {
    pub fn key(key: impl Into<String>) -> Self {
        InputEvent::Key {
            key: key.into(),
            origin: KeyOrigin::Window,
        }
    }

    pub fn text_entry(key: impl Into<String>) -> Self {
        InputEvent::Key {
            key: key.into(),
            origin: KeyOrigin::TextEntry,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shortcut {
    ToggleRun,
    Reset,
    Fullscreen,
}

impl Shortcut {
    /// `space` toggles run, `r` resets, `f` toggles fullscreen.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            " " => Some(Shortcut::ToggleRun),
            k if k.eq_ignore_ascii_case("space") => Some(Shortcut::ToggleRun),
            k if k.eq_ignore_ascii_case("r") => Some(Shortcut::Reset),
            k if k.eq_ignore_ascii_case("f") => Some(Shortcut::Fullscreen),
            _ => None,
        }
    }
}

/// Shortcut to run for a key press, if any.
pub fn shortcut_for(key: &str, origin: KeyOrigin, locked: bool) -> Option<Shortcut> {
    if locked || origin == KeyOrigin::TextEntry {
        return None;
    }
    Shortcut::from_key(key)
}
