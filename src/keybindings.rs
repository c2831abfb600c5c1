//! Close-request gesture matching.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key chord: code plus exact modifier set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    /// Like [`matches`](Self::matches), but only for initial presses.
    /// Repeat and release events never classify as a gesture.
    pub fn matches_press(&self, key: &KeyEvent) -> bool {
        key.kind == KeyEventKind::Press && self.matches(key)
    }
}

/// The toolkit-wide dismissal gesture: a plain `Esc` press.
pub fn default_close_request() -> KeyCombo {
    KeyCombo::new(KeyCode::Esc, KeyModifiers::NONE)
}
