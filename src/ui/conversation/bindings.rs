//! Key bindings for the chat surface.
//!
//! Each key chord owns exactly one action. Binding a chord again replaces the
//! previous action, so running setup any number of times never stacks handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyChord {
    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub const fn ctrl(c: char) -> Self {
        Self {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
        }
    }
}

impl From<&KeyEvent> for KeyChord {
    fn from(key: &KeyEvent) -> Self {
        Self {
            code: key.code,
            modifiers: key.modifiers,
        }
    }
}

/// Things a bound key can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatAction {
    Submit,
    Reset,
    Quit,
    ScrollUp,
    ScrollDown,
    DismissNotice,
}

const DEFAULT_BINDINGS: &[(KeyChord, ChatAction)] = &[
    (KeyChord::plain(KeyCode::Enter), ChatAction::Submit),
    (KeyChord::ctrl('c'), ChatAction::Quit),
    (KeyChord::ctrl('d'), ChatAction::Quit),
    (KeyChord::ctrl('l'), ChatAction::Reset),
    (KeyChord::plain(KeyCode::PageUp), ChatAction::ScrollUp),
    (KeyChord::plain(KeyCode::PageDown), ChatAction::ScrollDown),
    (KeyChord::plain(KeyCode::Esc), ChatAction::DismissNotice),
];

#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    handlers: HashMap<KeyChord, ChatAction>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut bindings = Self::new();
        bindings.bind_defaults();
        bindings
    }

    /// Bind `chord` to `action`, returning the action it replaced
    pub fn bind(&mut self, chord: KeyChord, action: ChatAction) -> Option<ChatAction> {
        self.handlers.insert(chord, action)
    }

    /// (Re)install the default bindings. Safe to call repeatedly.
    pub fn bind_defaults(&mut self) {
        for (chord, action) in DEFAULT_BINDINGS {
            self.bind(*chord, *action);
        }
    }

    pub fn action_for(&self, key: &KeyEvent) -> Option<ChatAction> {
        self.handlers.get(&KeyChord::from(key)).copied()
    }

    /// How many chords trigger `action`
    pub fn chords_for(&self, action: ChatAction) -> usize {
        self.handlers.values().filter(|a| **a == action).count()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
