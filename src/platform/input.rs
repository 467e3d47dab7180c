//! Input Sampler
//!
//! Keyboard events land in a `KeyState`; each game reads it through its
//! `Bindings` table, where several keys can map to the same logical action.

use std::collections::HashSet;

/// Logical actions a key can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Fire,
    Pause,
    Reset,
    Start,
}

/// Keys currently held down
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<String>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down; returns true on the press edge (not an auto-repeat)
    pub fn press(&mut self, key: &str) -> bool {
        self.held.insert(key.to_string())
    }

    pub fn release(&mut self, key: &str) {
        self.held.remove(key);
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held.contains(key)
    }

    /// Drop every held key (focus loss, restart)
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

/// Key-to-action table for one game
#[derive(Debug, Clone, Copy)]
pub struct Bindings {
    entries: &'static [(&'static str, Action)],
}

impl Bindings {
    pub const fn new(entries: &'static [(&'static str, Action)]) -> Self {
        Self { entries }
    }

    pub fn action(&self, key: &str) -> Option<Action> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|&(_, action)| action)
    }

    /// True if any key bound to `action` is held
    pub fn held(&self, keys: &KeyState, action: Action) -> bool {
        self.entries
            .iter()
            .any(|&(k, a)| a == action && keys.is_held(k))
    }
}

/// Paddle game: W/S or arrows move, Space pauses, R resets
pub const PONG_BINDINGS: Bindings = Bindings::new(&[
    ("w", Action::MoveUp),
    ("W", Action::MoveUp),
    ("ArrowUp", Action::MoveUp),
    ("s", Action::MoveDown),
    ("S", Action::MoveDown),
    ("ArrowDown", Action::MoveDown),
    (" ", Action::Pause),
    ("r", Action::Reset),
    ("R", Action::Reset),
]);

/// Grid game: arrows or WASD steer, Space pauses, Enter starts
pub const SNAKE_BINDINGS: Bindings = Bindings::new(&[
    ("ArrowUp", Action::MoveUp),
    ("w", Action::MoveUp),
    ("W", Action::MoveUp),
    ("ArrowDown", Action::MoveDown),
    ("s", Action::MoveDown),
    ("S", Action::MoveDown),
    ("ArrowLeft", Action::MoveLeft),
    ("a", Action::MoveLeft),
    ("A", Action::MoveLeft),
    ("ArrowRight", Action::MoveRight),
    ("d", Action::MoveRight),
    ("D", Action::MoveRight),
    (" ", Action::Pause),
    ("Enter", Action::Start),
]);

/// Shooter: arrows or A/D move, Space fires, P pauses, Enter starts
pub const SHOOTER_BINDINGS: Bindings = Bindings::new(&[
    ("ArrowLeft", Action::MoveLeft),
    ("a", Action::MoveLeft),
    ("ArrowRight", Action::MoveRight),
    ("d", Action::MoveRight),
    (" ", Action::Fire),
    ("p", Action::Pause),
    ("P", Action::Pause),
    ("Enter", Action::Start),
]);

/// Map a DOM `KeyboardEvent` (key, code) pair to the key name used in bindings
pub fn normalize_key<'a>(key: &'a str, code: &str) -> &'a str {
    if code == "Space" || key == "Spacebar" {
        " "
    } else {
        key
    }
}
