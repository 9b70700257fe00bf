/// Keyboard intent tracking.
///
/// Instead of acting on each key event individually, the tracker remembers
/// when every game key was last seen pressed (press or auto-repeat).  Each
/// frame the session asks which keys are still "fresh" and turns them into
/// an [`InputIntent`].
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (kitty protocol etc.): real
///   `Release` events remove the key immediately.
/// * **Classic terminals**: only `Press` events arrive (OS key-repeat shows
///   up as repeated presses).  Keys expire after `KEY_HOLD_WINDOW_MS`
///   without a repeat.

use std::collections::HashMap;

use crossterm::event::KeyCode;

use crate::consts::KEY_HOLD_WINDOW_MS;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
    Escape,
    /// Anything else.  Only useful as an "any key" press.
    Other,
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Key::Left,
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Key::Right,
            KeyCode::Char(' ') => Key::Fire,
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Key::Escape,
            _ => Key::Other,
        }
    }
}

/// What the player wants this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputIntent {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
}

impl InputIntent {
    /// -1, 0 or 1.  Both directions held cancel out.
    pub fn direction(&self) -> i32 {
        match (self.move_left, self.move_right) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }
}

#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Key → session time (ms) it was last pressed or repeated.
    last_seen: HashMap<Key, u64>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key, now_ms: u64) {
        if matches!(key, Key::Left | Key::Right | Key::Fire) {
            self.last_seen.insert(key, now_ms);
        }
    }

    pub fn release(&mut self, key: Key) {
        self.last_seen.remove(&key);
    }

    pub fn is_held(&self, key: Key, now_ms: u64) -> bool {
        self.last_seen
            .get(&key)
            .map(|&last| now_ms.saturating_sub(last) <= KEY_HOLD_WINDOW_MS)
            .unwrap_or(false)
    }

    pub fn intent(&self, now_ms: u64) -> InputIntent {
        InputIntent {
            move_left: self.is_held(Key::Left, now_ms),
            move_right: self.is_held(Key::Right, now_ms),
            fire: self.is_held(Key::Fire, now_ms),
        }
    }

    /// Forget every held key.
    pub fn clear(&mut self) {
        self.last_seen.clear();
    }
}
