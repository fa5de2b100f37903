use std::collections::HashSet;

use winit::keyboard::KeyCode;

use crate::controller::host::KeySource;
use crate::model::{FrameInput, PaddleInput};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    S,
    ArrowUp,
    ArrowDown,
    Escape,
}

impl Key {
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::KeyW => Some(Key::W),
            KeyCode::KeyS => Some(Key::S),
            KeyCode::ArrowUp => Some(Key::ArrowUp),
            KeyCode::ArrowDown => Some(Key::ArrowDown),
            KeyCode::Escape => Some(Key::Escape),
            _ => None,
        }
    }
}

/// Which key moves which paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub left_up: Key,
    pub left_down: Key,
    pub right_up: Key,
    pub right_down: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left_up: Key::W,
            left_down: Key::S,
            right_up: Key::ArrowUp,
            right_down: Key::ArrowDown,
        }
    }
}

impl KeyBindings {
    /// Read both paddles' keys for this frame
    pub fn sample<K: KeySource + ?Sized>(&self, keys: &K) -> FrameInput {
        FrameInput {
            left: PaddleInput {
                up: keys.is_key_pressed(self.left_up),
                down: keys.is_key_pressed(self.left_down),
            },
            right: PaddleInput {
                up: keys.is_key_pressed(self.right_up),
                down: keys.is_key_pressed(self.right_down),
            },
        }
    }
}

/// Keys currently held, fed from window key events
#[derive(Debug, Default)]
pub struct PressedKeys {
    held: HashSet<Key>,
}

impl PressedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Forget everything, e.g. when the window loses focus and release events won't arrive.
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

impl KeySource for PressedKeys {
    fn is_key_pressed(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}
