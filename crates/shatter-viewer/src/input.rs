//! Keyboard state for the 3D viewport
//!
//! Keys are fed in as press/release events by whatever windowing layer hosts
//! the editor. Held keys become camera movement once per tick; function keys
//! become one-shot commands.

use serde::{Deserialize, Serialize};
use shatter_render::Movement;
use std::collections::HashSet;

/// Keys the editor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    W,
    A,
    S,
    D,
    Q,
    E,
    Control,
    Shift,
    F1,
    F2,
    F3,
    F6,
    F7,
    F8,
}

/// One-shot editor actions bound to function keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    ToggleFaces,
    ToggleWireframe,
    ToggleColour,
    ToggleGameView,
    /// Fit the camera speed to the loaded scene's depth
    FitSpeed,
    ResetCamera,
}

impl Command {
    pub fn for_key(key: Key) -> Option<Command> {
        match key {
            Key::F1 => Some(Command::ToggleFaces),
            Key::F2 => Some(Command::ToggleWireframe),
            Key::F3 => Some(Command::ToggleColour),
            Key::F6 => Some(Command::ToggleGameView),
            Key::F7 => Some(Command::FitSpeed),
            Key::F8 => Some(Command::ResetCamera),
            _ => None,
        }
    }
}

/// Tracks held keys and the commands pressed since the last tick
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys_down: HashSet<Key>,
    pending: Vec<Command>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a key press event. Auto-repeat of a held key is ignored.
    pub fn process_key_down(&mut self, key: Key) {
        if self.keys_down.insert(key) {
            if let Some(command) = Command::for_key(key) {
                self.pending.push(command);
            }
        }
    }

    pub fn process_key_up(&mut self, key: Key) {
        self.keys_down.remove(&key);
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// Drop every held key, e.g. when the viewport loses focus
    pub fn release_all(&mut self) {
        self.keys_down.clear();
    }

    /// Directional input from the held keys
    pub fn movement(&self) -> Movement {
        let axis = |pos: bool, neg: bool| match (pos, neg) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        };
        let down = |key| self.is_key_down(key);

        Movement {
            forward: axis(down(Key::W), down(Key::S)),
            right: axis(down(Key::D), down(Key::A)),
            up: axis(
                down(Key::E) || down(Key::Shift),
                down(Key::Q) || down(Key::Control),
            ),
        }
    }

    /// Commands pressed since the last call, in press order
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.pending)
    }
}
