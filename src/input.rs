//! Held-key snapshot
//!
//! Key events arrive asynchronously from the host (DOM listeners on the web
//! build); they only flip held/not-held bits here. The simulation reads the
//! snapshot synchronously once per tick, so a press/release pair that both
//! land between two ticks is invisible to gameplay. That is intentional and
//! matches the event model the game was designed against.

use std::collections::HashSet;

use crate::sim::{Command, TickInput};

/// Keys the game understands. Everything else is ignored at the parse step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code` to a game key.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Key::Left),
            "ArrowRight" | "KeyD" => Some(Key::Right),
            _ => None,
        }
    }
}

/// Instantaneous held-state of the directional keys.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    held: HashSet<Key>,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key-down callback.
    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    /// Key-up callback.
    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Drop all held state (used on focus loss so keys don't stick).
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Freeze the snapshot into the input for one logical tick.
    pub fn tick_input(&self, seq: u64, command: Option<Command>) -> TickInput {
        TickInput {
            seq,
            move_left: self.is_held(Key::Left),
            move_right: self.is_held(Key::Right),
            command,
        }
    }
}
