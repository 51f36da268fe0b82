//! Keyboard input handling
//!
//! Key events flip two flags between frames; the next tick reads whatever
//! they hold at that moment.

use crate::sim::TickInput;

/// Logical paddle direction a key maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Map a `KeyboardEvent.key` value to a direction
pub fn key_direction(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" | "w" | "W" => Some(Direction::Up),
        "ArrowDown" | "s" | "S" => Some(Direction::Down),
        _ => None,
    }
}

/// Held-key flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub up_pressed: bool,
    pub down_pressed: bool,
}

impl InputState {
    /// Key down. Returns true if the key is bound.
    pub fn handle_key_down(&mut self, key: &str) -> bool {
        self.set(key, true)
    }

    /// Key up. Returns true if the key is bound.
    pub fn handle_key_up(&mut self, key: &str) -> bool {
        self.set(key, false)
    }

    fn set(&mut self, key: &str, pressed: bool) -> bool {
        match key_direction(key) {
            Some(Direction::Up) => self.up_pressed = pressed,
            Some(Direction::Down) => self.down_pressed = pressed,
            None => return false,
        }
        true
    }

    /// Release everything (focus lost, new match)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Snapshot for the next tick
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            up: self.up_pressed,
            down: self.down_pressed,
        }
    }
}
