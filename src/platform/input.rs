//! Held keys to per-tick input
//!
//! Movement is level-triggered; jump is edge-triggered so holding the key
//! produces exactly one jump intent.

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Raw held state of the control keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyState {
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub jump: bool,
}

/// Converts held keys into per-tick input
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    jump_held: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce this tick's input from the current key state
    pub fn sample(&mut self, keys: &KeyState) -> TickInput {
        let jump = keys.jump && !self.jump_held;
        self.jump_held = keys.jump;
        TickInput {
            left: keys.left,
            right: keys.right,
            jump,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_is_an_edge() {
        let mut latch = InputLatch::new();
        let held = KeyState { jump: true, ..Default::default() };
        assert!(latch.sample(&held).jump);
        assert!(!latch.sample(&held).jump);
        assert!(!latch.sample(&KeyState::default()).jump);
        assert!(latch.sample(&held).jump);
    }

    #[test]
    fn test_movement_passes_through() {
        let mut latch = InputLatch::new();
        let keys = KeyState { left: true, right: true, jump: false };
        let input = latch.sample(&keys);
        assert!(input.left && input.right);
        assert!(!input.jump);
    }
}
