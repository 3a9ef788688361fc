//! Keyboard and wheel state between animation frames
//!
//! Event handlers only record what happened; the game loop turns the
//! recorded state into a [`FrameInput`] for each simulation step.

use std::collections::HashSet;

use crate::scroll_step;
use crate::sim::FrameInput;

/// `KeyboardEvent.key` values for each action
pub const LEFT_KEYS: &[&str] = &["ArrowLeft", "a"];
pub const RIGHT_KEYS: &[&str] = &["ArrowRight", "d"];
pub const JUMP_KEYS: &[&str] = &["ArrowUp", "w", " "];

/// Tracks held keys and one-shot requests across frames.
#[derive(Debug, Default)]
pub struct InputState {
    keys_down: HashSet<String>,
    /// Wheel notches not yet consumed by a step, oldest first
    pending_scroll: Vec<i32>,
    pending_reset: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: &str) {
        self.keys_down.insert(key.to_owned());
    }

    pub fn key_up(&mut self, key: &str) {
        self.keys_down.remove(key);
    }

    /// Forget every held key (focus lost, so no keyup will arrive)
    pub fn release_all(&mut self) {
        self.keys_down.clear();
    }

    pub fn is_down(&self, key: &str) -> bool {
        self.keys_down.contains(key)
    }

    fn any_down(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.is_down(k))
    }

    /// Whether the key drives an action (so the browser default can be suppressed)
    pub fn is_game_key(key: &str) -> bool {
        [LEFT_KEYS, RIGHT_KEYS, JUMP_KEYS]
            .iter()
            .any(|keys| keys.contains(&key))
    }

    /// Record one wheel event
    pub fn wheel(&mut self, delta_y: f64) {
        let step = scroll_step(delta_y);
        if step != 0 {
            self.pending_scroll.push(step);
        }
    }

    pub fn request_reset(&mut self) {
        self.pending_reset = true;
    }

    /// Input for the next step
    pub fn frame_input(&self) -> FrameInput {
        FrameInput {
            left: self.any_down(LEFT_KEYS),
            right: self.any_down(RIGHT_KEYS),
            jump: self.any_down(JUMP_KEYS),
            scroll: self.pending_scroll.clone(),
            reset: self.pending_reset,
        }
    }

    /// Drop scroll and reset once a step has applied them
    pub fn clear_one_shots(&mut self) {
        self.pending_scroll.clear();
        self.pending_reset = false;
    }
}
