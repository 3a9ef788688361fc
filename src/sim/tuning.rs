//! Data-driven physics constants
//!
//! Everything here is expressed per simulation step, not per second.

use serde::{Deserialize, Serialize};

/// Physics and slice tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Added to vertical velocity every step
    pub gravity: f32,
    /// Vertical velocity set by a jump (negative is up)
    pub jump_strength: f32,
    /// Horizontal distance per step while a move key is held
    pub move_speed: f32,
    /// Fraction of the remaining depth distance closed each step
    pub depth_blend: f32,
    /// Deepest slice for procedural levels (classic levels always use 2)
    pub max_slice: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.6,
            jump_strength: -12.0,
            move_speed: 5.0,
            depth_blend: 0.1,
            max_slice: 4,
        }
    }
}
