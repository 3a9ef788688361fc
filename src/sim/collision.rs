//! Collision tests for axis-aligned boxes
//!
//! Screen coordinates: x grows right, y grows down. A box is its top-left
//! corner plus a size.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict overlap; boxes that only share an edge do not touch
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.right() > other.left()
            && self.left() < other.right()
            && self.bottom() > other.top()
            && self.top() < other.bottom()
    }
}

/// Check whether a falling body lands on top of a platform.
///
/// `vy` is the vertical velocity that was just applied. The body counts as
/// landed when it overlaps horizontally, its feet are below the platform top,
/// and its feet are no deeper than the platform thickness plus this step's
/// fall. Returns the `y` that rests the body on the platform.
pub fn landing_y(body: &Rect, vy: f32, platform: &Rect) -> Option<f32> {
    let feet = body.bottom();
    let hit = body.right() > platform.left()
        && body.left() < platform.right()
        && feet > platform.top()
        && feet < platform.bottom() + vy;

    hit.then(|| platform.top() - body.size.y)
}
