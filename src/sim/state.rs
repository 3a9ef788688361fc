//! World state and core simulation types
//!
//! Everything the frame step reads or mutates lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::level::{self, LevelKind};
use super::tuning::Tuning;
use crate::consts::*;
use crate::slice_of;

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Continuous depth, blended toward `target_z` every step
    pub z: f32,
    /// Slice selected by scrolling
    pub target_z: i32,
    /// Vertical velocity (positive is down)
    pub vy: f32,
    pub on_ground: bool,
}

impl Player {
    pub fn new(start: Vec2) -> Self {
        Self {
            pos: start,
            size: Vec2::splat(PLAYER_SIZE),
            z: 0.0,
            target_z: 0,
            vy: 0.0,
            on_ground: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Discrete slice the player currently occupies
    #[inline]
    pub fn slice(&self) -> i32 {
        slice_of(self.z)
    }

    /// Move the target slice by `steps`, staying inside [0, max_slice]
    pub fn shift_target(&mut self, steps: i32, max_slice: i32) {
        self.target_z = (self.target_z + steps).clamp(0, max_slice.max(0));
    }

    /// Put the player back at the start point, at rest on slice 0
    pub fn reset_to(&mut self, start: Vec2) {
        self.pos = start;
        self.vy = 0.0;
        self.z = 0.0;
        self.target_z = 0;
        self.on_ground = false;
    }
}

/// A static platform on one slice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    pub z: i32,
}

impl Platform {
    pub fn new(x: f32, y: f32, w: f32, h: f32, z: i32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            z,
        }
    }
}

/// A collectible on one slice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub rect: Rect,
    pub z: i32,
    pub collected: bool,
}

impl Item {
    pub fn new(x: f32, y: f32, z: i32) -> Self {
        Self {
            rect: Rect::new(x, y, ITEM_SIZE, ITEM_SIZE),
            z,
            collected: false,
        }
    }
}

/// Complete world state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    /// Seed the procedural layout was generated from
    pub seed: u64,
    pub level: LevelKind,
    pub tuning: Tuning,
    /// Viewport the level was laid out for (CSS pixels)
    pub viewport: Vec2,
    /// Where the player spawns and resets to
    pub start: Vec2,
    pub player: Player,
    /// Collision order is list order
    pub platforms: Vec<Platform>,
    pub items: Vec<Item>,
    /// Deepest reachable slice
    pub max_slice: i32,
    /// Simulation step counter
    pub frame_ticks: u64,
}

impl WorldState {
    /// Build a fresh world for the given viewport
    pub fn new(level: LevelKind, seed: u64, viewport: Vec2, tuning: Tuning) -> Self {
        let layout = level::build(level, seed, viewport, &tuning);
        let start = start_point(viewport);
        log::info!(
            "Built {:?} level: {} platforms, {} items, slices 0..={}",
            level,
            layout.platforms.len(),
            layout.items.len(),
            layout.max_slice
        );

        Self {
            seed,
            level,
            tuning,
            viewport,
            start,
            player: Player::new(start),
            platforms: layout.platforms,
            items: layout.items,
            max_slice: layout.max_slice,
            frame_ticks: 0,
        }
    }

    /// Restore the player start state and every collectible
    pub fn reset(&mut self) {
        self.player.reset_to(self.start);
        for item in &mut self.items {
            item.collected = false;
        }
    }

    pub fn collected_count(&self) -> usize {
        self.items.iter().filter(|i| i.collected).count()
    }

    /// Status line shown in the HUD
    pub fn status_line(&self) -> String {
        format!(
            "Slice Z: {:.2}  Items: {}/{}",
            self.player.z,
            self.collected_count(),
            self.items.len()
        )
    }
}

/// Player spawn point for a viewport
pub fn start_point(viewport: Vec2) -> Vec2 {
    Vec2::new(PLAYER_START_X, viewport.y - PLAYER_START_FROM_BOTTOM)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> WorldState {
        WorldState::new(
            LevelKind::Classic,
            7,
            Vec2::new(800.0, 600.0),
            Tuning::default(),
        )
    }

    #[test]
    fn test_new_world_spawns_at_start() {
        let state = world();
        assert_eq!(state.player.pos, Vec2::new(100.0, 540.0));
        assert_eq!(state.player.size, Vec2::splat(30.0));
        assert_eq!(state.player.z, 0.0);
        assert_eq!(state.player.target_z, 0);
        assert_eq!(state.collected_count(), 0);
    }

    #[test]
    fn test_shift_target_clamps() {
        let mut player = Player::new(Vec2::ZERO);
        player.shift_target(-1, 2);
        assert_eq!(player.target_z, 0);
        player.shift_target(5, 2);
        assert_eq!(player.target_z, 2);
        player.shift_target(-1, 2);
        assert_eq!(player.target_z, 1);
    }

    #[test]
    fn test_reset_restores_player_and_items() {
        let mut state = world();
        state.player.pos = Vec2::new(400.0, 10.0);
        state.player.vy = 7.5;
        state.player.z = 1.7;
        state.player.target_z = 2;
        for item in &mut state.items {
            item.collected = true;
        }

        state.reset();

        assert_eq!(state.player.pos, state.start);
        assert_eq!(state.player.vy, 0.0);
        assert_eq!(state.player.z, 0.0);
        assert_eq!(state.player.target_z, 0);
        assert_eq!(state.collected_count(), 0);
    }

    #[test]
    fn test_status_line() {
        let mut state = world();
        state.player.z = 1.234;
        state.items[0].collected = true;
        let total = state.items.len();
        assert_eq!(state.status_line(), format!("Slice Z: 1.23  Items: 1/{total}"));
    }
}
