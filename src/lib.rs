//! Slice Hop - a depth-slicing 2D platformer
//!
//! Core modules:
//! - `sim`: Deterministic world simulation (physics, collision, levels)
//! - `input`: Held keys and wheel steps, turned into per-frame input
//! - `renderer`: Scene building and the WebGPU rendering pipeline
//! - `settings`: User preferences persisted to LocalStorage

pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use input::InputState;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one prototype animation frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player box
    pub const PLAYER_SIZE: f32 = 30.0;
    /// Player spawn, measured from the left edge and the bottom edge
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_FROM_BOTTOM: f32 = 60.0;
    /// How far below the viewport the player may fall before respawning
    pub const FALL_OUT_MARGIN: f32 = 200.0;

    /// Platform thickness used by every layout
    pub const PLATFORM_HEIGHT: f32 = 20.0;
    /// Collectible box
    pub const ITEM_SIZE: f32 = 16.0;

    /// Platform shrink per unit of depth distance
    pub const PLATFORM_DEPTH_SCALE: f32 = 0.3;
    /// Player shrink per unit of fractional depth
    pub const PLAYER_DEPTH_SCALE: f32 = 0.2;
    /// Far slices never shrink below this
    pub const MIN_DRAW_SCALE: f32 = 0.1;
}

/// Discrete slice a continuous depth belongs to.
///
/// Halves round up, so 0.5 belongs to slice 1 and 1.5 to slice 2.
#[inline]
pub fn slice_of(z: f32) -> i32 {
    (z + 0.5).floor() as i32
}

/// Sign of a wheel delta as a slice step; zero scrolls nowhere
#[inline]
pub fn scroll_step(delta_y: f64) -> i32 {
    if delta_y > 0.0 {
        1
    } else if delta_y < 0.0 {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_of_rounds_half_up() {
        assert_eq!(slice_of(0.0), 0);
        assert_eq!(slice_of(0.49), 0);
        assert_eq!(slice_of(0.5), 1);
        assert_eq!(slice_of(1.5), 2);
        assert_eq!(slice_of(1.999), 2);
        assert_eq!(slice_of(-0.5), 0);
    }

    #[test]
    fn test_scroll_step() {
        assert_eq!(scroll_step(120.0), 1);
        assert_eq!(scroll_step(-3.0), -1);
        assert_eq!(scroll_step(0.0), 0);
        assert_eq!(scroll_step(-0.0), 0);
    }
}
