//! Deterministic world simulation
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One step per call, constants expressed per step
//! - Seeded RNG only
//! - Stable iteration order (list order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod state;
pub mod tick;
pub mod tuning;

pub use collision::{Rect, landing_y};
pub use level::{Layout, LevelKind};
pub use state::{Item, Platform, Player, WorldState};
pub use tick::{FrameEvent, FrameInput, tick};
pub use tuning::Tuning;
