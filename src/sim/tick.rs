//! Frame step
//!
//! Advances the world by one simulation step. All constants are per step.

use super::collision::landing_y;
use super::state::WorldState;
use crate::consts::FALL_OUT_MARGIN;

/// Input commands for a single step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Move left held
    pub left: bool,
    /// Move right held
    pub right: bool,
    /// Jump held (only acts when grounded)
    pub jump: bool,
    /// Wheel notches in arrival order, each +1 or -1
    pub scroll: Vec<i32>,
    /// Reset player and collectibles
    pub reset: bool,
}

/// Things that happened during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEvent {
    /// Target slice changed to the given value
    SliceTargeted(i32),
    /// Explicit reset was applied
    Reset,
    Jumped,
    /// Landed after being airborne
    Landed,
    /// Item at this index was picked up
    ItemCollected(usize),
    /// Player fell out of the world and was put back at the start
    Respawned,
}

/// Advance the world by one step
pub fn tick(state: &mut WorldState, input: &FrameInput) -> Vec<FrameEvent> {
    let mut events = Vec::new();
    let tuning = state.tuning;

    if !input.scroll.is_empty() {
        let before = state.player.target_z;
        // Each notch clamps on its own, so a bound absorbs only its own notches
        for &step in &input.scroll {
            state.player.shift_target(step, state.max_slice);
        }
        if state.player.target_z != before {
            events.push(FrameEvent::SliceTargeted(state.player.target_z));
        }
    }

    if input.reset {
        state.reset();
        events.push(FrameEvent::Reset);
    }

    state.frame_ticks += 1;
    let player = &mut state.player;

    // Smooth depth transition; never settles exactly, slices use rounding
    player.z += (player.target_z as f32 - player.z) * tuning.depth_blend;

    if input.left {
        player.pos.x -= tuning.move_speed;
    }
    if input.right {
        player.pos.x += tuning.move_speed;
    }

    if input.jump && player.on_ground {
        player.vy = tuning.jump_strength;
        player.on_ground = false;
        events.push(FrameEvent::Jumped);
    }

    player.vy += tuning.gravity;
    player.pos.y += player.vy;

    // Only the current slice collides; the last platform hit wins
    let was_grounded = player.on_ground;
    let slice = player.slice();
    player.on_ground = false;
    for platform in state.platforms.iter().filter(|p| p.z == slice) {
        if let Some(y) = landing_y(&player.rect(), player.vy, &platform.rect) {
            player.pos.y = y;
            player.vy = 0.0;
            player.on_ground = true;
        }
    }
    if player.on_ground && !was_grounded {
        events.push(FrameEvent::Landed);
    }

    let body = player.rect();
    for (index, item) in state.items.iter_mut().enumerate() {
        if !item.collected && item.z == slice && body.overlaps(&item.rect) {
            item.collected = true;
            events.push(FrameEvent::ItemCollected(index));
        }
    }

    if player.pos.y > state.viewport.y + FALL_OUT_MARGIN {
        player.reset_to(state.start);
        events.push(FrameEvent::Respawned);
    }

    events
}


#[cfg(test)]
mod proptests {
    use glam::Vec2;
    use proptest::prelude::*;

    use super::*;
    use crate::sim::level::LevelKind;
    use crate::sim::tuning::Tuning;

    fn input_strategy() -> impl Strategy<Value = FrameInput> {
        (
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            prop::collection::vec(prop::sample::select(vec![-1i32, 1]), 0..4),
            prop::bool::weighted(0.02),
        )
            .prop_map(|(left, right, jump, scroll, reset)| FrameInput {
                left,
                right,
                jump,
                scroll,
                reset,
            })
    }

    proptest! {
        #[test]
        fn target_slice_stays_in_range(
            seed in any::<u64>(),
            inputs in prop::collection::vec(input_strategy(), 1..200),
        ) {
            let mut state = WorldState::new(
                LevelKind::Procedural,
                seed,
                Vec2::new(960.0, 640.0),
                Tuning::default(),
            );
            for input in &inputs {
                tick(&mut state, input);
                prop_assert!(state.player.target_z >= 0);
                prop_assert!(state.player.target_z <= state.max_slice);
                prop_assert!(state.player.slice() >= 0);
                prop_assert!(state.player.slice() <= state.max_slice);
            }
        }

        #[test]
        fn collected_items_only_return_on_reset(
            inputs in prop::collection::vec(input_strategy(), 1..300),
        ) {
            let mut state = WorldState::new(
                LevelKind::Classic,
                0,
                Vec2::new(800.0, 600.0),
                Tuning::default(),
            );
            for input in &inputs {
                let before: Vec<bool> = state.items.iter().map(|i| i.collected).collect();
                tick(&mut state, input);
                if !input.reset {
                    for (was, item) in before.iter().zip(&state.items) {
                        prop_assert!(!was || item.collected);
                    }
                }
            }
        }
    }
}
