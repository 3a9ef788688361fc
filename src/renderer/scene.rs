//! Scene building
//!
//! Turns the world into an ordered list of screen-space rectangles. Pure, so
//! the depth scaling and ghosting can be tested without a GPU.

use glam::Vec2;

use super::vertex::colors;
use crate::consts::{MIN_DRAW_SCALE, PLATFORM_DEPTH_SCALE, PLAYER_DEPTH_SCALE};
use crate::settings::Settings;
use crate::sim::{Rect, WorldState};

/// One filled rectangle, drawn in list order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRect {
    pub rect: Rect,
    pub color: [f32; 4],
}

/// Scale for something `dz` slices away from the player
pub fn depth_scale(dz: f32) -> f32 {
    (1.0 - dz.abs() * PLATFORM_DEPTH_SCALE).max(MIN_DRAW_SCALE)
}

/// Shrink a rectangle and pull it toward the screen center by the same factor
pub fn parallax(rect: &Rect, scale: f32, screen: Vec2) -> Rect {
    let shift = (1.0 - scale) * screen / 2.0;
    Rect {
        pos: rect.pos + shift,
        size: rect.size * scale,
    }
}

/// Player shrink from the fractional part of its depth
pub fn player_scale(z: f32) -> f32 {
    1.0 - z.fract() * PLAYER_DEPTH_SCALE
}

/// Build the draw list: platforms, then items, then the player
pub fn build_scene(state: &WorldState, screen: Vec2, settings: &Settings) -> Vec<DrawRect> {
    let player = &state.player;
    let slice = player.slice();
    let ghost = colors::with_alpha(colors::PLATFORM, settings.ghost_opacity);

    let mut out = Vec::with_capacity(state.platforms.len() + state.items.len() + 1);

    for platform in &state.platforms {
        let active = platform.z == slice;
        if !active && !settings.ghost_platforms {
            continue;
        }
        let scale = depth_scale(platform.z as f32 - player.z);
        out.push(DrawRect {
            rect: parallax(&platform.rect, scale, screen),
            color: if active { colors::PLATFORM } else { ghost },
        });
    }

    for item in state.items.iter().filter(|i| !i.collected && i.z == slice) {
        let scale = depth_scale(item.z as f32 - player.z);
        out.push(DrawRect {
            rect: parallax(&item.rect, scale, screen),
            color: colors::ITEM,
        });
    }

    let scale = player_scale(player.z);
    out.push(DrawRect {
        rect: Rect {
            pos: player.pos,
            size: player.size * scale,
        },
        color: colors::PLAYER,
    });

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{LevelKind, Tuning};

    const SCREEN: Vec2 = Vec2::new(800.0, 600.0);

    fn world() -> WorldState {
        WorldState::new(LevelKind::Classic, 3, SCREEN, Tuning::default())
    }

    #[test]
    fn test_depth_scale() {
        assert_eq!(depth_scale(0.0), 1.0);
        assert!((depth_scale(1.0) - 0.7).abs() < 1e-6);
        assert!((depth_scale(-2.0) - 0.4).abs() < 1e-6);
        // Far slices bottom out instead of inverting
        assert_eq!(depth_scale(10.0), MIN_DRAW_SCALE);
    }

    #[test]
    fn test_parallax_pulls_toward_center() {
        let rect = Rect::new(400.0, 450.0, 150.0, 20.0);
        let out = parallax(&rect, 0.5, SCREEN);
        assert_eq!(out.pos, Vec2::new(600.0, 600.0));
        assert_eq!(out.size, Vec2::new(75.0, 10.0));

        assert_eq!(parallax(&rect, 1.0, SCREEN), rect);
    }

    #[test]
    fn test_player_scale() {
        assert_eq!(player_scale(0.0), 1.0);
        assert_eq!(player_scale(2.0), 1.0);
        assert!((player_scale(1.5) - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_active_slice_opaque_others_ghosted() {
        let state = world();
        let settings = Settings::default();
        let scene = build_scene(&state, SCREEN, &settings);

        // 5 platforms, 1 item on slice 0, the player
        assert_eq!(scene.len(), 7);
        for (draw, platform) in scene.iter().zip(&state.platforms) {
            if platform.z == 0 {
                assert_eq!(draw.color, colors::PLATFORM);
                assert_eq!(draw.rect, platform.rect);
            } else {
                assert_eq!(draw.color[3], settings.ghost_opacity);
                assert!(draw.rect.size.x < platform.rect.size.x);
            }
        }
        assert_eq!(scene[5].color, colors::ITEM);
        assert_eq!(scene[6].color, colors::PLAYER);
    }

    #[test]
    fn test_collected_and_other_slice_items_hidden() {
        let mut state = world();
        state.items[0].collected = true;
        let scene = build_scene(&state, SCREEN, &Settings::default());
        assert!(scene.iter().all(|d| d.color != colors::ITEM));
    }

    #[test]
    fn test_ghosts_can_be_disabled() {
        let state = world();
        let settings = Settings {
            ghost_platforms: false,
            ..Settings::default()
        };
        let scene = build_scene(&state, SCREEN, &settings);
        // Two slice-0 platforms, one item, the player
        assert_eq!(scene.len(), 4);
    }

    #[test]
    fn test_player_shrinks_between_slices() {
        let mut state = world();
        state.player.z = 0.4;
        let scene = build_scene(&state, SCREEN, &Settings::default());
        let player = scene.last().unwrap();
        assert_eq!(player.rect.pos, state.player.pos);
        assert!((player.rect.size.x - 30.0 * 0.92).abs() < 1e-4);
    }
}
