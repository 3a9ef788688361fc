//! Level layouts
//!
//! Platforms are laid out against the viewport the world is built for, so the
//! ground always spans the visible width and sits on the bottom edge.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{Item, Platform};
use super::tuning::Tuning;
use crate::consts::{ITEM_SIZE, PLATFORM_HEIGHT};

/// Slices in the classic layout (0, 1, 2)
pub const CLASSIC_MAX_SLICE: i32 = 2;
/// Gap between a platform top and the bottom of an item hovering over it
pub const ITEM_HOVER: f32 = 24.0;

/// Which layout to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LevelKind {
    /// Fixed five-platform layout across three slices
    #[default]
    Classic,
    /// Seeded layout with a ground strip and floating platforms on every slice
    Procedural,
}

impl LevelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelKind::Classic => "Classic",
            LevelKind::Procedural => "Procedural",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(LevelKind::Classic),
            "procedural" | "proc" | "random" => Some(LevelKind::Procedural),
            _ => None,
        }
    }
}

/// Platforms and items produced for one world
#[derive(Debug, Clone)]
pub struct Layout {
    pub platforms: Vec<Platform>,
    pub items: Vec<Item>,
    pub max_slice: i32,
}

/// Build the layout for `kind`
pub fn build(kind: LevelKind, seed: u64, viewport: Vec2, tuning: &Tuning) -> Layout {
    match kind {
        LevelKind::Classic => classic(viewport),
        LevelKind::Procedural => procedural(seed, viewport, tuning.max_slice.max(0)),
    }
}

/// Item hovering over the middle of a platform
fn item_above(platform: &Platform) -> Item {
    let rect = &platform.rect;
    Item::new(
        rect.pos.x + (rect.size.x - ITEM_SIZE) / 2.0,
        rect.top() - ITEM_HOVER - ITEM_SIZE,
        platform.z,
    )
}

/// Hand-placed layout across three slices
pub fn classic(viewport: Vec2) -> Layout {
    let (w, h) = (viewport.x, viewport.y);
    let platforms = vec![
        Platform::new(0.0, h - 20.0, w, PLATFORM_HEIGHT, 0),
        Platform::new(200.0, h - 100.0, 100.0, PLATFORM_HEIGHT, 0),
        Platform::new(400.0, h - 150.0, 150.0, PLATFORM_HEIGHT, 1),
        Platform::new(150.0, h - 200.0, 100.0, PLATFORM_HEIGHT, 1),
        Platform::new(350.0, h - 250.0, 200.0, PLATFORM_HEIGHT, 2),
    ];
    // One collectible per slice, over the first floating platform of each
    let items = [1, 2, 4].iter().map(|&i| item_above(&platforms[i])).collect();

    Layout {
        platforms,
        items,
        max_slice: CLASSIC_MAX_SLICE,
    }
}

/// Seeded layout: a ground strip plus a climbing run of platforms per slice
pub fn procedural(seed: u64, viewport: Vec2, max_slice: i32) -> Layout {
    let mut rng = Pcg32::seed_from_u64(seed);
    let (w, h) = (viewport.x, viewport.y);
    let ground_y = h - PLATFORM_HEIGHT;

    let mut platforms = Vec::new();
    let mut items = Vec::new();

    for z in 0..=max_slice {
        platforms.push(Platform::new(0.0, ground_y, w, PLATFORM_HEIGHT, z));

        let count = rng.random_range(3..=6);
        let mut y = ground_y;
        let mut slice_items = 0;

        for _ in 0..count {
            // Rise stays under the jump apex (12^2 / (2 * 0.6) = 120)
            y -= rng.random_range(60.0_f32..=90.0);
            if y < PLATFORM_HEIGHT * 2.0 {
                break;
            }

            let pw = rng.random_range(80.0_f32..=200.0).min(w);
            let px = rng.random_range(0.0..=(w - pw).max(0.0));
            let platform = Platform::new(px, y, pw, PLATFORM_HEIGHT, z);

            if rng.random_bool(0.5) {
                items.push(item_above(&platform));
                slice_items += 1;
            }
            platforms.push(platform);
        }

        // Every slice offers at least one collectible, on its highest platform
        if slice_items == 0 {
            if let Some(top) = platforms.last() {
                items.push(item_above(top));
            }
        }
    }

    Layout {
        platforms,
        items,
        max_slice,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Vec2 = Vec2::new(1024.0, 768.0);

    #[test]
    fn test_classic_layout() {
        let layout = classic(VIEW);
        assert_eq!(layout.platforms.len(), 5);
        assert_eq!(layout.max_slice, 2);

        let ground = &layout.platforms[0];
        assert_eq!(ground.z, 0);
        assert_eq!(ground.rect.size.x, 1024.0);
        assert_eq!(ground.rect.top(), 748.0);

        let slices: Vec<i32> = layout.platforms.iter().map(|p| p.z).collect();
        assert_eq!(slices, vec![0, 0, 1, 1, 2]);
    }

    #[test]
    fn test_classic_items_one_per_slice() {
        let layout = classic(VIEW);
        let slices: Vec<i32> = layout.items.iter().map(|i| i.z).collect();
        assert_eq!(slices, vec![0, 1, 2]);
        assert!(layout.items.iter().all(|i| !i.collected));
    }

    #[test]
    fn test_procedural_is_deterministic() {
        let a = procedural(42, VIEW, 4);
        let b = procedural(42, VIEW, 4);
        assert_eq!(a.platforms.len(), b.platforms.len());
        for (pa, pb) in a.platforms.iter().zip(&b.platforms) {
            assert_eq!(pa.rect, pb.rect);
            assert_eq!(pa.z, pb.z);
        }
        assert_eq!(a.items.len(), b.items.len());
    }

    #[test]
    fn test_procedural_seeds_differ() {
        let a = procedural(1, VIEW, 4);
        let b = procedural(2, VIEW, 4);
        let same = a.platforms.len() == b.platforms.len()
            && a
                .platforms
                .iter()
                .zip(&b.platforms)
                .all(|(pa, pb)| pa.rect == pb.rect);
        assert!(!same);
    }

    #[test]
    fn test_procedural_every_slice_has_ground_and_item() {
        let layout = procedural(9001, VIEW, 3);
        assert_eq!(layout.max_slice, 3);
        for z in 0..=3 {
            let ground = layout
                .platforms
                .iter()
                .find(|p| p.z == z)
                .expect("slice has platforms");
            assert_eq!(ground.rect.pos.x, 0.0);
            assert_eq!(ground.rect.size.x, VIEW.x);
            assert_eq!(ground.rect.top(), VIEW.y - PLATFORM_HEIGHT);
            assert!(layout.items.iter().any(|i| i.z == z));
        }
    }

    #[test]
    fn test_procedural_platforms_fit_viewport() {
        let layout = procedural(5, Vec2::new(120.0, 600.0), 2);
        for p in &layout.platforms {
            assert!(p.rect.left() >= 0.0);
            assert!(p.rect.right() <= 120.0 + 0.001);
        }
    }

    #[test]
    fn test_level_kind_from_str() {
        assert_eq!(LevelKind::from_str("Classic"), Some(LevelKind::Classic));
        assert_eq!(LevelKind::from_str("proc"), Some(LevelKind::Procedural));
        assert_eq!(LevelKind::from_str("maze"), None);
    }
}
