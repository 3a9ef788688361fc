//! Game settings and preferences
//!
//! Persisted as JSON in LocalStorage. Missing fields fall back to defaults so
//! older saved settings keep loading.

use serde::{Deserialize, Serialize};

use crate::sim::{LevelKind, Tuning};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Layout to build on start
    pub level: LevelKind,
    /// Fixed seed for procedural levels; `None` seeds from the clock
    pub seed: Option<u64>,
    /// Physics tuning
    pub tuning: Tuning,

    // === Rendering ===
    /// Draw platforms of other slices as faint previews
    pub ghost_platforms: bool,
    /// Opacity of those previews (0.0 - 1.0)
    pub ghost_opacity: f32,
    /// Show the status line
    pub show_status: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: LevelKind::Classic,
            seed: None,
            tuning: Tuning::default(),

            ghost_platforms: true,
            ghost_opacity: 0.1,
            show_status: true,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "slice_hop_settings";

    /// Parse settings JSON, clamping values that would break rendering
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str::<Settings>(json) {
            Ok(mut settings) => {
                settings.ghost_opacity = settings.ghost_opacity.clamp(0.0, 1.0);
                settings.tuning.max_slice = settings.tuning.max_slice.max(0);
                Some(settings)
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                None
            }
        }
    }

    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }

    /// Seed to build the next level with
    pub fn level_seed(&self, clock_ms: f64) -> u64 {
        self.seed.unwrap_or(clock_ms as u64)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let (Some(storage), Some(json)) = (storage, self.to_json()) {
            if storage.set_item(Self::STORAGE_KEY, &json).is_ok() {
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_keeps_values() {
        let settings = Settings {
            level: LevelKind::Procedural,
            seed: Some(77),
            ghost_opacity: 0.25,
            ..Settings::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json), Some(settings));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings = Settings::from_json(r#"{ "level": "Procedural" }"#).unwrap();
        assert_eq!(settings.level, LevelKind::Procedural);
        assert!(settings.ghost_platforms);
        assert_eq!(settings.tuning, Tuning::default());
    }

    #[test]
    fn test_out_of_range_values_clamped() {
        let settings =
            Settings::from_json(r#"{ "ghost_opacity": 3.0, "tuning": { "max_slice": -2 } }"#)
                .unwrap();
        assert_eq!(settings.ghost_opacity, 1.0);
        assert_eq!(settings.tuning.max_slice, 0);
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert_eq!(Settings::from_json("{ not json"), None);
    }

    #[test]
    fn test_level_seed() {
        let settings = Settings::default();
        assert_eq!(settings.level_seed(1234.9), 1234);
        let fixed = Settings {
            seed: Some(5),
            ..Settings::default()
        };
        assert_eq!(fixed.level_seed(1234.0), 5);
    }
}
