//! Game settings and preferences
//!
//! Persisted as JSON next to the executable. The zoom level is the only piece
//! of gameplay state that survives between sessions.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{BG_IMAGE_PATH, MAX_ZOOM, MIN_ZOOM, SPEEDLINE_LIFETIME};

/// Default settings file name
pub const SETTINGS_FILE: &str = "flipline_settings.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Last zoom level chosen by the player
    pub zoom_level: f32,

    // === Visual Effects ===
    /// Speedline bursts on gravity flips
    pub particles: bool,
    /// Frames a speedline lives
    pub speedline_lifetime: u32,
    /// Background image, tiled with parallax
    pub background_path: String,

    // === HUD ===
    /// Draw the instruction overlay
    pub show_hud: bool,

    /// Seed for visual randomness (speedline bursts)
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            zoom_level: 1.0,
            particles: true,
            speedline_lifetime: SPEEDLINE_LIFETIME,
            background_path: BG_IMAGE_PATH.to_string(),
            show_hud: true,
            seed: 0x5EED,
        }
    }
}

impl Settings {
    /// Zoom clamped to the playable range (a hand-edited file can hold anything)
    pub fn effective_zoom(&self) -> f32 {
        if self.zoom_level.is_finite() {
            self.zoom_level.clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            1.0
        }
    }

    /// Speedline lifetime, never zero
    pub fn effective_lifetime(&self) -> u32 {
        self.speedline_lifetime.max(1)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file. Failures are logged, not fatal.
    pub fn save(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match serde_json::to_string_pretty(self) {
            Ok(json) => match std::fs::write(path, json) {
                Ok(()) => log::info!("Settings saved to {}", path.display()),
                Err(e) => log::warn!("Failed to save settings to {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Failed to serialize settings: {}", e),
        }
    }
}
