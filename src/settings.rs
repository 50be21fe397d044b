//! Session settings
//!
//! Stored as a JSON file next to the save slot. Anything missing falls back
//! to the defaults.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BALLOON_COUNT, DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// Session settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Level to load at session start
    pub level_path: PathBuf,
    /// Save slot for session snapshots
    pub save_path: PathBuf,
    /// Run seed (wander AI, balloons, legacy map)
    pub seed: u64,
    pub balloon_count: usize,

    // === Display (half-resolution world pixels) ===
    pub display_width: f32,
    pub display_height: f32,

    /// Use the random-hole fallback map instead of `level_path`
    pub legacy_map: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level_path: PathBuf::from("levels/circus.json"),
            save_path: PathBuf::from("game_save.json"),
            seed: 0,
            balloon_count: BALLOON_COUNT,
            display_width: DISPLAY_WIDTH,
            display_height: DISPLAY_HEIGHT,
            legacy_map: false,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, or defaults if it is missing/broken
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Display size in world pixels (camera viewport, balloon window)
    pub fn display_size(&self) -> Vec2 {
        Vec2::new(self.display_width, self.display_height)
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
