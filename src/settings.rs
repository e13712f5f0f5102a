//! Game settings and preferences
//!
//! Read from a JSON file next to the binary. Missing fields take their
//! defaults; a missing or unreadable file means all defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_LITERS, DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Simulation ===
    /// RNG seed; same seed and inputs replay the same run
    pub seed: u64,
    /// Liters shared out across each level's bottles
    pub liters: f64,
    /// Directory holding `0.json`, `1.json`, ...
    pub levels_dir: PathBuf,
    /// Asset manifest (image counts and sizes per key)
    pub asset_manifest: PathBuf,
    /// Stop after this many frames (0 = run until quit)
    pub max_frames: u64,

    // === Display ===
    pub display_width: u32,
    pub display_height: u32,
    /// Integer upscale from the display buffer to the window
    pub window_scale: u32,

    // === Visual Effects ===
    /// Screen shake on deaths and smashed machines
    pub screen_shake: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    // === Accessibility ===
    /// Reduced motion (disables shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,
            liters: DEFAULT_LITERS,
            levels_dir: PathBuf::from("maps"),
            asset_manifest: PathBuf::from("assets.json"),
            max_frames: 0,

            display_width: DISPLAY_WIDTH as u32,
            display_height: DISPLAY_HEIGHT as u32,
            window_scale: 2,

            screen_shake: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Window size after upscaling
    pub fn window_size(&self) -> (u32, u32) {
        let scale = self.window_scale.max(1);
        (self.display_width * scale, self.display_height * scale)
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                log::warn!("No settings at {} ({err}); using defaults", path.display());
                return Self::default();
            }
        };
        match serde_json::from_str(&text) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Ignoring malformed settings in {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
