//! Runner settings and preferences
//!
//! Persisted separately from progress. Every field has a default, so partial
//! files are fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::SIM_HZ;

/// Runner/presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Simulation rate
    pub tick_hz: u32,
    /// How long the death banner and shake stay up
    pub death_banner_ticks: u32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Files ===
    /// Level catalog; the built-in levels when unset
    pub level_catalog: Option<PathBuf>,
    /// Physics tuning overrides
    pub tuning_path: Option<PathBuf>,
    pub progress_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_hz: SIM_HZ,
            // 2 seconds
            death_banner_ticks: SIM_HZ * 2,

            master_volume: 1.0,
            sfx_volume: 1.0,
            muted: false,

            level_catalog: None,
            tuning_path: None,
            progress_path: PathBuf::from("devil_progress.json"),
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "devil_settings.json";

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("Using default settings");
                return Self::default();
            }
        };
        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Seconds per tick
    pub fn tick_seconds(&self) -> f32 {
        1.0 / self.tick_hz.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "muted": true, "tickHz": 30 }"#).unwrap();
        assert!(settings.muted);
        assert_eq!(settings.tick_hz, 30);
        assert_eq!(settings.death_banner_ticks, 120);
        assert_eq!(settings.progress_path, PathBuf::from("devil_progress.json"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        assert_eq!(Settings::load(Path::new("/no/such/settings.json")), Settings::default());
    }

    #[test]
    fn test_tick_seconds() {
        let settings = Settings::default();
        assert!((settings.tick_seconds() - 1.0 / 60.0).abs() < 1e-6);
        let zero = Settings { tick_hz: 0, ..Settings::default() };
        assert_eq!(zero.tick_seconds(), 1.0);
    }
}
