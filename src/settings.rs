//! Game settings and preferences
//!
//! Read from an optional JSON file. Settings only change presentation and
//! seeding, never the simulation rules.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::ViewOptions;

/// Environment variable naming the settings file
pub const SETTINGS_ENV: &str = "SURVIVAL_DODGER_SETTINGS";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed (random per run when absent)
    pub seed: Option<u64>,

    // === Art layer ===
    pub show_grid: bool,
    pub show_art: bool,
    /// Initial palette index (wraps)
    pub palette: usize,

    // === Visual Effects ===
    /// Jitter the scene on a fatal hit
    pub screen_shake: bool,
    /// Red wash on a fatal hit
    pub screen_flash: bool,

    // === Accessibility ===
    /// Reduced motion (disables shake and flash)
    pub reduced_motion: bool,

    // === Frontend ===
    /// Frames per second the terminal loop aims for
    pub target_fps: u32,
    /// Write logs here instead of stderr
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,

            show_grid: true,
            show_art: true,
            palette: 0,

            screen_shake: true,
            screen_flash: true,

            reduced_motion: false,

            target_fps: 60,
            log_file: None,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective screen flash (respects reduced_motion)
    pub fn effective_screen_flash(&self) -> bool {
        self.screen_flash && !self.reduced_motion
    }

    /// Initial view toggles for a new game
    pub fn view_options(&self) -> ViewOptions {
        let mut view = ViewOptions {
            show_grid: self.show_grid,
            show_art: self.show_art,
            palette: 0,
        };
        view.set_palette(self.palette);
        view
    }

    /// Frame budget in seconds (at least 1 fps)
    pub fn frame_time(&self) -> f32 {
        1.0 / self.target_fps.max(1) as f32
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load from the file named by `SURVIVAL_DODGER_SETTINGS`, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(SETTINGS_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", Path::new(&path).display());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 42, "palette": 4 }"#).unwrap();
        assert_eq!(settings.seed, Some(42));
        assert!(settings.show_grid);
        assert_eq!(settings.target_fps, 60);
        // Palette index wraps when converted to view options
        assert_eq!(settings.view_options().palette, 1);
    }

    #[test]
    fn test_reduced_motion_disables_effects() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_screen_shake());
        assert!(!settings.effective_screen_flash());
        assert!(Settings::default().effective_screen_shake());
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            seed: Some(7),
            show_art: false,
            log_file: Some(PathBuf::from("dodger.log")),
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Parse(_))
        ));
        assert!(matches!(
            Settings::load_from("/definitely/not/here.json"),
            Err(SettingsError::Io { .. })
        ));
    }

    #[test]
    fn test_frame_time_never_divides_by_zero() {
        let settings = Settings {
            target_fps: 0,
            ..Default::default()
        };
        assert_eq!(settings.frame_time(), 1.0);
    }
}
