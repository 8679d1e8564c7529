//! Player settings and preferences
//!
//! Persisted as JSON next to the game, separate from any playthrough state
//! (there is none to save).

use std::fs;
use std::io;
use std::ops::RangeInclusive;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::Controls;

/// Field of view slider range (degrees)
pub const FOV_RANGE: RangeInclusive<f32> = 60.0..=120.0;
/// Bob intensity range (fraction of full bob)
pub const BOB_RANGE: RangeInclusive<f32> = 0.0..=1.0;
/// Mouse speed range, in hundredths
pub const MOUSE_SPEED_RANGE: RangeInclusive<i32> = -400..=400;

/// Errors from reading or writing the settings file
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Vertical field of view (degrees)
    pub fov: f32,
    /// Head bob strength (0.0 - 1.0)
    pub bob_intensity: f32,
    /// Mouse speed in hundredths, negative inverts the axis
    pub mouse_speed_x: i32,
    pub mouse_speed_y: i32,
    /// Use the plain font instead of the pixel font
    pub clear_font: bool,
    /// Photosensitivity warning has been dismissed once
    pub warning_acknowledged: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fov: 90.0,
            bob_intensity: 1.0,
            mouse_speed_x: 100,
            mouse_speed_y: 100,
            clear_font: false,
            warning_acknowledged: false,
        }
    }
}

impl Settings {
    /// Clamp every value into its slider range
    pub fn sanitized(mut self) -> Self {
        let fov = if self.fov.is_finite() { self.fov } else { 90.0 };
        self.fov = fov.clamp(*FOV_RANGE.start(), *FOV_RANGE.end());
        let bob = if self.bob_intensity.is_finite() { self.bob_intensity } else { 1.0 };
        self.bob_intensity = bob.clamp(*BOB_RANGE.start(), *BOB_RANGE.end());
        self.mouse_speed_x = self
            .mouse_speed_x
            .clamp(*MOUSE_SPEED_RANGE.start(), *MOUSE_SPEED_RANGE.end());
        self.mouse_speed_y = self
            .mouse_speed_y
            .clamp(*MOUSE_SPEED_RANGE.start(), *MOUSE_SPEED_RANGE.end());
        self
    }

    /// Simulation-facing subset of the settings
    pub fn controls(&self) -> Controls {
        Controls {
            mouse_speed: Vec2::new(self.mouse_speed_x as f32, self.mouse_speed_y as f32) / 100.0,
            bob_intensity: self.bob_intensity,
        }
    }

    /// Switch between the pixel font and the plain font
    pub fn toggle_font(&mut self) {
        self.clear_font = !self.clear_font;
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        Ok(settings.sanitized())
    }

    /// Load settings, falling back to defaults if the file is missing or bad
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No settings file at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring settings at {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
