//! Tuning and display settings
//!
//! Persisted as JSON next to the binary. Missing or broken files fall back
//! to defaults so a bad edit never blocks startup.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::scaling::{ScaleMode, Scaler};
use crate::sim::Physics;

/// Errors from loading or validating configuration files
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// Player movement and collision tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Horizontal speed while a move action is held (units/s)
    pub move_speed: f32,
    /// Vertical velocity set on jump (negative is up)
    pub jump_velocity: f32,
    /// Slack used to infer which face of a platform was crossed
    pub landing_tolerance: f32,
    /// Distance below the world before an out-of-bounds respawn
    pub fall_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            move_speed: DEFAULT_MOVE_SPEED,
            jump_velocity: DEFAULT_JUMP_VELOCITY,
            landing_tolerance: DEFAULT_LANDING_TOLERANCE,
            fall_margin: DEFAULT_FALL_MARGIN,
        }
    }
}

/// Display mapping settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub design_width: f32,
    pub design_height: f32,
    /// Mode active at startup (toggled at runtime by input)
    pub scale_mode: ScaleMode,
    /// Delta ceiling in seconds
    pub max_delta: f32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            design_width: DESIGN_WIDTH,
            design_height: DESIGN_HEIGHT,
            scale_mode: ScaleMode::Pixel,
            max_delta: MAX_DELTA,
        }
    }
}

impl DisplaySettings {
    pub fn scaler(&self) -> Scaler {
        Scaler::new(self.scale_mode, self.design_width, self.design_height)
    }
}

/// All runtime configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub physics: Physics,
    pub tuning: Tuning,
    pub display: DisplaySettings,
}

impl Settings {
    /// Reject values the simulation can't work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let display = &self.display;
        if !(display.design_width > 0.0 && display.design_height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "design resolution must be positive, got {}x{}",
                display.design_width, display.design_height
            )));
        }
        if !(display.max_delta > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "max_delta must be positive, got {}",
                display.max_delta
            )));
        }
        if !(self.tuning.landing_tolerance >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "landing_tolerance must not be negative, got {}",
                self.tuning.landing_tolerance
            )));
        }
        if !self.physics.gravity.is_finite() {
            return Err(ConfigError::Invalid("gravity must be finite".into()));
        }
        Ok(())
    }

    /// Parse settings from a JSON string
    pub fn from_json(json: &str, origin: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json, &path.display().to_string())
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("Using default settings");
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Settings saved");
        Ok(())
    }
}
