//! Game settings
//!
//! Viewport size and gameplay timings, stored as JSON. Physics tuning that
//! the collision rules depend on stays in [`crate::consts`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("viewport must be positive, got {width}x{height}")]
    Viewport { width: f32, height: f32 },
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Viewport width (pixels); camera thresholds are fractions of it
    pub viewport_width: f32,
    /// Viewport height (pixels); actors below it have fallen out
    pub viewport_height: f32,
    /// Live fireball cap
    pub max_fireballs: usize,
    /// How long a killed enemy or player stays visible (seconds)
    pub death_linger_secs: f32,
    /// Brick fragment lifetime (seconds)
    pub fragment_lifetime_secs: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: 640.0,
            viewport_height: 480.0,
            max_fireballs: 3,
            death_linger_secs: 0.25,
            fragment_lifetime_secs: 2.0,
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Read settings, falling back to defaults on any error
    pub fn load(path: impl AsRef<Path>) -> Self {
        match Self::try_load(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.as_ref().display());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let (width, height) = (self.viewport_width, self.viewport_height);
        if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
            return Err(SettingsError::Viewport { width, height });
        }
        Ok(())
    }

    /// Linger time for death sprites
    pub fn death_linger(&self) -> Duration {
        Duration::try_from_secs_f32(self.death_linger_secs).unwrap_or(Duration::ZERO)
    }

    /// Brick fragment lifetime
    pub fn fragment_lifetime(&self) -> Duration {
        Duration::try_from_secs_f32(self.fragment_lifetime_secs).unwrap_or(Duration::ZERO)
    }
}
