//! User settings.
//!
//! Settings come from an optional JSON file and are then overridden by
//! command-line flags. Nothing is ever written back.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::session::DEFAULT_RECENT_LIMIT;
use crate::types::{ConfigError, TimerConfig};

/// Name of the settings directory under the platform config dir.
const APP_DIR: &str = "proctor-timer";

/// Settings file name.
const FILE_NAME: &str = "settings.json";

fn default_duration_minutes() -> u32 {
    60
}

fn default_warning_minutes() -> u32 {
    10
}

fn default_critical_minutes() -> u32 {
    5
}

fn default_sound_enabled() -> bool {
    true
}

fn default_recent_limit() -> usize {
    DEFAULT_RECENT_LIMIT
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// Exam defaults in user-facing units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: u32,

    #[serde(default = "default_warning_minutes")]
    pub warning_minutes: u32,

    #[serde(default = "default_critical_minutes")]
    pub critical_minutes: u32,

    #[serde(default = "default_sound_enabled")]
    pub sound_enabled: bool,

    /// Number of violations shown in the "recent" list.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            duration_minutes: default_duration_minutes(),
            warning_minutes: default_warning_minutes(),
            critical_minutes: default_critical_minutes(),
            sound_enabled: default_sound_enabled(),
            recent_limit: default_recent_limit(),
        }
    }
}

impl Settings {
    /// Platform default location, e.g. `~/.config/proctor-timer/settings.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(FILE_NAME))
    }

    /// Loads settings.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// tried and a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::load_from(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => {
                    debug!("no settings file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Loads settings from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let raw = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&raw).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Applies command-line overrides.
    #[must_use]
    pub fn with_overrides(
        mut self,
        duration: Option<u32>,
        warning: Option<u32>,
        critical: Option<u32>,
    ) -> Self {
        if let Some(duration) = duration {
            self.duration_minutes = duration;
        }
        if let Some(warning) = warning {
            self.warning_minutes = warning;
        }
        if let Some(critical) = critical {
            self.critical_minutes = critical;
        }
        self
    }

    /// Validates the minute values and converts them to a timer configuration.
    ///
    /// # Errors
    ///
    /// Returns an error unless `0 < critical < warning < duration`.
    pub fn timer_config(&self) -> Result<TimerConfig, SettingsError> {
        Ok(TimerConfig::from_minutes(
            self.duration_minutes,
            self.warning_minutes,
            self.critical_minutes,
        )?)
    }
}
