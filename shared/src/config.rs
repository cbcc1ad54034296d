//! Configuration management (rewind.toml)
//!
//! Handles loading, saving, validating, and providing defaults for the
//! recorder and playback settings. Settings are stored in TOML format in the
//! platform-specific config directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_DAMPING_FACTOR, DEFAULT_PAUSED_TIME_SCALE, DEFAULT_RETENTION_WINDOW,
    DEFAULT_REWIND_SPEED, DEFAULT_SAMPLE_INTERVAL,
};

/// Rewind configuration.
///
/// Contains all tunable settings organized into sections.
/// Serialized to/from TOML format for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RewindConfig {
    /// History sampling settings
    #[serde(default)]
    pub recorder: RecorderConfig,
    /// Playback and re-entry settings
    #[serde(default)]
    pub playback: PlaybackConfig,
}

/// History sampling configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecorderConfig {
    /// Minimum seconds between two samples (default: 0.1)
    #[serde(default = "default_sample_interval")]
    pub sample_interval: f64,
    /// Maximum age of retained samples in seconds (default: 5.0)
    #[serde(default = "default_retention_window")]
    pub retention_window: f64,
}

/// Playback configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Virtual seconds rewound per simulated second (default: 1.0)
    #[serde(default = "default_rewind_speed")]
    pub rewind_speed: f64,
    /// Fraction of stored velocity restored on stop (default: 0.5, range: 0.0-1.0)
    #[serde(default = "default_damping_factor")]
    pub damping_factor: f32,
    /// Whether to pause the shared time scale while rewinding (default: false)
    #[serde(default)]
    pub pause_time_scale: bool,
    /// Time scale held while paused (default: 0.0)
    #[serde(default = "default_paused_time_scale")]
    pub paused_time_scale: f32,
}

fn default_sample_interval() -> f64 {
    DEFAULT_SAMPLE_INTERVAL
}
fn default_retention_window() -> f64 {
    DEFAULT_RETENTION_WINDOW
}
fn default_rewind_speed() -> f64 {
    DEFAULT_REWIND_SPEED
}
fn default_damping_factor() -> f32 {
    DEFAULT_DAMPING_FACTOR
}
fn default_paused_time_scale() -> f32 {
    DEFAULT_PAUSED_TIME_SCALE
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            sample_interval: default_sample_interval(),
            retention_window: default_retention_window(),
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            rewind_speed: default_rewind_speed(),
            damping_factor: default_damping_factor(),
            pause_time_scale: false,
            paused_time_scale: default_paused_time_scale(),
        }
    }
}

impl RecorderConfig {
    /// Create a recorder config with explicit timings
    pub fn new(sample_interval: f64, retention_window: f64) -> Self {
        Self {
            sample_interval,
            retention_window,
        }
    }
}

impl RewindConfig {
    /// Check that every setting is usable.
    ///
    /// Rejects non-positive (or non-finite) timings, a retention window shorter
    /// than one sample interval, a non-positive rewind speed, and a damping
    /// factor outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let recorder = &self.recorder;
        if !(recorder.sample_interval.is_finite() && recorder.sample_interval > 0.0) {
            return Err(ConfigError::invalid(
                "recorder.sample_interval",
                "must be a positive number of seconds",
            ));
        }
        if !(recorder.retention_window.is_finite() && recorder.retention_window > 0.0) {
            return Err(ConfigError::invalid(
                "recorder.retention_window",
                "must be a positive number of seconds",
            ));
        }
        if recorder.retention_window < recorder.sample_interval {
            return Err(ConfigError::invalid(
                "recorder.retention_window",
                "must be at least one sample interval",
            ));
        }

        let playback = &self.playback;
        if !(playback.rewind_speed.is_finite() && playback.rewind_speed > 0.0) {
            return Err(ConfigError::invalid(
                "playback.rewind_speed",
                "must be a positive multiplier",
            ));
        }
        if !(0.0..=1.0).contains(&playback.damping_factor) {
            return Err(ConfigError::invalid(
                "playback.damping_factor",
                "must be within 0.0-1.0",
            ));
        }
        if !(playback.paused_time_scale.is_finite() && playback.paused_time_scale >= 0.0) {
            return Err(ConfigError::invalid(
                "playback.paused_time_scale",
                "must be zero or positive",
            ));
        }
        Ok(())
    }
}

/// Error loading, saving, or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::Invalid { field, reason }
    }
}

/// Returns the platform-specific configuration directory.
///
/// On Windows: `%APPDATA%\Rewind\config`
/// On macOS: `~/Library/Application Support/io.rewind.Rewind`
/// On Linux: `~/.config/Rewind`
///
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io.rewind", "", "Rewind")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Loads the configuration from disk.
///
/// Reads `rewind.toml` from the platform's configuration directory.
/// Returns default values if the file doesn't exist, cannot be parsed, or
/// fails validation.
pub fn load() -> RewindConfig {
    config_dir()
        .and_then(|dir| load_from(dir.join(CONFIG_FILE_NAME)).ok())
        .unwrap_or_default()
}

/// Loads and validates the configuration at `path`.
pub fn load_from(path: impl AsRef<Path>) -> Result<RewindConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: RewindConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Saves the configuration to the platform's configuration directory.
///
/// Creates the directory if it doesn't exist. Does nothing when no config
/// directory can be determined.
pub fn save(config: &RewindConfig) -> Result<(), ConfigError> {
    if let Some(dir) = config_dir() {
        save_to(dir.join(CONFIG_FILE_NAME), config)?;
    }
    Ok(())
}

/// Writes the configuration to `path`, creating parent directories.
pub fn save_to(path: impl AsRef<Path>, config: &RewindConfig) -> Result<(), ConfigError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
