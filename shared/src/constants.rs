//! Centralized constants for the rewind recorder.
//!
//! Single source of truth for the defaults used by both the configuration
//! layer and the core component.

/// Default minimum time between two recorded samples, in seconds.
pub const DEFAULT_SAMPLE_INTERVAL: f64 = 0.1;

/// Default retention window, in seconds.
///
/// Samples older than this (relative to the newest tick) are pruned.
pub const DEFAULT_RETENTION_WINDOW: f64 = 5.0;

/// Default playback speed multiplier (1.0 = rewind at real time).
pub const DEFAULT_REWIND_SPEED: f64 = 1.0;

/// Default fraction of the stored velocity reapplied when live simulation resumes.
pub const DEFAULT_DAMPING_FACTOR: f32 = 0.5;

/// Time scale applied to the shared clock while a rewind holds it paused.
pub const DEFAULT_PAUSED_TIME_SCALE: f32 = 0.0;

/// Largest multiplier the shared time scale accepts.
pub const MAX_TIME_SCALE: f32 = 16.0;

/// Tolerance used when comparing sample timestamps against the interval.
///
/// Tick deltas like `0.05` are not exactly representable, so `0.15 - 0.05`
/// lands just below `0.1`. Without the tolerance every other sample would be
/// dropped at high tick rates.
pub const SAMPLE_EPSILON: f64 = 1e-9;

/// File name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "rewind.toml";
