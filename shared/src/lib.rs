//! Shared types for the rewind recorder.
//!
//! Holds the serializable configuration and platform constants. This crate
//! has no math dependency so tools can read and write configuration without
//! pulling in the simulation core.

pub mod config;
pub mod constants;

pub use config::{ConfigError, PlaybackConfig, RecorderConfig, RewindConfig};
pub use constants::*;
