//! Rewind Core - bounded pose history with rewind playback
//!
//! This crate records a short, bounded history of one entity's pose and
//! motion, and lets the entity be scrubbed backwards through it on demand.
//!
//! # Architecture
//!
//! - [`SnapshotRecorder`] - Rate limited sampling into a pruned [`History`]
//! - [`RewindController`] - Recording/rewinding state machine driving a target
//! - [`RewindTarget`] - Adapter over the host's transform and dynamics body
//! - [`RewindRuntime`] - Fixed timestep loop running the controller per tick
//! - [`TimeScale`] - Shared world time scale paused while rewinding

pub mod adapter;
pub mod history;
#[cfg(test)]
mod integration;
pub mod recorder;
pub mod rewind;
pub mod runtime;
pub mod sample;
#[cfg(test)]
pub mod test_utils;
pub mod time_scale;

// Re-export core traits and types
pub use adapter::{Clock, ManualClock, RewindHooks, RewindTarget, SystemClock};
pub use history::History;
pub use recorder::SnapshotRecorder;
pub use rewind::{RewindController, RewindError, RewindMode, RewindStats, StopReport};
pub use runtime::{RewindRuntime, RuntimeConfig, Simulation};
pub use sample::{HistoryEntry, MotionSample, PoseSample};
pub use time_scale::{TimeScale, TimeScaleGuard};

// Re-export config types for convenience
pub use rewind_shared::{PlaybackConfig, RecorderConfig, RewindConfig};
