//! Rewind state machine
//!
//! Records an entity's recent past and plays it back in reverse on demand.
//!
//! # Architecture
//!
//! - [`RewindController`]: two-mode state machine (`Recording`, `Rewinding`)
//!   evaluated once per simulation tick via [`RewindController::update`]
//! - `Playback`: cursor walk over the history while rewinding
//! - [`SnapshotRecorder`](crate::recorder::SnapshotRecorder): rate-limited,
//!   age-pruned sampling while recording
//!
//! # Tick Flow
//!
//! 1. The hold-to-rewind input may trigger one transition
//!    (`start_rewind` on press, `stop_rewind` on release)
//! 2. The mode is checked once
//! 3. `Recording` samples the target through the recorder, `Rewinding` walks
//!    the history backwards and applies the interpolated pose
//!
//! # History Ownership
//!
//! The recorder owns the history while recording. `start_rewind` moves it
//! into the playback state and `stop_rewind` moves the truncated remainder
//! back, so the two paths can never mutate it at the same time.

mod controller;
mod error;
mod playback;
mod stats;


pub use controller::{RewindController, RewindMode, StopReport};
pub use error::RewindError;
pub use stats::RewindStats;
