//! Debug snapshot of a rewind controller

use super::RewindMode;

/// Point-in-time view of a controller for overlays and logging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewindStats {
    pub mode: RewindMode,
    /// Entries currently held, by whichever owner has the history
    pub history_len: usize,
    /// Seconds between the oldest and newest entry
    pub history_span: f64,
    /// Playback cursor (only while rewinding)
    pub cursor: Option<usize>,
    /// Seconds rewound in the current cycle (0.0 while recording)
    pub rewound_seconds: f64,
    /// Rewind cycles that ended through `stop_rewind`
    pub completed_rewinds: u64,
    /// Samples the recorder rejected because of clock anomalies
    pub dropped_samples: u64,
}

impl RewindStats {
    pub fn is_rewinding(&self) -> bool {
        self.mode == RewindMode::Rewinding
    }
}
