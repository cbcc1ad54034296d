//! Rate-limited snapshot recorder
//!
//! Samples an entity's pose and motion at a fixed minimum interval and keeps
//! a history bounded by age rather than by count.

use rewind_shared::{RecorderConfig, SAMPLE_EPSILON};

use crate::history::History;
use crate::sample::{HistoryEntry, MotionSample, PoseSample};

/// Upper bound on entries reserved up front; longer windows grow on demand
const MAX_PREALLOCATED: usize = 1024;

/// Maintains the bounded history for one live entity.
///
/// The recorder owns the history while the entity is recording. A rewind
/// takes it with [`take_history`](Self::take_history) and hands the truncated
/// result back with [`restore_history`](Self::restore_history).
#[derive(Debug, Clone)]
pub struct SnapshotRecorder {
    config: RecorderConfig,
    history: History,
    /// Time of the last accepted sample; `None` samples on the next tick
    last_sample_time: Option<f64>,
    /// Samples rejected because the clock stalled or ran backwards
    dropped_samples: u64,
}

impl SnapshotRecorder {
    /// Create a recorder with an empty history
    pub fn new(config: RecorderConfig) -> Self {
        // Float to usize casts saturate, and NaN becomes 0
        let expected = ((config.retention_window / config.sample_interval).ceil() as usize)
            .saturating_add(1)
            .min(MAX_PREALLOCATED);
        Self {
            config,
            history: History::with_capacity(expected),
            last_sample_time: None,
            dropped_samples: 0,
        }
    }

    /// Append a sample if at least one interval has elapsed since the last one.
    ///
    /// Returns `true` if the sample was recorded. A pose stamped at the same
    /// instant as the newest entry is already covered by it: nothing is
    /// appended, but the sample clock restarts from there. Other samples with
    /// a timestamp that does not move forward are dropped.
    pub fn tick(&mut self, now: f64, pose: PoseSample, motion: Option<MotionSample>) -> bool {
        if now.is_nan() {
            self.drop_sample(now);
            return false;
        }

        if let Some(last) = self.last_sample_time {
            if now < last {
                self.drop_sample(now);
                return false;
            }
            if now - last + SAMPLE_EPSILON < self.config.sample_interval {
                return false;
            }
        }

        if let Some(newest) = self.history.back()
            && (pose.timestamp - newest.timestamp()).abs() <= SAMPLE_EPSILON
        {
            self.last_sample_time = Some(now);
            return false;
        }

        if !self.history.push(HistoryEntry::new(pose, motion)) {
            self.drop_sample(pose.timestamp);
            return false;
        }
        self.last_sample_time = Some(now);
        true
    }

    /// Remove entries older than the retention window relative to `now`.
    ///
    /// Returns the number of entries removed.
    pub fn prune(&mut self, now: f64) -> usize {
        self.history
            .prune_older_than(now - self.config.retention_window)
    }

    /// Sample (rate limited) and then prune. Called once per recording tick.
    pub fn record(&mut self, now: f64, pose: PoseSample, motion: Option<MotionSample>) -> bool {
        let recorded = self.tick(now, pose, motion);
        self.prune(now);
        recorded
    }

    /// Empty the history and sample on the next tick
    pub fn clear(&mut self) {
        self.history.clear();
        self.last_sample_time = None;
    }

    /// Forget the last sample time so the next tick samples immediately
    pub fn reset_sample_clock(&mut self) {
        self.last_sample_time = None;
    }

    /// Hand the history over to a rewind, leaving the recorder empty
    pub fn take_history(&mut self) -> History {
        std::mem::take(&mut self.history)
    }

    /// Take back ownership of a (possibly truncated) history
    pub fn restore_history(&mut self, history: History) {
        self.history = history;
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    pub fn last_sample_time(&self) -> Option<f64> {
        self.last_sample_time
    }

    /// Number of samples dropped because of clock anomalies
    pub fn dropped_samples(&self) -> u64 {
        self.dropped_samples
    }

    fn drop_sample(&mut self, timestamp: f64) {
        self.dropped_samples += 1;
        log::trace!(
            "Dropping sample at {} (last sample at {:?})",
            timestamp,
            self.last_sample_time
        );
    }
}
