//! Backward walk over a history during a rewind

use crate::history::History;
use crate::sample::{HistoryEntry, PoseSample};

/// Playback state owned by the controller while rewinding.
///
/// Holds the history for the duration of the rewind. The cursor only moves
/// towards older entries.
#[derive(Debug)]
pub(crate) struct Playback {
    history: History,
    cursor: usize,
    /// Timeline time playback measures back from
    origin: f64,
    /// Live clock reading when the rewind started
    live_start: f64,
    /// Live seconds spent in playback
    live_elapsed: f64,
    /// Virtual seconds rewound so far (already scaled by rewind speed)
    virtual_elapsed: f64,
}

impl Playback {
    /// Begin playback at the newest entry. Returns `None` for an empty history.
    ///
    /// `timeline_now` is the present on the history's clock, `live_now` the
    /// same instant on the host clock.
    pub(crate) fn start(history: History, timeline_now: f64, live_now: f64) -> Option<Self> {
        let newest = history.back()?.timestamp();
        Some(Self {
            cursor: history.len() - 1,
            origin: timeline_now.max(newest),
            live_start: live_now,
            live_elapsed: 0.0,
            virtual_elapsed: 0.0,
            history,
        })
    }

    /// Spend `dt` live seconds rewinding at `speed` and return the pose to
    /// display.
    pub(crate) fn advance(&mut self, dt: f64, speed: f64) -> PoseSample {
        if dt.is_finite() && dt > 0.0 {
            self.live_elapsed += dt;
            let virtual_dt = dt * speed;
            if virtual_dt.is_finite() && virtual_dt > 0.0 {
                self.virtual_elapsed += virtual_dt;
            }
        }

        let target = self.target_time();
        while self.cursor > 0 && self.entry(self.cursor).timestamp() > target {
            self.cursor -= 1;
        }
        self.current_pose()
    }

    /// Pose at the current target time, interpolated between the cursor entry
    /// and the next newer one.
    pub(crate) fn current_pose(&self) -> PoseSample {
        let target = self.target_time();
        let current = self.entry(self.cursor);
        if target <= current.timestamp() {
            return current.pose;
        }
        match self.history.get(self.cursor + 1) {
            Some(next) => {
                let span = next.timestamp() - current.timestamp();
                let t = (target - current.timestamp()) / span;
                PoseSample::lerp(&current.pose, &next.pose, t)
            }
            None => current.pose,
        }
    }

    /// End playback, dropping every entry newer than the cursor.
    ///
    /// Returns the truncated history, the entry at the cursor, and the number
    /// of entries discarded.
    pub(crate) fn finish(mut self) -> (History, HistoryEntry, usize) {
        let restored = *self.entry(self.cursor);
        let discarded = self.history.truncate_after(self.cursor);
        (self.history, restored, discarded)
    }

    pub(crate) fn history(&self) -> &History {
        &self.history
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    /// Seconds of recorded time rewound, capped at the oldest entry
    pub(crate) fn rewound_seconds(&self) -> f64 {
        let available = self
            .history
            .front()
            .map_or(0.0, |front| self.origin - front.timestamp());
        self.virtual_elapsed.min(available)
    }

    /// Host clock reading at the end of the last playback step
    pub(crate) fn live_now(&self) -> f64 {
        self.live_start + self.live_elapsed
    }

    fn target_time(&self) -> f64 {
        self.origin - self.virtual_elapsed
    }

    fn entry(&self, index: usize) -> &HistoryEntry {
        // The cursor never leaves [0, len) of a non-empty history
        &self.history[index]
    }
}
