//! Two-mode rewind controller

use rewind_shared::{PlaybackConfig, RewindConfig};

use crate::adapter::{RewindHooks, RewindTarget};
use crate::history::History;
use crate::recorder::SnapshotRecorder;
use crate::sample::HistoryEntry;
use crate::time_scale::{TimeScale, TimeScaleGuard};

use super::error::RewindError;
use super::playback::Playback;
use super::stats::RewindStats;

/// Current mode of a [`RewindController`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RewindMode {
    /// Live simulation, history being sampled
    #[default]
    Recording,
    /// History being played back in reverse
    Rewinding,
}

enum State {
    Recording,
    Rewinding(Playback),
}

/// Outcome of a successful [`RewindController::stop_rewind`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopReport {
    /// Index of the entry the timeline was truncated to
    pub cursor: usize,
    /// The entry restored onto the target
    pub restored: HistoryEntry,
    /// Number of newer entries discarded
    pub discarded: usize,
    /// Seconds of recorded time rewound
    pub rewound_seconds: f64,
}

/// Records one entity's recent past and rewinds it on demand.
///
/// Generic over the notification hooks so hosts can attach visual and audio
/// cues without the controller depending on them. Use `()` for no hooks.
pub struct RewindController<H: RewindHooks = ()> {
    playback_config: PlaybackConfig,
    recorder: SnapshotRecorder,
    state: State,
    hooks: H,
    /// Shared time scale paused during a rewind, if the host attached one
    time_scale: Option<TimeScale>,
    /// Held only while rewinding with `pause_time_scale` enabled
    time_scale_guard: Option<TimeScaleGuard>,
    /// Host clock minus history timeline; grows by each rewind's hold time
    /// plus the time it rewound
    timeline_offset: f64,
    completed_rewinds: u64,
}

impl RewindController<()> {
    /// Create a controller without hooks
    pub fn new(config: RewindConfig) -> Self {
        Self::with_hooks(config, ())
    }
}

impl<H: RewindHooks> RewindController<H> {
    /// Create a controller that notifies `hooks` around each rewind
    pub fn with_hooks(config: RewindConfig, hooks: H) -> Self {
        Self {
            playback_config: config.playback,
            recorder: SnapshotRecorder::new(config.recorder),
            state: State::Recording,
            hooks,
            time_scale: None,
            time_scale_guard: None,
            timeline_offset: 0.0,
            completed_rewinds: 0,
        }
    }

    /// Attach the shared time scale to pause while rewinding.
    ///
    /// Only used when `PlaybackConfig::pause_time_scale` is enabled. Takes
    /// effect from the next `start_rewind`.
    pub fn attach_time_scale(&mut self, time_scale: TimeScale) {
        self.time_scale = Some(time_scale);
    }

    /// Run one simulation tick.
    ///
    /// `rewind_held` is the collaborator's rewind request (e.g. a held
    /// button). A press starts a rewind, a release stops it. Afterwards
    /// exactly one of the record path or the rewind path runs.
    ///
    /// `now` is the host clock and `dt` the time since the previous tick.
    /// History is stamped on its own timeline (see
    /// [`timeline_time`](Self::timeline_time)), which does not move while
    /// rewinding.
    pub fn update<T: RewindTarget>(
        &mut self,
        target: &mut T,
        now: f64,
        dt: f64,
        rewind_held: bool,
    ) -> RewindMode {
        match (self.is_rewinding(), rewind_held) {
            (false, true) => {
                if let Err(e) = self.start_rewind(target, now) {
                    log::trace!("Rewind request ignored: {}", e);
                }
            }
            (true, false) => {
                if let Err(e) = self.stop_rewind(target) {
                    log::trace!("Rewind release ignored: {}", e);
                }
            }
            _ => {}
        }

        let speed = self.playback_config.rewind_speed;
        match &mut self.state {
            State::Recording => {
                let t = now - self.timeline_offset;
                self.recorder
                    .record(t, target.get_pose(t), target.get_motion(t));
                RewindMode::Recording
            }
            State::Rewinding(playback) => {
                let pose = playback.advance(dt, speed);
                target.apply_pose(&pose);
                RewindMode::Rewinding
            }
        }
    }

    /// Sample the target into the history (rate limited, then pruned).
    ///
    /// Returns whether a sample was appended. Rejected while rewinding.
    pub fn record<T: RewindTarget>(&mut self, target: &T, now: f64) -> Result<bool, RewindError> {
        if self.is_rewinding() {
            log::warn!("record() called while rewinding; ignoring");
            return Err(RewindError::Rewinding);
        }
        let t = self.timeline_time(now);
        Ok(self
            .recorder
            .record(t, target.get_pose(t), target.get_motion(t)))
    }

    /// Switch to `Rewinding`.
    ///
    /// Suspends the target's simulation, places the cursor on the newest
    /// entry, pauses the shared time scale if configured, and fires
    /// `on_rewind_start`. Fails without side effects when already rewinding
    /// or when nothing has been recorded.
    pub fn start_rewind<T: RewindTarget>(
        &mut self,
        target: &mut T,
        now: f64,
    ) -> Result<(), RewindError> {
        if self.is_rewinding() {
            log::warn!("start_rewind() called while already rewinding");
            return Err(RewindError::AlreadyRewinding);
        }
        if self.recorder.history().is_empty() {
            log::debug!("Cannot rewind: history is empty");
            return Err(RewindError::EmptyHistory);
        }

        let history = self.recorder.take_history();
        let Some(playback) = Playback::start(history, self.timeline_time(now), now) else {
            return Err(RewindError::EmptyHistory);
        };
        log::debug!(
            "Rewind started at {:.3}s with {} entries ({:.3}s span)",
            now,
            playback.history().len(),
            playback.history().span()
        );

        target.set_simulation_enabled(false);
        if self.playback_config.pause_time_scale
            && let Some(time_scale) = &self.time_scale
        {
            self.time_scale_guard = Some(time_scale.pause(self.playback_config.paused_time_scale));
        }
        self.state = State::Rewinding(playback);
        self.hooks.on_rewind_start();
        Ok(())
    }

    /// Advance playback by `dt` seconds of simulation time.
    ///
    /// Moves `dt * rewind_speed` seconds back through the history and applies
    /// the interpolated pose. `dt` is also counted as host time spent
    /// rewinding, so a caller driving transitions by hand should advance the
    /// `now` it passes afterwards by the same amount. Rejected while recording.
    pub fn step_rewind<T: RewindTarget>(
        &mut self,
        target: &mut T,
        dt: f64,
    ) -> Result<(), RewindError> {
        let State::Rewinding(playback) = &mut self.state else {
            log::warn!("step_rewind() called while recording; ignoring");
            return Err(RewindError::NotRewinding);
        };
        let pose = playback.advance(dt, self.playback_config.rewind_speed);
        target.apply_pose(&pose);
        Ok(())
    }

    /// Switch back to `Recording`, making the rewound point the present.
    ///
    /// Drops every entry newer than the cursor, restores the cursor's pose
    /// and a damped fraction of its velocity, re-enables simulation, releases
    /// the time scale, fires `on_rewind_end`, and makes the recorder sample on
    /// its next tick. The timeline resumes at the restored entry, which stands
    /// in for the first sample after the rewind.
    pub fn stop_rewind<T: RewindTarget>(
        &mut self,
        target: &mut T,
    ) -> Result<StopReport, RewindError> {
        let playback = match std::mem::replace(&mut self.state, State::Recording) {
            State::Rewinding(playback) => playback,
            State::Recording => return Err(RewindError::NotRewinding),
        };

        let cursor = playback.cursor();
        let rewound_seconds = playback.rewound_seconds();
        let live_now = playback.live_now();
        let (history, restored, discarded) = playback.finish();

        // The timeline resumes at the restored entry
        self.timeline_offset = live_now - restored.timestamp();

        target.apply_pose(&restored.pose);
        if let Some(motion) = &restored.motion {
            target.apply_motion(motion, self.playback_config.damping_factor);
        }
        target.set_simulation_enabled(true);
        self.time_scale_guard = None;

        self.recorder.restore_history(history);
        self.recorder.reset_sample_clock();
        self.completed_rewinds += 1;

        log::debug!(
            "Rewind stopped at entry {} ({:.3}s back), discarded {} newer entries",
            cursor,
            rewound_seconds,
            discarded
        );
        self.hooks.on_rewind_end();

        Ok(StopReport {
            cursor,
            restored,
            discarded,
            rewound_seconds,
        })
    }

    /// Forget all history, e.g. when the entity respawns.
    ///
    /// An active rewind is cancelled without restoring any motion: the target
    /// gets its simulation back and `on_rewind_end` still fires.
    pub fn respawn<T: RewindTarget>(&mut self, target: &mut T) {
        if let State::Rewinding(_) = std::mem::replace(&mut self.state, State::Recording) {
            log::debug!("Respawn during rewind; cancelling playback");
            target.set_simulation_enabled(true);
            self.time_scale_guard = None;
            self.hooks.on_rewind_end();
        }
        self.recorder.clear();
    }

    /// Map a host clock reading onto the history's timeline.
    ///
    /// The timeline stands still while rewinding and jumps back to the
    /// restored entry when a rewind stops, so history never ages during a
    /// hold.
    pub fn timeline_time(&self, now: f64) -> f64 {
        now - self.timeline_offset
    }

    pub fn timeline_offset(&self) -> f64 {
        self.timeline_offset
    }

    pub fn mode(&self) -> RewindMode {
        match self.state {
            State::Recording => RewindMode::Recording,
            State::Rewinding(_) => RewindMode::Rewinding,
        }
    }

    pub fn is_rewinding(&self) -> bool {
        matches!(self.state, State::Rewinding(_))
    }

    /// The history, from whichever side currently owns it
    pub fn history(&self) -> &History {
        match &self.state {
            State::Recording => self.recorder.history(),
            State::Rewinding(playback) => playback.history(),
        }
    }

    /// Playback cursor, or `None` while recording
    pub fn cursor(&self) -> Option<usize> {
        match &self.state {
            State::Recording => None,
            State::Rewinding(playback) => Some(playback.cursor()),
        }
    }

    /// Seconds rewound in the current cycle (0.0 while recording)
    pub fn rewind_progress(&self) -> f64 {
        match &self.state {
            State::Recording => 0.0,
            State::Rewinding(playback) => playback.rewound_seconds(),
        }
    }

    /// Whether a rewind could start right now
    pub fn can_rewind(&self) -> bool {
        !self.is_rewinding() && !self.recorder.history().is_empty()
    }

    pub fn recorder(&self) -> &SnapshotRecorder {
        &self.recorder
    }

    pub fn playback_config(&self) -> &PlaybackConfig {
        &self.playback_config
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Debug snapshot for overlays and logging
    pub fn stats(&self) -> RewindStats {
        let history = self.history();
        RewindStats {
            mode: self.mode(),
            history_len: history.len(),
            history_span: history.span(),
            cursor: self.cursor(),
            rewound_seconds: self.rewind_progress(),
            completed_rewinds: self.completed_rewinds,
            dropped_samples: self.recorder.dropped_samples(),
        }
    }
}

impl<H: RewindHooks> Drop for RewindController<H> {
    fn drop(&mut self) {
        if self.is_rewinding() {
            log::debug!("Rewind controller dropped mid-rewind; releasing time scale");
        }
        // Restores the shared time scale even if the entity dies mid-rewind
        self.time_scale_guard.take();
    }
}
