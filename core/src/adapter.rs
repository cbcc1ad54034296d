//! Adapter boundary between the rewind component and its host
//!
//! The component never touches a physics engine, renderer, or audio mixer
//! directly. Hosts implement these traits for whatever entity representation
//! they use.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use crate::sample::{MotionSample, PoseSample};

/// An entity whose spatial state can be sampled and restored.
pub trait RewindTarget {
    /// Current pose, stamped with `now`
    fn get_pose(&self, now: f64) -> PoseSample;

    /// Current velocities, stamped with `now`.
    ///
    /// Returns `None` for entities without a dynamics body.
    fn get_motion(&self, now: f64) -> Option<MotionSample>;

    /// Overwrite the entity's transform
    fn apply_pose(&mut self, pose: &PoseSample);

    /// Restore velocities, scaled by `damping_factor`
    fn apply_motion(&mut self, motion: &MotionSample, damping_factor: f32);

    /// Suspend or resume dynamics integration and collision response
    fn set_simulation_enabled(&mut self, enabled: bool);
}

/// Notification points around a rewind cycle.
///
/// Used for visual tint, particle bursts, and audio cues. Each successful
/// rewind produces exactly one `on_rewind_start` followed by exactly one
/// `on_rewind_end`. Use `()` when no notifications are needed.
pub trait RewindHooks {
    fn on_rewind_start(&mut self) {}
    fn on_rewind_end(&mut self) {}
}

/// No-op hooks
impl RewindHooks for () {}

/// Monotonic time source, in seconds.
pub trait Clock {
    fn now(&self) -> f64;
}

/// Wall clock backed by [`Instant`], measured from construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Explicitly advanced clock for headless runs and tests.
///
/// Clones share the same time, so a host can keep one handle and give
/// another to a runtime.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    /// Move time forward by `seconds` (negative values are ignored)
    pub fn advance(&self, seconds: f64) {
        if seconds > 0.0 {
            self.now.set(self.now.get() + seconds);
        }
    }

    /// Jump to an absolute time, which may move backwards
    pub fn set(&self, now: f64) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}
