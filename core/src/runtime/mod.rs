//! Fixed timestep driver for a rewindable entity
//!
//! Converts variable frame deltas into fixed simulation ticks and runs the
//! rewind controller once per tick.

use std::time::Duration;

use anyhow::{Context, Result};
use rewind_shared::RewindConfig;

use crate::adapter::{Clock, RewindHooks, RewindTarget};
use crate::rewind::{RewindController, RewindStats};
use crate::time_scale::TimeScale;

mod config;
mod game_loop;


pub use config::{DEFAULT_MAX_FRAME_DELTA, DEFAULT_TICK_RATE, RuntimeConfig};

use game_loop::LoopState;

/// A rewind target with its own live simulation step.
///
/// The runtime only calls `advance` on ticks where the controller is
/// recording; while rewinding the pose comes from the history instead.
pub trait Simulation: RewindTarget {
    fn advance(&mut self, dt: f64);
}

/// Host loop owning one entity, its rewind controller, and a frame clock.
///
/// Generic over the entity, the rewind hooks, and the clock used to measure
/// frame deltas.
pub struct RewindRuntime<T: Simulation, H: RewindHooks, C: Clock> {
    config: RuntimeConfig,
    target: T,
    controller: RewindController<H>,
    clock: C,
    time_scale: TimeScale,
    state: LoopState,
    last_frame: Option<f64>,
    tick_duration: Duration,
}

impl<T: Simulation, H: RewindHooks, C: Clock> RewindRuntime<T, H, C> {
    /// Create a runtime for `target` with a validated rewind config
    pub fn new(
        target: T,
        rewind_config: RewindConfig,
        hooks: H,
        clock: C,
        config: RuntimeConfig,
    ) -> Result<Self> {
        rewind_config
            .validate()
            .context("invalid rewind configuration")?;

        let time_scale = TimeScale::default();
        let mut controller = RewindController::with_hooks(rewind_config, hooks);
        controller.attach_time_scale(time_scale.clone());

        let tick_duration = config.tick_duration();
        tracing::debug!(
            "Rewind runtime at {} Hz ({:?} per tick)",
            config.tick_rate,
            tick_duration
        );

        Ok(Self {
            config,
            target,
            controller,
            clock,
            time_scale,
            state: LoopState::default(),
            last_frame: None,
            tick_duration,
        })
    }

    /// Set the tick rate
    pub fn set_tick_rate(&mut self, tick_rate: u32) {
        self.config.tick_rate = tick_rate;
        self.tick_duration = self.config.tick_duration();
    }

    /// Run a frame, measuring the delta since the previous frame on the clock.
    ///
    /// The first frame runs exactly one tick's worth of time. Returns the
    /// number of ticks executed and the interpolation factor for rendering.
    pub fn frame(&mut self, rewind_held: bool) -> (u32, f32) {
        let now = self.clock.now();
        let delta = match self.last_frame {
            Some(last) => {
                let elapsed = (now - last).max(0.0).min(self.config.max_delta.as_secs_f64());
                Duration::from_secs_f64(elapsed)
            }
            None => self.tick_duration,
        };
        self.last_frame = Some(now);
        self.frame_with_delta(delta, rewind_held)
    }

    /// Run a frame with an explicit delta (headless and test use)
    pub fn frame_with_delta(&mut self, delta: Duration, rewind_held: bool) -> (u32, f32) {
        game_loop::execute_frame(
            &self.config,
            self.tick_duration,
            delta,
            &mut self.state,
            &mut self.controller,
            &mut self.target,
            &self.time_scale,
            rewind_held,
        )
    }

    /// Shared time scale applied to live simulation
    pub fn time_scale(&self) -> &TimeScale {
        &self.time_scale
    }

    /// Get the tick duration (time per tick, inverse of tick rate)
    pub fn tick_duration(&self) -> Duration {
        self.tick_duration
    }

    pub fn tick_rate(&self) -> u32 {
        self.config.tick_rate
    }

    /// Simulation time of the next tick, in seconds
    pub fn sim_time(&self) -> f64 {
        self.state.sim_time
    }

    /// Total ticks executed
    pub fn tick_count(&self) -> u64 {
        self.state.tick_count
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn controller(&self) -> &RewindController<H> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut RewindController<H> {
        &mut self.controller
    }

    /// Get mutable references to the controller and target together.
    ///
    /// Lets a host issue transitions directly without borrowing issues.
    pub fn controller_and_target_mut(&mut self) -> (&mut RewindController<H>, &mut T) {
        (&mut self.controller, &mut self.target)
    }

    pub fn stats(&self) -> RewindStats {
        self.controller.stats()
    }
}
