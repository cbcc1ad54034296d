//! Fixed-timestep driver configuration

use std::time::Duration;

/// Tick rate used when the host does not pick one
pub const DEFAULT_TICK_RATE: u32 = 60;

/// Frame deltas above this are clamped so a stall replays as one short burst
pub const DEFAULT_MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

/// Share of a tick the controller and target may spend before a warning
const TICK_BUDGET_DIVISOR: u32 = 4;

/// How often the rewind runtime ticks and how it treats slow frames
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Longest frame delta accepted before clamping
    pub max_delta: Duration,
    /// Ticks slower than this are logged as warnings
    pub cpu_budget: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::with_tick_rate(DEFAULT_TICK_RATE)
    }
}

impl RuntimeConfig {
    /// Config ticking at `tick_rate`, with a budget of a quarter tick
    pub fn with_tick_rate(tick_rate: u32) -> Self {
        let mut config = Self {
            tick_rate,
            max_delta: DEFAULT_MAX_FRAME_DELTA,
            cpu_budget: Duration::ZERO,
        };
        config.cpu_budget = config.tick_duration() / TICK_BUDGET_DIVISOR;
        config
    }

    /// Duration of one tick. A tick rate of zero is treated as 1 Hz.
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate.max(1) as f64)
    }
}
