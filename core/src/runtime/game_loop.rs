//! Fixed timestep tick execution

use std::time::{Duration, Instant};

use crate::adapter::RewindHooks;
use crate::rewind::{RewindController, RewindMode};
use crate::time_scale::TimeScale;

use super::{RuntimeConfig, Simulation};

/// Mutable loop state carried between frames
#[derive(Debug, Default)]
pub(super) struct LoopState {
    /// Unconsumed frame time
    pub accumulator: Duration,
    /// Simulation time handed to the controller as `now`
    pub sim_time: f64,
    /// Total ticks executed
    pub tick_count: u64,
}

/// Execute one frame's worth of ticks.
///
/// Accumulates `delta` (clamped to `max_delta`, then multiplied by the
/// shared time scale unless a rewind is playing back) and runs whole ticks.
/// Each tick runs the controller exactly once, then advances the target's
/// live simulation if the controller is recording.
///
/// Returns the number of ticks executed and the interpolation factor for
/// rendering between the last two states.
pub(super) fn execute_frame<T: Simulation, H: RewindHooks>(
    config: &RuntimeConfig,
    tick_duration: Duration,
    delta: Duration,
    state: &mut LoopState,
    controller: &mut RewindController<H>,
    target: &mut T,
    time_scale: &TimeScale,
    rewind_held: bool,
) -> (u32, f32) {
    let delta = delta.min(config.max_delta);

    // Rewind playback runs on unscaled time so a paused world can still rewind
    let scale = if controller.is_rewinding() {
        1.0
    } else {
        time_scale.get()
    };
    state.accumulator += delta.mul_f32(scale.max(0.0));

    let dt = tick_duration.as_secs_f64();
    let mut ticks = 0u32;

    while state.accumulator >= tick_duration {
        let tick_start = Instant::now();

        let mode = controller.update(target, state.sim_time, dt, rewind_held);
        if mode == RewindMode::Recording {
            target.advance(dt);
        }

        state.accumulator -= tick_duration;
        state.sim_time += dt;
        state.tick_count += 1;
        ticks += 1;

        // Check CPU budget
        let tick_time = tick_start.elapsed();
        if tick_time > config.cpu_budget {
            tracing::warn!(
                "Tick took {:?}, exceeds budget of {:?}",
                tick_time,
                config.cpu_budget
            );
        }
    }

    // Calculate interpolation factor for rendering
    let alpha = state.accumulator.as_secs_f32() / tick_duration.as_secs_f32();

    (ticks, alpha)
}
