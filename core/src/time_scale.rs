//! Shared simulation time scale with scoped pausing
//!
//! A host that slows or freezes the whole world while one entity rewinds
//! does it through a [`TimeScaleGuard`]: the previous scale is restored when
//! the guard drops, on every exit path.

use std::cell::Cell;
use std::rc::Rc;

use rewind_shared::MAX_TIME_SCALE;

/// Handle to a time scale multiplier shared by the host and its components.
///
/// Clones refer to the same value. 1.0 is normal speed, 0.0 is frozen.
/// Values are kept within `[0, MAX_TIME_SCALE]` so frame deltas scaled by
/// them stay finite.
#[derive(Debug, Clone)]
pub struct TimeScale {
    scale: Rc<Cell<f32>>,
}

impl TimeScale {
    /// Create a time scale; NaN falls back to normal speed
    pub fn new(scale: f32) -> Self {
        let scale = if scale.is_nan() { 1.0 } else { clamp_scale(scale) };
        Self {
            scale: Rc::new(Cell::new(scale)),
        }
    }

    pub fn get(&self) -> f32 {
        self.scale.get()
    }

    /// Set the multiplier, clamped to `[0, MAX_TIME_SCALE]`. NaN is ignored.
    pub fn set(&self, scale: f32) {
        if scale.is_nan() {
            log::warn!("Ignoring NaN time scale");
            return;
        }
        self.scale.set(clamp_scale(scale));
    }

    /// Override the scale until the returned guard drops
    #[must_use = "the previous time scale is restored as soon as the guard drops"]
    pub fn pause(&self, scale: f32) -> TimeScaleGuard {
        let previous = self.get();
        self.set(scale);
        TimeScaleGuard {
            handle: self.clone(),
            previous,
        }
    }

    /// Whether two handles refer to the same shared value
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.scale, &other.scale)
    }
}

fn clamp_scale(scale: f32) -> f32 {
    scale.clamp(0.0, MAX_TIME_SCALE)
}

impl Default for TimeScale {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Restores the time scale it replaced when dropped.
#[derive(Debug)]
pub struct TimeScaleGuard {
    handle: TimeScale,
    previous: f32,
}

impl TimeScaleGuard {
    /// The scale that will be restored
    pub fn previous(&self) -> f32 {
        self.previous
    }
}

impl Drop for TimeScaleGuard {
    fn drop(&mut self) {
        self.handle.set(self.previous);
    }
}
