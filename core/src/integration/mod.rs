//! Integration tests for the rewind core
//!
//! Exercises the recorder and controller together over long recording
//! sessions, irregular clocks, and repeated rewinds.

#[cfg(test)]
mod property_tests;

#[cfg(test)]
pub(crate) mod test_utils {
    use glam::Vec3;
    use rewind_shared::{RecorderConfig, RewindConfig};

    use crate::rewind::RewindController;
    use crate::sample::HistoryEntry;
    use crate::test_utils::{RecordingHooks, TestEntity, record_ticks};

    /// Config with the given timings and playback speed
    pub fn rewind_config(interval: f64, window: f64, rewind_speed: f64) -> RewindConfig {
        let mut config = RewindConfig {
            recorder: RecorderConfig::new(interval, window),
            ..Default::default()
        };
        config.playback.rewind_speed = rewind_speed;
        config
    }

    /// Record an entity moving along +x for `ticks` ticks of `dt` starting at 0.
    ///
    /// Returns the controller, the entity, and the time of the last tick.
    pub fn record_session(
        config: RewindConfig,
        dt: f64,
        ticks: usize,
    ) -> (RewindController<RecordingHooks>, TestEntity, f64) {
        let mut controller = RewindController::with_hooks(config, RecordingHooks::default());
        let mut entity = TestEntity::moving(Vec3::X);
        let last = record_ticks(&mut controller, &mut entity, 0.0, dt, ticks);
        (controller, entity, last)
    }

    /// Copy of the controller's current history
    pub fn snapshot(controller: &RewindController<RecordingHooks>) -> Vec<HistoryEntry> {
        controller.history().iter().copied().collect()
    }
}
