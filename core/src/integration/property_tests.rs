//! Invariants that must hold for any recording session

use glam::Vec3;
use rewind_shared::RecorderConfig;

use crate::recorder::SnapshotRecorder;
use crate::rewind::{RewindController, RewindError, RewindMode};
use crate::sample::PoseSample;
use crate::test_utils::{RecordingHooks, TestEntity};

use super::test_utils::*;

/// Irregular frame deltas, cycled
const JITTER: [f64; 7] = [0.013, 0.07, 0.031, 0.2, 0.005, 0.11, 0.047];

fn exact_session() -> (RewindController<RecordingHooks>, TestEntity, f64) {
    // 17 entries from t=1.0 to t=3.0 with x == t
    record_session(rewind_config(0.125, 2.0, 1.0), 0.0625, 49)
}

// ============================================================================
// Recorder Invariants
// ============================================================================

#[test]
fn test_window_stays_bounded_under_jitter() {
    let interval = 0.1;
    let window = 1.0;
    let mut recorder = SnapshotRecorder::new(RecorderConfig::new(interval, window));

    let mut now = 0.0;
    for i in 0..600 {
        now += JITTER[i % JITTER.len()];
        recorder.record(now, PoseSample::at(Vec3::ZERO, now), None);

        let history = recorder.history();
        assert!(!history.is_empty());
        assert!(history.span() <= window + 1e-9, "span {} at t={}", history.span(), now);
        assert!(history.front().unwrap().timestamp() >= now - window - interval);
    }
}

#[test]
fn test_sampling_rate_is_limited() {
    let interval = 0.1;
    let dt = 0.03;
    let ticks = 200;
    let mut recorder = SnapshotRecorder::new(RecorderConfig::new(interval, 1000.0));

    let mut appended = 0;
    for i in 0..ticks {
        let now = i as f64 * dt;
        if recorder.record(now, PoseSample::at(Vec3::ZERO, now), None) {
            appended += 1;
        }
    }

    let duration = (ticks - 1) as f64 * dt;
    let limit = (duration / interval).floor() as usize + 1;
    assert!(appended <= limit, "{} samples over {}s", appended, duration);
    assert_eq!(recorder.history().len(), appended);
}

#[test]
fn test_timestamps_strictly_increase_under_jitter() {
    let mut recorder = SnapshotRecorder::new(RecorderConfig::new(0.05, 2.0));
    let mut now = 10.0;
    for i in 0..300 {
        // Every fifth tick the clock stutters backwards
        now += if i % 5 == 4 { -0.02 } else { JITTER[i % JITTER.len()] };
        recorder.record(now, PoseSample::at(Vec3::ZERO, now), None);
    }

    let history: Vec<_> = recorder.history().iter().collect();
    assert!(history.windows(2).all(|w| w[0].timestamp() < w[1].timestamp()));
    assert!(recorder.dropped_samples() > 0);
}

// ============================================================================
// Replay Fidelity
// ============================================================================

#[test]
fn test_landing_on_entries_applies_exact_pose() {
    let (mut controller, mut entity, last) = exact_session();
    let before = snapshot(&controller);

    controller.start_rewind(&mut entity, last).unwrap();
    for k in (0..before.len() - 1).rev() {
        controller.step_rewind(&mut entity, 0.125).unwrap();
        assert_eq!(controller.cursor(), Some(k));
        assert_eq!(entity.applied_poses.last(), Some(&before[k].pose));
    }
}

#[test]
fn test_no_drift_after_many_small_steps() {
    let (mut controller, mut entity, last) = exact_session();
    let before = snapshot(&controller);

    controller.start_rewind(&mut entity, last).unwrap();
    // 27 steps of 0.037s: t = 2.001, between entries 2.0 and 2.125
    for _ in 0..27 {
        controller.step_rewind(&mut entity, 0.037).unwrap();
    }
    let cursor = controller.cursor().unwrap();
    assert_eq!(cursor, 8);

    controller.stop_rewind(&mut entity).unwrap();
    assert_eq!(entity.position, before[cursor].pose.position);
    assert_eq!(entity.rotation, before[cursor].pose.rotation);
    assert_eq!(entity.scale, before[cursor].pose.scale);
}

// ============================================================================
// Truncation
// ============================================================================

#[test]
fn test_truncation_at_every_cursor() {
    for k in 0..17 {
        let (mut controller, mut entity, last) = exact_session();
        let before = snapshot(&controller);

        controller.start_rewind(&mut entity, last).unwrap();
        controller
            .step_rewind(&mut entity, (16 - k) as f64 * 0.125)
            .unwrap();
        assert_eq!(controller.cursor(), Some(k));

        let report = controller.stop_rewind(&mut entity).unwrap();
        assert_eq!(report.discarded, 16 - k);

        let history = controller.history();
        assert_eq!(history.len(), k + 1);
        assert_eq!(history.back(), Some(&before[k]));
        let cutoff = before[k].timestamp();
        assert!(history.iter().all(|e| e.timestamp() <= cutoff));
    }
}

// ============================================================================
// No-op Failures
// ============================================================================

#[test]
fn test_failed_calls_leave_state_untouched() {
    let mut controller = RewindController::with_hooks(rewind_config(0.125, 2.0, 1.0), RecordingHooks::default());
    let mut entity = TestEntity::moving(Vec3::X);

    for _ in 0..3 {
        assert_eq!(controller.start_rewind(&mut entity, 1.0), Err(RewindError::EmptyHistory));
        assert_eq!(controller.stop_rewind(&mut entity), Err(RewindError::NotRewinding));
        assert_eq!(controller.step_rewind(&mut entity, 0.1), Err(RewindError::NotRewinding));
    }

    assert_eq!(controller.mode(), RewindMode::Recording);
    assert!(controller.history().is_empty());
    assert!(controller.hooks().events.is_empty());
    assert!(entity.simulation_toggles.is_empty());
    assert!(entity.applied_poses.is_empty());
}

#[test]
fn test_repeated_start_keeps_first_rewind() {
    let (mut controller, mut entity, last) = exact_session();
    controller.start_rewind(&mut entity, last).unwrap();
    controller.step_rewind(&mut entity, 0.5).unwrap();

    assert_eq!(
        controller.start_rewind(&mut entity, last + 1.0),
        Err(RewindError::AlreadyRewinding)
    );
    assert_eq!(controller.record(&entity, last + 1.0), Err(RewindError::Rewinding));
    assert_eq!(controller.cursor(), Some(12));
    assert_eq!(controller.history().len(), 17);
    assert_eq!(entity.simulation_toggles, vec![false]);
}

// ============================================================================
// Cancel Anytime
// ============================================================================

#[test]
fn test_stop_right_after_start() {
    let (mut controller, mut entity, last) = exact_session();
    let before = snapshot(&controller);

    controller.start_rewind(&mut entity, last).unwrap();
    let report = controller.stop_rewind(&mut entity).unwrap();

    assert_eq!(report.cursor, 16);
    assert_eq!(report.discarded, 0);
    assert_eq!(report.rewound_seconds, 0.0);
    assert_eq!(controller.mode(), RewindMode::Recording);
    assert_eq!(snapshot(&controller), before);
    assert_eq!(entity.position, before[16].pose.position);
    assert_eq!(entity.simulation_toggles, vec![false, true]);
}

#[test]
fn test_stop_after_single_empty_step() {
    let (mut controller, mut entity, last) = exact_session();

    controller.start_rewind(&mut entity, last).unwrap();
    controller.step_rewind(&mut entity, 0.0).unwrap();
    let report = controller.stop_rewind(&mut entity).unwrap();

    assert_eq!(report.cursor, 16);
    assert_eq!(controller.history().len(), 17);
}
