//! Shared test utilities for integration and unit tests

use glam::{Quat, Vec3};

use crate::adapter::{RewindHooks, RewindTarget};
use crate::rewind::RewindController;
use crate::runtime::Simulation;
use crate::sample::{MotionSample, PoseSample};

// ============================================================================
// Test Entity Implementation
// ============================================================================

/// Scripted entity that integrates its own velocity while simulation is enabled.
///
/// Every adapter call is logged so tests can assert on exactly what the
/// controller did.
#[derive(Debug, Clone)]
pub struct TestEntity {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    /// Whether `get_motion` reports velocities
    pub has_body: bool,
    pub simulation_enabled: bool,
    pub applied_poses: Vec<PoseSample>,
    pub applied_motions: Vec<(MotionSample, f32)>,
    pub simulation_toggles: Vec<bool>,
}

impl TestEntity {
    /// Entity at the origin moving with constant `velocity`
    pub fn moving(velocity: Vec3) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            linear_velocity: velocity,
            angular_velocity: Vec3::ZERO,
            has_body: true,
            simulation_enabled: true,
            applied_poses: Vec::new(),
            applied_motions: Vec::new(),
            simulation_toggles: Vec::new(),
        }
    }

    /// Kinematic entity with no dynamics body
    pub fn without_body(velocity: Vec3) -> Self {
        Self {
            has_body: false,
            ..Self::moving(velocity)
        }
    }

    /// Integrate one step of motion (no-op while simulation is suspended)
    pub fn integrate(&mut self, dt: f64) {
        if !self.simulation_enabled {
            return;
        }
        let dt = dt as f32;
        self.position += self.linear_velocity * dt;
        self.rotation = (Quat::from_scaled_axis(self.angular_velocity * dt) * self.rotation).normalize();
    }
}

impl RewindTarget for TestEntity {
    fn get_pose(&self, now: f64) -> PoseSample {
        PoseSample::new(self.position, self.rotation, self.scale, now)
    }

    fn get_motion(&self, now: f64) -> Option<MotionSample> {
        self.has_body
            .then(|| MotionSample::new(self.linear_velocity, self.angular_velocity, now))
    }

    fn apply_pose(&mut self, pose: &PoseSample) {
        self.position = pose.position;
        self.rotation = pose.rotation;
        self.scale = pose.scale;
        self.applied_poses.push(*pose);
    }

    fn apply_motion(&mut self, motion: &MotionSample, damping_factor: f32) {
        let damped = motion.scaled(damping_factor);
        self.linear_velocity = damped.linear_velocity;
        self.angular_velocity = damped.angular_velocity;
        self.applied_motions.push((*motion, damping_factor));
    }

    fn set_simulation_enabled(&mut self, enabled: bool) {
        self.simulation_enabled = enabled;
        self.simulation_toggles.push(enabled);
    }
}

impl Simulation for TestEntity {
    fn advance(&mut self, dt: f64) {
        self.integrate(dt);
    }
}

// ============================================================================
// Hook Recorder
// ============================================================================

/// Notification received by [`RecordingHooks`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookEvent {
    Start,
    End,
}

/// Hooks that log every notification in order
#[derive(Debug, Default)]
pub struct RecordingHooks {
    pub events: Vec<HookEvent>,
}

impl RewindHooks for RecordingHooks {
    fn on_rewind_start(&mut self) {
        self.events.push(HookEvent::Start);
    }

    fn on_rewind_end(&mut self) {
        self.events.push(HookEvent::End);
    }
}

// ============================================================================
// Drivers
// ============================================================================

/// Run `ticks` recording ticks of `dt` seconds, the first one at `start`.
///
/// The entity integrates after each tick, so an entity starting at the
/// origin with unit x velocity sits at `x == now - start` when sampled.
/// Returns the time of the last tick.
pub fn record_ticks<H: RewindHooks>(
    controller: &mut RewindController<H>,
    entity: &mut TestEntity,
    start: f64,
    dt: f64,
    ticks: usize,
) -> f64 {
    let mut now = start;
    for i in 0..ticks {
        now = start + i as f64 * dt;
        controller.update(entity, now, dt, false);
        entity.integrate(dt);
    }
    now
}
