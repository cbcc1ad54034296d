//! Scripted bouncing ball used as the rewind target

use glam::{Quat, Vec3};
use rewind_core::{MotionSample, PoseSample, RewindTarget, Simulation};

const GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);
/// Fraction of vertical speed kept on each bounce
const RESTITUTION: f32 = 0.8;

/// Rigid ball bouncing on the plane y = 0
#[derive(Debug, Clone)]
pub struct Ball {
    pub position: Vec3,
    pub rotation: Quat,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    simulation_enabled: bool,
    bounces: u32,
}

impl Ball {
    pub fn new(position: Vec3, linear_velocity: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            linear_velocity,
            angular_velocity: Vec3::new(0.0, 0.0, -2.0),
            simulation_enabled: true,
            bounces: 0,
        }
    }

    pub fn bounces(&self) -> u32 {
        self.bounces
    }
}

impl RewindTarget for Ball {
    fn get_pose(&self, now: f64) -> PoseSample {
        PoseSample::new(self.position, self.rotation, Vec3::ONE, now)
    }

    fn get_motion(&self, now: f64) -> Option<MotionSample> {
        Some(MotionSample::new(
            self.linear_velocity,
            self.angular_velocity,
            now,
        ))
    }

    fn apply_pose(&mut self, pose: &PoseSample) {
        self.position = pose.position;
        self.rotation = pose.rotation;
    }

    fn apply_motion(&mut self, motion: &MotionSample, damping_factor: f32) {
        let damped = motion.scaled(damping_factor);
        self.linear_velocity = damped.linear_velocity;
        self.angular_velocity = damped.angular_velocity;
    }

    fn set_simulation_enabled(&mut self, enabled: bool) {
        self.simulation_enabled = enabled;
    }
}

impl Simulation for Ball {
    fn advance(&mut self, dt: f64) {
        if !self.simulation_enabled {
            return;
        }
        let dt = dt as f32;
        self.linear_velocity += GRAVITY * dt;
        self.position += self.linear_velocity * dt;
        self.rotation =
            (Quat::from_scaled_axis(self.angular_velocity * dt) * self.rotation).normalize();

        if self.position.y < 0.0 {
            self.position.y = -self.position.y;
            self.linear_velocity.y = -self.linear_velocity.y * RESTITUTION;
            self.bounces += 1;
        }
    }
}
