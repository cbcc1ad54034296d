//! Pose and motion samples captured by the recorder

use glam::{Quat, Vec3};

/// Full spatial state of an entity at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseSample {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    /// Time the pose was captured, in seconds
    pub timestamp: f64,
}

impl PoseSample {
    /// Create a pose sample
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3, timestamp: f64) -> Self {
        Self {
            position,
            rotation,
            scale,
            timestamp,
        }
    }

    /// Pose at `position` with identity rotation and unit scale
    pub fn at(position: Vec3, timestamp: f64) -> Self {
        Self::new(position, Quat::IDENTITY, Vec3::ONE, timestamp)
    }

    /// Interpolate between two poses.
    ///
    /// Position and scale are interpolated linearly, rotation spherically.
    /// `t` is clamped to `[0, 1]`, and the endpoints are returned untouched so
    /// replaying a stored sample never drifts.
    pub fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        if t <= 0.0 {
            return *a;
        }
        if t >= 1.0 {
            return *b;
        }
        let tf = t as f32;
        Self {
            position: a.position.lerp(b.position, tf),
            rotation: a.rotation.slerp(b.rotation, tf),
            scale: a.scale.lerp(b.scale, tf),
            timestamp: a.timestamp + (b.timestamp - a.timestamp) * t,
        }
    }
}

/// Linear and angular velocity of an entity at one instant.
///
/// Only captured for entities with a dynamics body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionSample {
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    /// Time the motion was captured, in seconds
    pub timestamp: f64,
}

impl MotionSample {
    /// Create a motion sample
    pub fn new(linear_velocity: Vec3, angular_velocity: Vec3, timestamp: f64) -> Self {
        Self {
            linear_velocity,
            angular_velocity,
            timestamp,
        }
    }

    /// Copy of this sample with both velocities multiplied by `factor`
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            linear_velocity: self.linear_velocity * factor,
            angular_velocity: self.angular_velocity * factor,
            timestamp: self.timestamp,
        }
    }
}

/// One recorded tick: a pose plus the paired motion, if any.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HistoryEntry {
    pub pose: PoseSample,
    pub motion: Option<MotionSample>,
}

impl HistoryEntry {
    pub fn new(pose: PoseSample, motion: Option<MotionSample>) -> Self {
        Self { pose, motion }
    }

    /// Timestamp of the entry (the pose's timestamp)
    pub fn timestamp(&self) -> f64 {
        self.pose.timestamp
    }
}
