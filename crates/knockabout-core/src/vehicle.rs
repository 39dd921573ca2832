//! Player vehicle kinematics.
//!
//! Pure functions that can be tested in isolation without Bevy dependencies.
//! The vehicle is Y-up, faces `-Z` at yaw 0, and positive yaw turns it
//! clockwise seen from above.

use glam::{Quat, Vec3};

use crate::{input::ControlAxes, settings::MovementSettings};

/// The player-controlled body. Velocity is never stored; see
/// [`VehicleMotionTracker`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VehicleBody {
    /// World position of the vehicle origin.
    pub position: Vec3,
    /// Heading in degrees.
    pub yaw: f32,
}

impl VehicleBody {
    /// A body at `position` with heading `yaw` in degrees.
    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self { position, yaw }
    }

    /// Yaw-only rotation of the body.
    pub fn rotation(&self) -> Quat {
        yaw_rotation(self.yaw)
    }

    /// Unit forward axis for the current heading.
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    /// Unit right axis for the current heading.
    pub fn right(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }
}

/// Rotation about world up for a clockwise-positive heading in degrees.
pub fn yaw_rotation(yaw_degrees: f32) -> Quat {
    Quat::from_rotation_y(-yaw_degrees.to_radians())
}

/// Advance the vehicle by one frame.
///
/// Translation uses the axes of the heading at the start of the frame; the
/// new turn only affects the next frame's axes.
pub fn integrate_vehicle(
    body: &mut VehicleBody,
    axes: ControlAxes,
    settings: &MovementSettings,
    dt: f32,
) {
    let forward = body.forward();
    let right = body.right();

    body.position += forward * (axes.forward * settings.move_speed * dt);
    body.position += right * (axes.strafe * settings.move_speed * dt);
    body.yaw += axes.turn * settings.turn_speed * dt;
}

/// Calculate velocity from a position delta over `dt`.
///
/// Returns zero when `dt` is zero or negative.
pub fn compute_velocity(current: Vec3, previous: Vec3, dt: f32) -> Vec3 {
    if dt <= 0.0 {
        return Vec3::ZERO;
    }
    (current - previous) / dt
}

/// Remembers the previous frame's vehicle position to derive velocity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VehicleMotionTracker {
    previous: Vec3,
}

impl VehicleMotionTracker {
    /// Start tracking from `position` (zero initial velocity).
    pub fn new(position: Vec3) -> Self {
        Self { previous: position }
    }

    /// Velocity since the last sample; stores `current` for the next frame.
    pub fn sample(&mut self, current: Vec3, dt: f32) -> Vec3 {
        let velocity = compute_velocity(current, self.previous, dt);
        self.previous = current;
        velocity
    }

    /// Position recorded by the last sample.
    pub fn previous(&self) -> Vec3 {
        self.previous
    }
}
