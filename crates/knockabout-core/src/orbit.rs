//! Orbit camera: yaw/pitch/zoom state and the two-pivot rig.
//!
//! The rig is a yaw pivot placed above the vehicle, a pitch pivot chained
//! under it, and the camera chained under the pitch pivot at `distance`
//! behind it. Each pivot rotates about a single axis, so pitch can be clamped
//! without the camera picking up roll.

use glam::{Affine3A, Quat, Vec2, Vec3};

use crate::{
    input::ScrollDirection,
    settings::{CameraSettings, PitchLimits},
    vehicle::yaw_rotation,
};

/// Mutable orbit camera state carried across frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitState {
    /// Degrees, unbounded; positive looks to the right.
    pub yaw: f32,
    /// Degrees within the configured pitch limits; positive looks down.
    pub pitch: f32,
    /// Camera distance behind the pitch pivot.
    pub distance: f32,
}

impl OrbitState {
    /// State with angles in degrees and a camera distance.
    pub fn new(yaw: f32, pitch: f32, distance: f32) -> Self {
        Self {
            yaw,
            pitch,
            distance,
        }
    }

    /// Apply one frame of pointer motion.
    pub fn look(&mut self, pointer_delta: Vec2, settings: &CameraSettings) {
        (self.yaw, self.pitch) = compute_look_angles(
            self.yaw,
            self.pitch,
            pointer_delta,
            settings.mouse_look_speed,
            settings.pitch_limits(),
        );
    }

    /// Apply one scroll event.
    pub fn zoom(&mut self, direction: ScrollDirection, settings: &CameraSettings) {
        self.distance = compute_zoom(
            self.distance,
            direction,
            settings.min_distance,
            settings.max_distance,
            settings.zoom_step,
        );
    }

    /// Place the rig around a vehicle at `vehicle_position`.
    pub fn rig(&self, vehicle_position: Vec3, mount_height: f32) -> OrbitRig {
        OrbitRig {
            yaw_pivot_position: vehicle_position + Vec3::new(0.0, mount_height, 0.0),
            yaw_rotation: yaw_rotation(self.yaw),
            pitch_rotation: Quat::from_rotation_x(-self.pitch.to_radians()),
            camera_offset: Vec3::new(0.0, 0.0, self.distance),
        }
    }
}

/// Update yaw and pitch from pointer motion and clamp pitch.
///
/// Yaw is purely additive. Pitch never leaves `limits`, however far the
/// pointer pushes it.
pub fn compute_look_angles(
    yaw: f32,
    pitch: f32,
    pointer_delta: Vec2,
    look_speed: f32,
    limits: PitchLimits,
) -> (f32, f32) {
    let next_yaw = yaw + pointer_delta.x * look_speed;
    let next_pitch = (pitch + pointer_delta.y * look_speed)
        .max(limits.min)
        .min(limits.max);
    (next_yaw, next_pitch)
}

/// Adjust and clamp camera distance for one scroll event.
///
/// Scrolling in moves closer by `zoom_step`; scrolling out moves away. With
/// `max_distance = None` only the lower bound applies.
pub fn compute_zoom(
    distance: f32,
    direction: ScrollDirection,
    min_distance: f32,
    max_distance: Option<f32>,
    zoom_step: f32,
) -> f32 {
    let next = distance - direction.sign() * zoom_step;
    match max_distance {
        Some(max) => next.min(max).max(min_distance),
        None => next.max(min_distance),
    }
}

/// Resolved pivot transforms for one frame.
///
/// Composition is `yaw pivot × pitch pivot × camera offset`; the camera
/// itself adds no rotation, so its roll is always zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitRig {
    /// World position of the yaw pivot.
    pub yaw_pivot_position: Vec3,
    /// Yaw-only rotation of the yaw pivot.
    pub yaw_rotation: Quat,
    /// Pitch-only rotation of the pitch pivot, local to the yaw pivot.
    pub pitch_rotation: Quat,
    /// Camera translation local to the pitch pivot.
    pub camera_offset: Vec3,
}

impl OrbitRig {
    /// World transform of the yaw pivot.
    pub fn yaw_pivot(&self) -> Affine3A {
        Affine3A::from_rotation_translation(self.yaw_rotation, self.yaw_pivot_position)
    }

    /// World transform of the pitch pivot.
    pub fn pitch_pivot(&self) -> Affine3A {
        self.yaw_pivot() * Affine3A::from_quat(self.pitch_rotation)
    }

    /// World transform of the camera.
    pub fn camera(&self) -> Affine3A {
        self.pitch_pivot() * Affine3A::from_translation(self.camera_offset)
    }

    /// World position of the camera.
    pub fn camera_position(&self) -> Vec3 {
        self.camera().translation.into()
    }

    /// World rotation of the camera (yaw then pitch, zero roll).
    pub fn camera_rotation(&self) -> Quat {
        self.yaw_rotation * self.pitch_rotation
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_compute_look_angles_updates_yaw_and_pitch() {
        let (yaw, pitch) = compute_look_angles(
            10.0,
            15.0,
            Vec2::new(0.2, -0.1),
            100.0,
            PitchLimits::default(),
        );
        assert!((yaw - 30.0).abs() < EPS);
        assert!((pitch - 5.0).abs() < EPS);
    }

    #[test]
    fn test_compute_look_angles_clamps_pitch() {
        let limits = PitchLimits::default();
        let (_, high) = compute_look_angles(0.0, 89.0, Vec2::new(0.0, 1.0), 5.0, limits);
        let (_, low) = compute_look_angles(0.0, -89.0, Vec2::new(0.0, -1.0), 10.0, limits);
        assert_eq!(high, 90.0);
        assert_eq!(low, -90.0);
    }

    #[test]
    fn test_compute_look_angles_honours_narrow_limits() {
        let limits = PitchLimits {
            min: -70.0,
            max: 70.0,
        };
        let (_, pitch) = compute_look_angles(0.0, 60.0, Vec2::new(0.0, 50.0), 1.0, limits);
        assert_eq!(pitch, 70.0);
    }

    #[test]
    fn test_compute_zoom_scroll_in_zooms_in() {
        let distance = compute_zoom(10.0, ScrollDirection::In, 4.0, Some(18.0), 1.5);
        assert_eq!(distance, 8.5);
    }

    #[test]
    fn test_compute_zoom_scroll_out_zooms_out() {
        let distance = compute_zoom(10.0, ScrollDirection::Out, 4.0, Some(18.0), 2.0);
        assert_eq!(distance, 12.0);
    }

    #[test]
    fn test_compute_zoom_clamps_to_min_and_max() {
        assert_eq!(
            compute_zoom(4.2, ScrollDirection::In, 4.0, Some(18.0), 1.0),
            4.0
        );
        assert_eq!(
            compute_zoom(17.8, ScrollDirection::Out, 4.0, Some(18.0), 1.0),
            18.0
        );
    }

    #[test]
    fn test_compute_zoom_without_max_limit() {
        assert_eq!(compute_zoom(18.0, ScrollDirection::Out, 4.0, None, 6.0), 24.0);
        assert_eq!(compute_zoom(5.0, ScrollDirection::In, 4.0, None, 6.0), 4.0);
    }

    #[test]
    fn test_rig_places_camera_behind_vehicle() {
        let orbit = OrbitState::new(0.0, 0.0, 10.0);
        let rig = orbit.rig(Vec3::new(2.0, 0.35, -3.0), 1.5);

        assert!(rig.yaw_pivot_position.abs_diff_eq(Vec3::new(2.0, 1.85, -3.0), EPS));
        // Vehicle faces -Z at yaw 0, so "behind" is +Z.
        assert!(
            rig.camera_position()
                .abs_diff_eq(Vec3::new(2.0, 1.85, 7.0), EPS)
        );
    }

    #[test]
    fn test_rig_yaw_swings_camera_around_pivot() {
        let orbit = OrbitState::new(90.0, 0.0, 10.0);
        let rig = orbit.rig(Vec3::ZERO, 0.0);

        // Looking right (+X) puts the camera on the -X side.
        assert!(
            rig.camera_position()
                .abs_diff_eq(Vec3::new(-10.0, 0.0, 0.0), EPS)
        );
        let view = rig.camera_rotation() * Vec3::NEG_Z;
        assert!(view.abs_diff_eq(Vec3::X, EPS));
    }

    #[test]
    fn test_positive_pitch_raises_camera_and_looks_down() {
        let orbit = OrbitState::new(30.0, 40.0, 8.0);
        let rig = orbit.rig(Vec3::ZERO, 1.0);

        let camera = rig.camera_position();
        assert!(camera.y > rig.yaw_pivot_position.y);
        assert!((camera.distance(rig.yaw_pivot_position) - 8.0).abs() < EPS);

        let view = rig.camera_rotation() * Vec3::NEG_Z;
        assert!(view.y < 0.0);
    }

    #[test]
    fn test_pivots_carry_single_axis() {
        let orbit = OrbitState::new(-135.0, 65.0, 6.0);
        let rig = orbit.rig(Vec3::ZERO, 1.5);

        // Yaw pivot keeps its up axis; pitch pivot keeps its right axis.
        assert!((rig.yaw_rotation * Vec3::Y).abs_diff_eq(Vec3::Y, EPS));
        assert!((rig.pitch_rotation * Vec3::X).abs_diff_eq(Vec3::X, EPS));
    }

    #[test]
    fn test_camera_has_zero_roll() {
        for (yaw, pitch) in [(0.0, 0.0), (45.0, 80.0), (-270.0, -60.0), (725.0, 90.0)] {
            let rig = OrbitState::new(yaw, pitch, 12.0).rig(Vec3::ZERO, 1.5);
            let right = rig.camera_rotation() * Vec3::X;
            assert!(right.y.abs() < EPS, "roll at yaw {yaw} pitch {pitch}");
        }
    }

    #[test]
    fn test_state_zoom_uses_settings() {
        let settings = CameraSettings::default();
        let mut orbit = OrbitState::new(0.0, 18.0, settings.min_distance + 0.5);
        orbit.zoom(ScrollDirection::In, &settings);
        assert_eq!(orbit.distance, settings.min_distance);
    }

    proptest! {
        #[test]
        fn test_zoom_stays_in_bounds(
            distance in -100.0f32..200.0,
            step in 0.0f32..50.0,
            zoom_in in any::<bool>(),
        ) {
            let direction = if zoom_in { ScrollDirection::In } else { ScrollDirection::Out };
            let next = compute_zoom(distance, direction, 4.0, Some(18.0), step);
            prop_assert!((4.0..=18.0).contains(&next));

            let unbounded = compute_zoom(distance, direction, 4.0, None, step);
            prop_assert!(unbounded >= 4.0);
        }

        #[test]
        fn test_pitch_stays_in_bounds(
            pitch in -90.0f32..=90.0,
            delta_y in -1000.0f32..1000.0,
            speed in 0.0f32..10.0,
        ) {
            let (_, next) = compute_look_angles(0.0, pitch, Vec2::new(0.0, delta_y), speed, PitchLimits::default());
            prop_assert!((-90.0..=90.0).contains(&next));
        }
    }
}
