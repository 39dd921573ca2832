//! Immutable per-session configuration.
//!
//! Every struct carries a [`Default`] holding the canonical tuning. Settings
//! are checked once by [`SandboxSettings::validate`] when a session starts and
//! are read-only afterwards.

use glam::Vec3;

use crate::error::{ConfigError, Result};

/// Canonical pitch bound in degrees (straight down/up over the vehicle).
pub const DEFAULT_PITCH_LIMIT: f32 = 90.0;

/// Standard gravitational acceleration (m/s^2).
pub const GRAVITY: f32 = 9.81;

/// Where the vehicle starts: centered, wheels touching the ground.
pub const DEFAULT_SPAWN_POSITION: Vec3 = Vec3::new(0.0, 0.35, 0.0);

/// Vehicle movement configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct MovementSettings {
    /// Translation speed in units per second.
    pub move_speed: f32,
    /// Turn rate in degrees per second.
    pub turn_speed: f32,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            move_speed: 12.0,
            turn_speed: 90.0,
        }
    }
}

/// Orbit camera configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraSettings {
    /// Degrees of yaw/pitch per unit of pointer motion.
    pub mouse_look_speed: f32,
    /// Starting distance between the pitch pivot and the camera.
    pub distance: f32,
    /// Closest allowed zoom distance.
    pub min_distance: f32,
    /// Farthest allowed zoom distance, `None` for unbounded zoom-out.
    pub max_distance: Option<f32>,
    /// Distance change per scroll event.
    pub zoom_step: f32,
    /// Height of the yaw pivot above the vehicle origin.
    pub height: f32,
    /// Starting pitch in degrees.
    pub initial_pitch: f32,
    /// Lowest pitch in degrees.
    pub pitch_min: f32,
    /// Highest pitch in degrees.
    pub pitch_max: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            mouse_look_speed: 0.15,
            distance: 12.0,
            min_distance: 4.0,
            max_distance: Some(40.0),
            zoom_step: 1.5,
            height: 1.5,
            initial_pitch: 18.0,
            pitch_min: -DEFAULT_PITCH_LIMIT,
            pitch_max: DEFAULT_PITCH_LIMIT,
        }
    }
}

impl CameraSettings {
    /// Pitch clamp range for [`crate::orbit::compute_look_angles`].
    pub fn pitch_limits(&self) -> PitchLimits {
        PitchLimits {
            min: self.pitch_min,
            max: self.pitch_max,
        }
    }
}

/// Inclusive pitch clamp range in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PitchLimits {
    /// Lowest pitch (looking up at the vehicle).
    pub min: f32,
    /// Highest pitch (looking down at the vehicle).
    pub max: f32,
}

impl Default for PitchLimits {
    fn default() -> Self {
        Self {
            min: -DEFAULT_PITCH_LIMIT,
            max: DEFAULT_PITCH_LIMIT,
        }
    }
}

/// Tuning for the knockable prop approximation.
#[derive(Clone, Debug, PartialEq)]
pub struct PropPhysicsSettings {
    /// Downward acceleration (units/s^2).
    pub gravity: f32,
    /// Reach of the vehicle's impact sphere, added to each prop radius.
    pub vehicle_impact_radius: f32,
    /// Lower bound on derived prop mass.
    pub minimum_mass: f32,
    /// Vehicle speed below which contact produces no impulse.
    pub min_impact_speed: f32,
    /// Fraction of vehicle speed transferred per unit mass.
    pub impulse_scale: f32,
    /// Minimum upward velocity after an impact.
    pub pop_velocity: f32,
    /// Fraction of penetration resolved per frame.
    pub penetration_correction: f32,
    /// Fraction of downward speed kept (and inverted) on a bounce.
    pub restitution: f32,
    /// Bounce speeds below this snap to zero.
    pub rest_speed: f32,
    /// Horizontal velocity multiplier per frame while resting on the ground.
    pub rolling_damping: f32,
    /// Height tolerance above the radius that still counts as resting.
    pub rest_epsilon: f32,
}

impl Default for PropPhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            vehicle_impact_radius: 1.6,
            minimum_mass: 0.2,
            min_impact_speed: 0.1,
            impulse_scale: 0.8,
            pop_velocity: 1.6,
            penetration_correction: 0.4,
            restitution: 0.35,
            rest_speed: 0.25,
            rolling_damping: 0.97,
            rest_epsilon: 0.001,
        }
    }
}

/// Everything a [`crate::Sandbox`] needs to start a session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SandboxSettings {
    /// Vehicle speeds.
    pub movement: MovementSettings,
    /// Orbit camera look, zoom and mount.
    pub camera: CameraSettings,
    /// Prop approximation tuning.
    pub physics: PropPhysicsSettings,
    /// Vehicle start pose.
    pub spawn: SpawnPoint,
}

/// Vehicle start pose.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnPoint {
    /// Vehicle origin at spawn.
    pub position: Vec3,
    /// Starting yaw in degrees.
    pub yaw: f32,
}

impl Default for SpawnPoint {
    fn default() -> Self {
        Self {
            position: DEFAULT_SPAWN_POSITION,
            yaw: 0.0,
        }
    }
}

impl SandboxSettings {
    /// Check the settings once, before the first frame.
    pub fn validate(&self) -> Result<()> {
        let movement = &self.movement;
        non_negative("move_speed", movement.move_speed)?;
        non_negative("turn_speed", movement.turn_speed)?;

        let camera = &self.camera;
        non_negative("mouse_look_speed", camera.mouse_look_speed)?;
        non_negative("zoom_step", camera.zoom_step)?;
        non_negative("camera_height", camera.height)?;
        positive("min_distance", camera.min_distance)?;
        if let Some(max) = camera.max_distance {
            non_negative("max_distance", max)?;
            if camera.min_distance > max {
                return Err(ConfigError::ZoomRange {
                    min: camera.min_distance,
                    max,
                });
            }
        }
        let too_far = camera.max_distance.is_some_and(|max| camera.distance > max);
        if !camera.distance.is_finite() || camera.distance < camera.min_distance || too_far {
            return Err(ConfigError::InitialDistance {
                distance: camera.distance,
                min: camera.min_distance,
                max: camera.max_distance,
            });
        }

        let pitch_ordered = camera.pitch_min <= camera.pitch_max;
        let pitch_in_range = camera.pitch_min >= -DEFAULT_PITCH_LIMIT
            && camera.pitch_max <= DEFAULT_PITCH_LIMIT;
        if !pitch_ordered || !pitch_in_range {
            return Err(ConfigError::PitchRange {
                min: camera.pitch_min,
                max: camera.pitch_max,
            });
        }
        if !(camera.pitch_min..=camera.pitch_max).contains(&camera.initial_pitch) {
            return Err(ConfigError::InitialPitch {
                pitch: camera.initial_pitch,
                min: camera.pitch_min,
                max: camera.pitch_max,
            });
        }

        let physics = &self.physics;
        non_negative("gravity", physics.gravity)?;
        positive("vehicle_impact_radius", physics.vehicle_impact_radius)?;
        positive("minimum_mass", physics.minimum_mass)?;
        non_negative("min_impact_speed", physics.min_impact_speed)?;
        non_negative("impulse_scale", physics.impulse_scale)?;
        non_negative("pop_velocity", physics.pop_velocity)?;
        non_negative("penetration_correction", physics.penetration_correction)?;
        non_negative("restitution", physics.restitution)?;
        non_negative("rest_speed", physics.rest_speed)?;
        non_negative("rolling_damping", physics.rolling_damping)?;
        non_negative("rest_epsilon", physics.rest_epsilon)?;

        Ok(())
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(SandboxSettings::default().validate(), Ok(()));
    }

    #[test]
    fn test_unbounded_zoom_is_valid() {
        let mut settings = SandboxSettings::default();
        settings.camera.max_distance = None;
        settings.camera.distance = 500.0;
        assert_eq!(settings.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_inverted_zoom_range() {
        let mut settings = SandboxSettings::default();
        settings.camera.min_distance = 20.0;
        settings.camera.max_distance = Some(10.0);
        assert_eq!(
            settings.validate(),
            Err(ConfigError::ZoomRange {
                min: 20.0,
                max: 10.0
            })
        );
    }

    #[test]
    fn test_rejects_initial_distance_outside_range() {
        let mut settings = SandboxSettings::default();
        settings.camera.distance = 2.0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InitialDistance { .. })
        ));

        settings.camera.distance = 41.0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InitialDistance { .. })
        ));
    }

    #[test]
    fn test_rejects_pitch_bounds() {
        let mut settings = SandboxSettings::default();
        settings.camera.pitch_max = 95.0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::PitchRange { .. })
        ));

        let mut settings = SandboxSettings::default();
        settings.camera.pitch_min = 30.0;
        settings.camera.pitch_max = 10.0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::PitchRange { .. })
        ));
    }

    #[test]
    fn test_narrow_pitch_bounds_require_initial_pitch_inside() {
        let mut settings = SandboxSettings::default();
        settings.camera.pitch_min = -70.0;
        settings.camera.pitch_max = 70.0;
        assert_eq!(settings.validate(), Ok(()));

        settings.camera.initial_pitch = 75.0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InitialPitch { .. })
        ));
    }

    #[test]
    fn test_rejects_non_positive_mass_and_radius() {
        let mut settings = SandboxSettings::default();
        settings.physics.minimum_mass = 0.0;
        assert_eq!(
            settings.validate(),
            Err(ConfigError::NotPositive {
                field: "minimum_mass",
                value: 0.0
            })
        );

        let mut settings = SandboxSettings::default();
        settings.physics.vehicle_impact_radius = -1.0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::NotPositive {
                field: "vehicle_impact_radius",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_nan_speed() {
        let mut settings = SandboxSettings::default();
        settings.movement.move_speed = f32::NAN;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidValue {
                field: "move_speed",
                ..
            })
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::ZoomRange {
            min: 20.0,
            max: 10.0,
        };
        assert_eq!(err.to_string(), "minimum zoom distance 20 exceeds maximum 10");

        let err = ConfigError::InitialDistance {
            distance: 1.0,
            min: 4.0,
            max: None,
        };
        assert_eq!(
            err.to_string(),
            "initial camera distance 1 is below minimum zoom distance 4"
        );
    }
}
