//! Knockable prop physics.
//!
//! A special-cased approximation tuned for props that look plausible when the
//! vehicle plows through them, not a rigid-body solver. Props interact with
//! the ground plane and with the vehicle's impact sphere only; props never
//! collide with each other.

use glam::Vec3;

use crate::{
    scene::PlacementDescriptor,
    session::FrameReport,
    settings::PropPhysicsSettings,
    vehicle::{VehicleBody, VehicleMotionTracker},
};

/// Smallest radius a prop may have.
const MIN_PROP_RADIUS: f32 = 0.05;

/// Separations below this use the vehicle's forward axis as push direction.
const DEGENERATE_DISTANCE: f32 = 1e-4;

/// One independent dynamic prop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DynamicProp {
    /// Center of the prop.
    pub position: Vec3,
    /// Linear velocity in units per second.
    pub velocity: Vec3,
    /// Contact radius for both ground and vehicle tests.
    pub radius: f32,
    /// Always at least the configured minimum mass.
    pub mass: f32,
}

impl DynamicProp {
    /// Derive a resting prop from a static placement.
    pub fn from_placement(placement: &PlacementDescriptor, physics: &PropPhysicsSettings) -> Self {
        Self {
            position: placement.position,
            velocity: Vec3::ZERO,
            radius: compute_prop_radius(placement.scale),
            mass: compute_prop_mass(placement.scale, physics.minimum_mass),
        }
    }

    /// Whether the prop sits on the ground (within the rest tolerance).
    pub fn is_resting(&self, physics: &PropPhysicsSettings) -> bool {
        self.position.y <= self.radius + physics.rest_epsilon
    }
}

/// Approximate prop mass from its scale (volume proxy).
///
/// Never returns less than `minimum_mass`.
pub fn compute_prop_mass(scale: Vec3, minimum_mass: f32) -> f32 {
    (scale.x * scale.y * scale.z).max(minimum_mass)
}

/// Contact radius: half the largest extent.
pub fn compute_prop_radius(scale: Vec3) -> f32 {
    (scale.abs().max_element() * 0.5).max(MIN_PROP_RADIUS)
}

/// Clamp a below-ground prop to the surface and bounce downward velocity.
///
/// Returns the new `(position_y, velocity_y)`. Props at or above `radius`
/// are returned unchanged.
pub fn resolve_ground_contact(
    position_y: f32,
    velocity_y: f32,
    radius: f32,
    physics: &PropPhysicsSettings,
) -> (f32, f32) {
    if position_y >= radius {
        return (position_y, velocity_y);
    }

    let mut velocity_y = velocity_y;
    if velocity_y < 0.0 {
        velocity_y = -velocity_y * physics.restitution;
        if velocity_y.abs() < physics.rest_speed {
            velocity_y = 0.0;
        }
    }
    (radius, velocity_y)
}

/// Vehicle state the prop step reads each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VehicleContact {
    /// Vehicle position after this frame's integration.
    pub position: Vec3,
    /// Finite-difference velocity for this frame.
    pub velocity: Vec3,
    /// Fallback push direction when a prop sits on the vehicle origin.
    pub forward: Vec3,
}

/// Apply the vehicle impact response to one prop.
///
/// Returns whether the prop was hit.
pub fn apply_vehicle_impact(
    prop: &mut DynamicProp,
    vehicle: &VehicleContact,
    physics: &PropPhysicsSettings,
) -> bool {
    let offset = prop.position - vehicle.position;
    let distance = offset.length();
    let impact_radius = physics.vehicle_impact_radius + prop.radius;
    let speed = vehicle.velocity.length();

    if distance >= impact_radius || speed <= physics.min_impact_speed {
        return false;
    }

    let push = if distance > DEGENERATE_DISTANCE {
        offset / distance
    } else {
        vehicle.forward.normalize_or(Vec3::NEG_Z)
    };

    let penetration = impact_radius - distance;
    if penetration > 0.0 {
        prop.position += push * (penetration * physics.penetration_correction);
    }

    prop.velocity += push * (speed * physics.impulse_scale / prop.mass);
    prop.velocity.y = prop.velocity.y.max(physics.pop_velocity);
    true
}

/// Advance one prop by `dt`: gravity, vehicle impact, integration, ground.
///
/// Returns whether the vehicle hit the prop this frame.
pub fn step_prop(
    prop: &mut DynamicProp,
    vehicle: &VehicleContact,
    physics: &PropPhysicsSettings,
    dt: f32,
) -> bool {
    prop.velocity.y -= physics.gravity * dt;

    let hit = apply_vehicle_impact(prop, vehicle, physics);

    prop.position += prop.velocity * dt;

    (prop.position.y, prop.velocity.y) =
        resolve_ground_contact(prop.position.y, prop.velocity.y, prop.radius, physics);

    if prop.is_resting(physics) {
        prop.velocity.x *= physics.rolling_damping;
        prop.velocity.z *= physics.rolling_damping;
    }

    hit
}

/// All dynamic props plus the vehicle motion history they react to.
#[derive(Clone, Debug)]
pub struct PropField {
    props: Vec<DynamicProp>,
    tracker: VehicleMotionTracker,
}

impl PropField {
    /// Start a field with the vehicle at `vehicle_position`.
    pub fn new(props: Vec<DynamicProp>, vehicle_position: Vec3) -> Self {
        Self {
            props,
            tracker: VehicleMotionTracker::new(vehicle_position),
        }
    }

    /// Props in placement order.
    pub fn props(&self) -> &[DynamicProp] {
        &self.props
    }

    /// Advance every prop against the vehicle's already-updated position.
    pub fn step(
        &mut self,
        vehicle: &VehicleBody,
        physics: &PropPhysicsSettings,
        dt: f32,
    ) -> FrameReport {
        let contact = VehicleContact {
            position: vehicle.position,
            velocity: self.tracker.sample(vehicle.position, dt),
            forward: vehicle.forward(),
        };

        let mut impacts = 0;
        for (index, prop) in self.props.iter_mut().enumerate() {
            if step_prop(prop, &contact, physics, dt) {
                impacts += 1;
                tracing::debug!(
                    prop = index,
                    speed = contact.velocity.length(),
                    velocity = ?prop.velocity,
                    "Vehicle knocked prop"
                );
            }
        }

        FrameReport {
            vehicle_velocity: contact.velocity,
            impacts,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::scene::ShapeKind;

    const EPS: f32 = 1e-5;

    fn physics() -> PropPhysicsSettings {
        PropPhysicsSettings::default()
    }

    fn resting_prop(position: Vec3, radius: f32, mass: f32) -> DynamicProp {
        DynamicProp {
            position,
            velocity: Vec3::ZERO,
            radius,
            mass,
        }
    }

    #[test]
    fn test_resolve_ground_contact_bounces_and_clamps() {
        let (y, vy) = resolve_ground_contact(0.1, -3.0, 0.45, &physics());
        assert_eq!(y, 0.45);
        assert!((vy - 1.05).abs() < EPS);
    }

    #[test]
    fn test_resolve_ground_contact_keeps_above_ground_state() {
        let (y, vy) = resolve_ground_contact(0.8, 0.2, 0.45, &physics());
        assert_eq!(y, 0.8);
        assert_eq!(vy, 0.2);
    }

    #[test]
    fn test_resolve_ground_contact_snaps_small_bounce() {
        // 0.5 * 0.35 = 0.175, below the rest speed.
        let (y, vy) = resolve_ground_contact(0.3, -0.5, 0.45, &physics());
        assert_eq!(y, 0.45);
        assert_eq!(vy, 0.0);
    }

    #[test]
    fn test_resolve_ground_contact_keeps_upward_velocity() {
        let (y, vy) = resolve_ground_contact(0.2, 2.0, 0.45, &physics());
        assert_eq!(y, 0.45);
        assert_eq!(vy, 2.0);
    }

    #[test]
    fn test_resolve_ground_contact_idempotent_at_rest() {
        let mut state = (0.45, 0.0);
        for _ in 0..5 {
            state = resolve_ground_contact(state.0, state.1, 0.45, &physics());
            assert_eq!(state, (0.45, 0.0));
        }
    }

    #[test]
    fn test_compute_prop_mass_scales_with_size() {
        let small = compute_prop_mass(Vec3::splat(0.8), 0.2);
        let large = compute_prop_mass(Vec3::new(1.0, 2.5, 1.0), 0.2);
        assert!(large > small);
    }

    #[test]
    fn test_compute_prop_mass_respects_minimum() {
        assert_eq!(compute_prop_mass(Vec3::splat(0.1), 0.2), 0.2);
        assert_eq!(compute_prop_mass(Vec3::ZERO, 0.2), 0.2);
    }

    #[test]
    fn test_prop_radius_is_half_largest_extent() {
        assert_eq!(compute_prop_radius(Vec3::new(2.4, 6.2, 2.4)), 3.1);
        assert_eq!(compute_prop_radius(Vec3::splat(1.1)), 0.55);
        assert!(compute_prop_radius(Vec3::ZERO) > 0.0);
    }

    #[test]
    fn test_from_placement_starts_at_rest() {
        let placement = PlacementDescriptor {
            shape: ShapeKind::Cube,
            color_name: "red",
            scale: Vec3::new(1.2, 1.4, 1.2),
            position: Vec3::new(0.0, 0.7, 18.0),
        };
        let prop = DynamicProp::from_placement(&placement, &physics());

        assert_eq!(prop.velocity, Vec3::ZERO);
        assert!((prop.radius - 0.7).abs() < EPS);
        assert!((prop.mass - 1.2 * 1.4 * 1.2).abs() < EPS);
        assert!(prop.is_resting(&physics()));
    }

    #[test]
    fn test_gravity_pulls_airborne_prop_down() {
        let mut prop = resting_prop(Vec3::new(0.0, 5.0, 0.0), 0.5, 1.0);
        let vehicle = VehicleContact {
            position: Vec3::new(100.0, 0.35, 100.0),
            velocity: Vec3::ZERO,
            forward: Vec3::NEG_Z,
        };
        let hit = step_prop(&mut prop, &vehicle, &physics(), 0.1);

        assert!(!hit);
        assert!((prop.velocity.y + 0.981).abs() < EPS);
        assert!((prop.position.y - (5.0 - 0.0981)).abs() < EPS);
    }

    #[test]
    fn test_resting_prop_stays_put() {
        let start = resting_prop(Vec3::new(4.0, 0.5, 4.0), 0.5, 1.0);
        let mut prop = start;
        let vehicle = VehicleContact {
            position: Vec3::new(50.0, 0.35, 50.0),
            velocity: Vec3::ZERO,
            forward: Vec3::NEG_Z,
        };
        for _ in 0..120 {
            step_prop(&mut prop, &vehicle, &physics(), 1.0 / 60.0);
        }
        assert_eq!(prop, start);
    }

    #[test]
    fn test_slow_vehicle_does_not_push() {
        let mut prop = resting_prop(Vec3::new(0.0, 0.5, -1.0), 0.5, 1.0);
        let vehicle = VehicleContact {
            position: Vec3::new(0.0, 0.35, 0.0),
            velocity: Vec3::new(0.0, 0.0, -0.05),
            forward: Vec3::NEG_Z,
        };
        assert!(!apply_vehicle_impact(&mut prop, &vehicle, &physics()));
        assert_eq!(prop.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_impact_pushes_away_and_pops_up() {
        let mut prop = resting_prop(Vec3::new(0.0, 0.35, -1.0), 0.5, 2.0);
        let vehicle = VehicleContact {
            position: Vec3::new(0.0, 0.35, 0.0),
            velocity: Vec3::new(0.0, 0.0, -10.0),
            forward: Vec3::NEG_Z,
        };
        assert!(apply_vehicle_impact(&mut prop, &vehicle, &physics()));

        // Penetration 1.1, 40% corrected along -Z.
        assert!((prop.position.z - (-1.0 - 1.1 * 0.4)).abs() < EPS);
        // 10 * 0.8 / 2 along the push direction.
        assert!((prop.velocity.z + 4.0).abs() < EPS);
        assert_eq!(prop.velocity.y, 1.6);
    }

    #[test]
    fn test_degenerate_distance_uses_vehicle_forward() {
        let mut prop = resting_prop(Vec3::new(0.0, 0.35, 0.0), 0.5, 1.0);
        let vehicle = VehicleContact {
            position: Vec3::new(0.0, 0.35, 0.0),
            velocity: Vec3::new(5.0, 0.0, 0.0),
            forward: Vec3::X,
        };
        assert!(apply_vehicle_impact(&mut prop, &vehicle, &physics()));
        assert!(prop.velocity.x > 0.0);
        assert!(prop.position.x > 0.0);
        assert!(prop.velocity.is_finite());
    }

    #[test]
    fn test_heavier_prop_moves_less() {
        let vehicle = VehicleContact {
            position: Vec3::ZERO,
            velocity: Vec3::new(8.0, 0.0, 0.0),
            forward: Vec3::X,
        };
        let mut light = resting_prop(Vec3::new(1.0, 0.0, 0.0), 0.5, 1.0);
        let mut heavy = resting_prop(Vec3::new(1.0, 0.0, 0.0), 0.5, 30.0);
        apply_vehicle_impact(&mut light, &vehicle, &physics());
        apply_vehicle_impact(&mut heavy, &vehicle, &physics());

        assert!(light.velocity.x > heavy.velocity.x);
        // The pop is mass independent.
        assert_eq!(heavy.velocity.y, 1.6);
    }

    #[test]
    fn test_rolling_damping_on_ground() {
        let mut prop = resting_prop(Vec3::new(0.0, 0.5, 0.0), 0.5, 1.0);
        prop.velocity = Vec3::new(2.0, 0.0, -1.0);
        let vehicle = VehicleContact {
            position: Vec3::new(50.0, 0.35, 50.0),
            velocity: Vec3::ZERO,
            forward: Vec3::NEG_Z,
        };
        step_prop(&mut prop, &vehicle, &physics(), 0.0);

        assert!((prop.velocity.x - 2.0 * 0.97).abs() < EPS);
        assert!((prop.velocity.z + 0.97).abs() < EPS);
    }

    #[test]
    fn test_field_derives_vehicle_velocity() {
        let mut field = PropField::new(Vec::new(), Vec3::ZERO);
        let vehicle = VehicleBody::new(Vec3::new(0.0, 0.0, -2.0), 0.0);

        let report = field.step(&vehicle, &physics(), 0.5);
        assert_eq!(report.vehicle_velocity, Vec3::new(0.0, 0.0, -4.0));

        let report = field.step(&vehicle, &physics(), 0.5);
        assert_eq!(report.vehicle_velocity, Vec3::ZERO);
    }

    proptest! {
        #[test]
        fn test_mass_monotonic_in_scale(
            x in 0.6f32..20.0,
            y in 0.6f32..20.0,
            z in 0.6f32..20.0,
            dx in 0.01f32..5.0,
            dy in 0.01f32..5.0,
            dz in 0.01f32..5.0,
        ) {
            let minimum = PropPhysicsSettings::default().minimum_mass;
            let small = Vec3::new(x, y, z);
            let large = small + Vec3::new(dx, dy, dz);
            prop_assert!(compute_prop_mass(small, minimum) < compute_prop_mass(large, minimum));
            prop_assert!(compute_prop_mass(small, minimum) >= minimum);
        }

        #[test]
        fn test_ground_contact_never_below_radius(
            y in -10.0f32..10.0,
            vy in -50.0f32..50.0,
            radius in 0.05f32..5.0,
        ) {
            let (next_y, next_vy) = resolve_ground_contact(y, vy, radius, &PropPhysicsSettings::default());
            prop_assert!(next_y >= radius);
            if y < radius {
                prop_assert!(next_vy >= 0.0);
            }
        }
    }
}
