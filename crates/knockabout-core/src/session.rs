//! One simulation session: vehicle, orbit camera and prop field.
//!
//! ## Frame order
//!
//! ```text
//! input -> vehicle integration -> look update -> rig sync -> prop step
//! ```
//!
//! The rig and the prop step both read the vehicle position produced by this
//! frame's integration, so the camera and the physics never disagree about
//! where the vehicle is.

use glam::Vec3;

use crate::{
    error::Result,
    input::{FrameInput, ScrollDirection, compute_keyboard_axes},
    orbit::{OrbitRig, OrbitState},
    props::{DynamicProp, PropField},
    scene::PlacementDescriptor,
    settings::SandboxSettings,
    vehicle::{VehicleBody, integrate_vehicle},
};

/// Per-frame summary handed back to the host.
///
/// Produced by the prop step, which is the last stage of a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// Finite-difference vehicle velocity this frame.
    pub vehicle_velocity: Vec3,
    /// Number of props the vehicle hit this frame.
    pub impacts: usize,
}

impl FrameReport {
    /// Magnitude of the vehicle velocity.
    pub fn vehicle_speed(&self) -> f32 {
        self.vehicle_velocity.length()
    }
}

/// Owned state for a whole sandbox session.
#[derive(Clone, Debug)]
pub struct Sandbox {
    settings: SandboxSettings,
    vehicle: VehicleBody,
    orbit: OrbitState,
    rig: OrbitRig,
    props: PropField,
}

impl Sandbox {
    /// Validate `settings` and build the session from world placements.
    ///
    /// Ground placements are skipped; every other placement becomes a prop.
    pub fn new(settings: SandboxSettings, placements: &[PlacementDescriptor]) -> Result<Self> {
        settings.validate()?;

        let vehicle = VehicleBody::new(settings.spawn.position, settings.spawn.yaw);
        let orbit = OrbitState::new(
            vehicle.yaw,
            settings.camera.initial_pitch,
            settings.camera.distance,
        );
        let rig = orbit.rig(vehicle.position, settings.camera.height);

        let props: Vec<DynamicProp> = placements
            .iter()
            .filter(|placement| !placement.is_ground())
            .map(|placement| DynamicProp::from_placement(placement, &settings.physics))
            .collect();

        tracing::info!(
            props = props.len(),
            spawn = ?vehicle.position,
            "Sandbox session ready"
        );

        Ok(Self {
            props: PropField::new(props, vehicle.position),
            settings,
            vehicle,
            orbit,
            rig,
        })
    }

    /// Run one frame of `dt` seconds.
    ///
    /// A non-positive or NaN `dt` moves nothing: the look update still
    /// applies and the vehicle velocity reads as zero.
    pub fn step(&mut self, input: &FrameInput, dt: f32) -> FrameReport {
        let dt = if dt > 0.0 { dt } else { 0.0 };

        let axes = compute_keyboard_axes(&input.held);
        integrate_vehicle(&mut self.vehicle, axes, &self.settings.movement, dt);

        self.orbit.look(input.pointer_delta, &self.settings.camera);
        self.rig = self
            .orbit
            .rig(self.vehicle.position, self.settings.camera.height);

        self.props.step(&self.vehicle, &self.settings.physics, dt)
    }

    /// Apply one discrete scroll event to the camera distance.
    ///
    /// Takes effect on the rig at the next [`Sandbox::step`].
    pub fn zoom(&mut self, direction: ScrollDirection) {
        self.orbit.zoom(direction, &self.settings.camera);
    }

    /// Settings the session was validated with.
    pub fn settings(&self) -> &SandboxSettings {
        &self.settings
    }

    /// Vehicle pose after the most recent step.
    pub fn vehicle(&self) -> &VehicleBody {
        &self.vehicle
    }

    /// Orbit camera angles and distance.
    pub fn orbit(&self) -> &OrbitState {
        &self.orbit
    }

    /// Rig transforms from the most recent step.
    pub fn rig(&self) -> &OrbitRig {
        &self.rig
    }

    /// Props in placement order, ground excluded.
    pub fn props(&self) -> &[DynamicProp] {
        self.props.props()
    }
}
