//! Per-frame driving of the simulation session.
//!
//! ## Frame chain
//!
//! ```text
//! cursor grab -> scroll zoom -> sandbox step -> transform sync
//! ```
//!
//! The session is a single resource, so the chain has exclusive access to
//! it and every entity transform comes from the same step.

use bevy::{
    ecs::message::MessageReader, input::mouse::MouseWheel, prelude::*, window::CursorOptions,
};
use knockabout_core::{FrameInput, FrameReport, Sandbox};
use leafwing_input_manager::prelude::*;

use crate::input::{
    DriveAction, ScrollAccumulator, cursor_grab_system, cursor_is_grabbed, sample_held_keys,
    scroll_lines,
};

/// The running simulation plus the most recent frame report.
#[derive(Resource)]
pub struct SandboxSession {
    sandbox: Sandbox,
    last_frame: FrameReport,
}

impl SandboxSession {
    pub fn new(sandbox: Sandbox) -> Self {
        Self {
            sandbox,
            last_frame: FrameReport::default(),
        }
    }

    pub fn sandbox(&self) -> &Sandbox {
        &self.sandbox
    }

    /// Report from the last completed step.
    pub fn last_frame(&self) -> FrameReport {
        self.last_frame
    }
}

/// Marks the player vehicle root entity.
#[derive(Component)]
pub struct PlayerVehicle;

/// Marks the camera driven by the orbit rig.
#[derive(Component)]
pub struct OrbitCamera;

/// Index of the simulated prop an entity renders.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropIndex(pub usize);

/// Plugin that steps the session once per frame and syncs transforms.
pub struct SandboxPlugin;

impl Plugin for SandboxPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                cursor_grab_system,
                apply_scroll_zoom,
                step_sandbox,
                (
                    sync_vehicle_transform,
                    sync_camera_transform,
                    sync_prop_transforms,
                ),
            )
                .chain(),
        );
    }
}

/// Turn wheel travel into zoom events while the cursor is grabbed.
fn apply_scroll_zoom(
    mut wheel_events: MessageReader<MouseWheel>,
    cursor: Single<&CursorOptions>,
    mut scroll: ResMut<ScrollAccumulator>,
    mut session: ResMut<SandboxSession>,
) {
    let lines: f32 = wheel_events
        .read()
        .map(|event| scroll_lines(event.unit, event.y))
        .sum();

    if !cursor_is_grabbed(&cursor) {
        return;
    }

    for direction in scroll.accumulate(lines) {
        session.sandbox.zoom(direction);
    }
}

/// Run one simulation frame from this frame's actions.
fn step_sandbox(
    time: Res<Time>,
    action_query: Query<&ActionState<DriveAction>>,
    cursor: Single<&CursorOptions>,
    mut session: ResMut<SandboxSession>,
) {
    let Ok(action_state) = action_query.single() else {
        return;
    };

    let pointer_delta = if cursor_is_grabbed(&cursor) {
        action_state.axis_pair(&DriveAction::Look)
    } else {
        Vec2::ZERO
    };
    let input = FrameInput {
        held: sample_held_keys(action_state),
        pointer_delta,
    };

    let report = session.sandbox.step(&input, time.delta_secs());
    session.last_frame = report;
}

fn sync_vehicle_transform(
    session: Res<SandboxSession>,
    mut query: Query<&mut Transform, With<PlayerVehicle>>,
) {
    let vehicle = session.sandbox.vehicle();
    for mut transform in &mut query {
        transform.translation = vehicle.position;
        transform.rotation = vehicle.rotation();
    }
}

fn sync_camera_transform(
    session: Res<SandboxSession>,
    mut query: Query<&mut Transform, With<OrbitCamera>>,
) {
    let rig = session.sandbox.rig();
    for mut transform in &mut query {
        transform.translation = rig.camera_position();
        transform.rotation = rig.camera_rotation();
    }
}

fn sync_prop_transforms(
    session: Res<SandboxSession>,
    mut query: Query<(&PropIndex, &mut Transform)>,
) {
    let props = session.sandbox.props();
    for (index, mut transform) in &mut query {
        if let Some(prop) = props.get(index.0) {
            transform.translation = prop.position;
        }
    }
}
