//! World construction: sky, lights, scene placements, the car and the camera.
//!
//! Entities are spawned once at startup from placement descriptors. Their
//! transforms are owned by the session afterwards; see [`crate::sandbox`].

use std::collections::HashMap;

use bevy::prelude::*;
use knockabout_core::{PlacementDescriptor, ShapeKind};
use leafwing_input_manager::prelude::*;

use crate::{
    input::{DriveAction, default_drive_input_map},
    sandbox::{OrbitCamera, PlayerVehicle, PropIndex, SandboxSession},
};

/// Clear color standing in for the sky.
const SKY_COLOR: Color = Color::srgb(0.53, 0.75, 0.95);

/// Illuminance of the shadow-casting key light.
const KEY_LIGHT_LUX: f32 = 10_000.0;
/// Illuminance of the soft fill light.
const FILL_LIGHT_LUX: f32 = 3_300.0;

/// Base tint lifting the unlit sides of props off black.
const AMBIENT_COLOR: Color = Color::srgb(0.22, 0.24, 0.28);
/// Ambient brightness in cd/m².
const AMBIENT_BRIGHTNESS: f32 = 400.0;

/// Placements the world is built from, in session prop order.
#[derive(Resource, Debug, Clone)]
pub struct ScenePlacements(pub Vec<PlacementDescriptor>);

/// Plugin that spawns the static world at startup.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(SKY_COLOR))
            .insert_resource(ambient_light())
            .add_systems(
                Startup,
                (spawn_lights, spawn_placements, spawn_vehicle, spawn_camera),
            );
    }
}

// ============================================================================
// Colors and meshes
// ============================================================================

/// Resolve a palette name to a color; unknown names render white.
pub fn resolve_color(name: &str) -> Color {
    match name {
        "red" => Color::srgb(1.0, 0.0, 0.0),
        "orange" => Color::srgb(1.0, 0.5, 0.0),
        "yellow" => Color::srgb(1.0, 1.0, 0.0),
        "lime" => Color::srgb(0.5, 1.0, 0.0),
        "cyan" => Color::srgb(0.0, 1.0, 1.0),
        "azure" => Color::srgb(0.0, 0.5, 1.0),
        "violet" => Color::srgb(0.5, 0.0, 1.0),
        "magenta" => Color::srgb(1.0, 0.0, 1.0),
        "light_gray" => Color::srgb(0.75, 0.75, 0.75),
        "black" => Color::BLACK,
        _ => Color::WHITE,
    }
}

/// Unit meshes shared by every placement; size comes from the transform scale.
struct ShapeMeshes {
    plane: Handle<Mesh>,
    cube: Handle<Mesh>,
    sphere: Handle<Mesh>,
}

impl ShapeMeshes {
    fn new(meshes: &mut Assets<Mesh>) -> Self {
        Self {
            plane: meshes.add(Plane3d::default().mesh().size(1.0, 1.0)),
            cube: meshes.add(Cuboid::from_length(1.0)),
            sphere: meshes.add(Sphere::new(0.5)),
        }
    }

    fn get(&self, shape: ShapeKind) -> Handle<Mesh> {
        match shape {
            ShapeKind::Plane => self.plane.clone(),
            ShapeKind::Cube => self.cube.clone(),
            ShapeKind::Sphere => self.sphere.clone(),
        }
    }
}

/// One lit material per palette name.
struct Palette<'a> {
    materials: &'a mut Assets<StandardMaterial>,
    cache: HashMap<&'static str, Handle<StandardMaterial>>,
}

impl<'a> Palette<'a> {
    fn new(materials: &'a mut Assets<StandardMaterial>) -> Self {
        Self {
            materials,
            cache: HashMap::new(),
        }
    }

    fn get(&mut self, name: &'static str) -> Handle<StandardMaterial> {
        self.cache
            .entry(name)
            .or_insert_with(|| {
                self.materials.add(StandardMaterial {
                    base_color: resolve_color(name),
                    perceptual_roughness: 0.8,
                    ..default()
                })
            })
            .clone()
    }
}

/// Local transform for a placement: unit mesh scaled to its extents.
pub fn placement_transform(placement: &PlacementDescriptor) -> Transform {
    Transform::from_translation(placement.position).with_scale(placement.scale)
}

// ============================================================================
// Car model
// ============================================================================

/// Parts of the low-poly car, relative to the vehicle origin.
///
/// The car faces `-Z`: the red marker sits on the nose.
pub fn car_model() -> Vec<PlacementDescriptor> {
    let mut parts = vec![
        PlacementDescriptor::new(
            ShapeKind::Cube,
            "orange",
            Vec3::new(1.8, 0.4, 3.2),
            Vec3::ZERO,
        ),
        PlacementDescriptor::new(
            ShapeKind::Cube,
            "azure",
            Vec3::new(1.3, 0.45, 1.4),
            Vec3::new(0.0, 0.42, 0.2),
        ),
        PlacementDescriptor::new(
            ShapeKind::Cube,
            "red",
            Vec3::new(0.35, 0.2, 0.25),
            Vec3::new(0.0, 0.12, -1.55),
        ),
    ];

    for x in [-0.85, 0.85] {
        for z in [-1.1, 1.1] {
            parts.push(PlacementDescriptor::new(
                ShapeKind::Sphere,
                "black",
                Vec3::splat(0.42),
                Vec3::new(x, -0.18, z),
            ));
        }
    }

    parts
}

// ============================================================================
// Startup systems
// ============================================================================

/// Key light with shadows plus a dimmer fill from the opposite side.
fn spawn_lights(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: KEY_LIGHT_LUX,
            shadows_enabled: true,
            ..default()
        },
        Transform::default().looking_to(Vec3::new(1.0, -1.0, -0.7), Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: FILL_LIGHT_LUX,
            shadows_enabled: false,
            ..default()
        },
        Transform::default().looking_to(Vec3::new(-0.6, -0.4, 0.8), Vec3::Y),
    ));
}

/// Spawn the ground and one entity per simulated prop.
fn spawn_placements(
    mut commands: Commands,
    placements: Res<ScenePlacements>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let shapes = ShapeMeshes::new(&mut meshes);
    let mut palette = Palette::new(&mut materials);
    let mut prop_count = 0;

    for placement in &placements.0 {
        let mut entity = commands.spawn((
            Mesh3d(shapes.get(placement.shape)),
            MeshMaterial3d(palette.get(placement.color_name)),
            placement_transform(placement),
        ));

        // Props are indexed in placement order, skipping the ground.
        if !placement.is_ground() {
            entity.insert(PropIndex(prop_count));
            prop_count += 1;
        }
    }

    tracing::info!(
        placements = placements.0.len(),
        props = prop_count,
        "World setup complete"
    );
}

/// Spawn the player car with its input map.
fn spawn_vehicle(
    mut commands: Commands,
    session: Res<SandboxSession>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let shapes = ShapeMeshes::new(&mut meshes);
    let mut palette = Palette::new(&mut materials);
    let vehicle = session.sandbox().vehicle();

    commands
        .spawn((
            PlayerVehicle,
            Transform::from_translation(vehicle.position).with_rotation(vehicle.rotation()),
            Visibility::default(),
            default_drive_input_map(),
            ActionState::<DriveAction>::default(),
        ))
        .with_children(|parent| {
            for part in car_model() {
                parent.spawn((
                    Mesh3d(shapes.get(part.shape)),
                    MeshMaterial3d(palette.get(part.color_name)),
                    placement_transform(&part),
                ));
            }
        });

    tracing::info!(
        "Vehicle ready - arrows to drive, page up/down to turn, mouse to look, wheel to zoom"
    );
}

/// Spawn the camera at the session's initial rig pose.
fn spawn_camera(mut commands: Commands, session: Res<SandboxSession>) {
    let rig = session.sandbox().rig();
    commands.spawn((
        Camera3d::default(),
        OrbitCamera,
        Transform::from_translation(rig.camera_position()).with_rotation(rig.camera_rotation()),
    ));
}

/// Scene-wide ambient term under the key and fill lights.
fn ambient_light() -> GlobalAmbientLight {
    GlobalAmbientLight {
        color: AMBIENT_COLOR,
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    }
}
