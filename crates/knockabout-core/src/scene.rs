//! Placement descriptors for the starter driving world.
//!
//! The layout is data only: a ground plane, a ring of heavy perimeter
//! columns, concentric rings of mixed knockable props and a few distant
//! landmarks. Every non-plane placement becomes a dynamic prop.

use glam::Vec3;

/// Primitive shape of a placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Static ground; never simulated.
    Plane,
    Cube,
    Sphere,
}

/// Static description of one world object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementDescriptor {
    pub shape: ShapeKind,
    /// Palette name resolved by the host (unknown names render white).
    pub color_name: &'static str,
    /// Full extents along each axis.
    pub scale: Vec3,
    /// Center position.
    pub position: Vec3,
}

impl PlacementDescriptor {
    pub fn new(shape: ShapeKind, color_name: &'static str, scale: Vec3, position: Vec3) -> Self {
        Self {
            shape,
            color_name,
            scale,
            position,
        }
    }

    /// Whether this placement is ground rather than a dynamic prop.
    pub fn is_ground(&self) -> bool {
        self.shape == ShapeKind::Plane
    }
}

/// Half-size of the square ground plane.
pub const GROUND_HALF_EXTENT: f32 = 130.0;

const COLUMN_COLORS: [&str; 4] = ["cyan", "magenta", "yellow", "lime"];
const COLUMN_EDGE: f32 = 110.0;
const COLUMN_SCALE: Vec3 = Vec3::new(2.4, 6.2, 2.4);

const PROP_SHAPES: [ShapeKind; 2] = [ShapeKind::Cube, ShapeKind::Sphere];
const PROP_COLORS: [&str; 8] = [
    "red", "azure", "orange", "violet", "lime", "yellow", "cyan", "magenta",
];
const RING_RADII: [f32; 5] = [18.0, 34.0, 52.0, 72.0, 94.0];
const POINTS_PER_RING: usize = 14;

/// All placements for the starter scene, ground first.
pub fn starter_scene() -> Vec<PlacementDescriptor> {
    let mut placements = vec![PlacementDescriptor::new(
        ShapeKind::Plane,
        "light_gray",
        Vec3::new(GROUND_HALF_EXTENT * 2.0, 1.0, GROUND_HALF_EXTENT * 2.0),
        Vec3::ZERO,
    )];

    placements.extend(perimeter_columns());
    placements.extend(orbital_props());
    placements.extend(cardinal_landmarks());
    placements
}

/// Large boundary ring of heavy columns.
pub fn perimeter_columns() -> Vec<PlacementDescriptor> {
    let mut columns = Vec::new();
    let mut color_index = 0;

    for step in (-90..=90).step_by(18) {
        #[allow(clippy::cast_precision_loss)]
        let step = step as f32;
        for (x, z) in [
            (step, COLUMN_EDGE),
            (step, -COLUMN_EDGE),
            (COLUMN_EDGE, step),
            (-COLUMN_EDGE, step),
        ] {
            columns.push(PlacementDescriptor::new(
                ShapeKind::Cube,
                COLUMN_COLORS[color_index % COLUMN_COLORS.len()],
                COLUMN_SCALE,
                Vec3::new(x, COLUMN_SCALE.y * 0.5, z),
            ));
            color_index += 1;
        }
    }

    columns
}

/// Scale of an orbital prop; props grow with each outer ring.
#[allow(clippy::cast_precision_loss)]
pub fn orbital_prop_scale(shape: ShapeKind, ring_index: usize) -> Vec3 {
    let ring = ring_index as f32;
    match shape {
        ShapeKind::Sphere => Vec3::splat(1.1 + ring * 0.18),
        ShapeKind::Cube | ShapeKind::Plane => {
            Vec3::new(1.2 + ring * 0.16, 1.4 + ring * 0.28, 1.2 + ring * 0.16)
        }
    }
}

/// Concentric rings of mixed-shape dynamic props.
#[allow(clippy::cast_precision_loss)]
pub fn orbital_props() -> Vec<PlacementDescriptor> {
    let mut props = Vec::with_capacity(RING_RADII.len() * POINTS_PER_RING);

    for (ring_index, radius) in RING_RADII.iter().enumerate() {
        for point_index in 0..POINTS_PER_RING {
            let angle = (360.0 / POINTS_PER_RING as f32) * point_index as f32
                + ring_index as f32 * 8.0;
            let (sin, cos) = angle.to_radians().sin_cos();

            let shape = PROP_SHAPES[(ring_index + point_index) % PROP_SHAPES.len()];
            let color_name = PROP_COLORS[(ring_index * 3 + point_index) % PROP_COLORS.len()];
            let scale = orbital_prop_scale(shape, ring_index);

            props.push(PlacementDescriptor::new(
                shape,
                color_name,
                scale,
                Vec3::new(sin * radius, scale.y * 0.5, cos * radius),
            ));
        }
    }

    props
}

/// Distant large landmarks that emphasize world scale.
pub fn cardinal_landmarks() -> Vec<PlacementDescriptor> {
    let tower = Vec3::new(9.0, 16.0, 9.0);
    let globe = Vec3::splat(7.0);

    vec![
        PlacementDescriptor::new(ShapeKind::Cube, "orange", tower, Vec3::new(0.0, 8.0, 118.0)),
        PlacementDescriptor::new(ShapeKind::Cube, "azure", tower, Vec3::new(0.0, 8.0, -118.0)),
        PlacementDescriptor::new(ShapeKind::Cube, "yellow", tower, Vec3::new(118.0, 8.0, 0.0)),
        PlacementDescriptor::new(ShapeKind::Cube, "violet", tower, Vec3::new(-118.0, 8.0, 0.0)),
        PlacementDescriptor::new(ShapeKind::Sphere, "lime", globe, Vec3::new(82.0, 3.5, 82.0)),
        PlacementDescriptor::new(ShapeKind::Sphere, "magenta", globe, Vec3::new(-82.0, 3.5, 82.0)),
        PlacementDescriptor::new(ShapeKind::Sphere, "cyan", globe, Vec3::new(82.0, 3.5, -82.0)),
        PlacementDescriptor::new(ShapeKind::Sphere, "red", globe, Vec3::new(-82.0, 3.5, -82.0)),
    ]
}
