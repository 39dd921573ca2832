//! Per-frame simulation for a third-person driving sandbox.
//!
//! This crate owns everything about a sandbox frame that does not need a
//! renderer: turning held keys into control axes, integrating the vehicle,
//! orbiting the camera around it and knocking props about when the vehicle
//! drives through them. The host application feeds it input once per frame
//! and copies the resulting transforms onto its scene.
//!
//! # Design principles
//!
//! - **Engine-agnostic**: Only `glam` math; no ECS, windowing or GPU types
//! - **Deterministic**: Same input sequence and `dt` always give the same state
//! - **Validated up front**: Settings are checked once when a session starts
//!
//! # Example
//!
//! ```ignore
//! use knockabout_core::{DriveKey, FrameInput, HeldKeys, Sandbox, SandboxSettings, starter_scene};
//!
//! let mut sandbox = Sandbox::new(SandboxSettings::default(), &starter_scene())?;
//! let input = FrameInput {
//!     held: HeldKeys::new().with(DriveKey::Up, 1.0),
//!     ..Default::default()
//! };
//! let report = sandbox.step(&input, 1.0 / 60.0);
//! ```

mod error;
pub mod input;
pub mod orbit;
pub mod props;
pub mod scene;
mod session;
pub mod settings;
pub mod vehicle;

pub use error::{ConfigError, Result};
pub use input::{ControlAxes, DriveKey, FrameInput, HeldKeys, ScrollDirection};
pub use orbit::{OrbitRig, OrbitState};
pub use props::{DynamicProp, PropField};
pub use scene::{PlacementDescriptor, ShapeKind, starter_scene};
pub use session::{FrameReport, Sandbox};
pub use settings::{
    CameraSettings, MovementSettings, PitchLimits, PropPhysicsSettings, SandboxSettings,
    SpawnPoint,
};
pub use vehicle::VehicleBody;
