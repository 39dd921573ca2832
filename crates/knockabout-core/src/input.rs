//! Input sampling: held keys and pointer motion to per-frame control axes.

use std::collections::HashMap;

use glam::Vec2;

/// Logical driving inputs. The host decides which physical keys map here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DriveKey {
    /// Drive forward.
    Up,
    /// Drive backward.
    Down,
    /// Strafe left.
    Left,
    /// Strafe right.
    Right,
    /// Turn counter-clockwise (seen from above).
    TurnLeft,
    /// Turn clockwise (seen from above).
    TurnRight,
}

/// Held amount per driving key, typically `1.0` while pressed.
///
/// Keys that are absent read as `0.0`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeldKeys {
    amounts: HashMap<DriveKey, f32>,
}

impl HeldKeys {
    /// An empty mapping (nothing held).
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key` as held by `amount`.
    pub fn hold(&mut self, key: DriveKey, amount: f32) {
        self.amounts.insert(key, amount);
    }

    /// Builder form of [`HeldKeys::hold`].
    #[must_use]
    pub fn with(mut self, key: DriveKey, amount: f32) -> Self {
        self.hold(key, amount);
        self
    }

    /// Held amount for `key`, `0.0` when absent.
    pub fn amount(&self, key: DriveKey) -> f32 {
        self.amounts.get(&key).copied().unwrap_or(0.0)
    }
}

impl FromIterator<(DriveKey, f32)> for HeldKeys {
    fn from_iter<I: IntoIterator<Item = (DriveKey, f32)>>(iter: I) -> Self {
        Self {
            amounts: iter.into_iter().collect(),
        }
    }
}

/// Per-frame control axes derived from held keys.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlAxes {
    /// Positive drives forward.
    pub forward: f32,
    /// Positive strafes right.
    pub strafe: f32,
    /// Positive turns clockwise.
    pub turn: f32,
}

/// Compute movement axes from the current held-key mapping.
///
/// Each axis is the difference of two held amounts; no further clamping.
pub fn compute_keyboard_axes(held: &HeldKeys) -> ControlAxes {
    ControlAxes {
        forward: held.amount(DriveKey::Up) - held.amount(DriveKey::Down),
        strafe: held.amount(DriveKey::Right) - held.amount(DriveKey::Left),
        turn: held.amount(DriveKey::TurnRight) - held.amount(DriveKey::TurnLeft),
    }
}

/// Direction of one discrete scroll event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Wheel up: move the camera closer.
    In,
    /// Wheel down: move the camera away.
    Out,
}

impl ScrollDirection {
    /// `+1` for [`ScrollDirection::In`], `-1` for [`ScrollDirection::Out`].
    pub fn sign(self) -> f32 {
        match self {
            ScrollDirection::In => 1.0,
            ScrollDirection::Out => -1.0,
        }
    }
}

/// Everything the input collaborator provides for one frame.
#[derive(Clone, Debug, Default)]
pub struct FrameInput {
    /// Currently held driving keys.
    pub held: HeldKeys,
    /// Raw pointer motion accumulated this frame.
    pub pointer_delta: Vec2,
}
