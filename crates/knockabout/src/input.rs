//! Input action definitions and cursor management.
//!
//! Driving and look inputs are declared with `leafwing-input-manager` and
//! sampled into the core's [`HeldKeys`] once per frame. Mouse wheel zoom is
//! read from raw wheel messages so that pixel and line units can be
//! normalized and accumulated into whole notches.

use bevy::{
    input::mouse::MouseScrollUnit,
    prelude::*,
    window::{CursorGrabMode, CursorOptions, PrimaryWindow},
};
use bevy_egui::EguiContexts;
use knockabout_core::{DriveKey, HeldKeys, ScrollDirection};
use leafwing_input_manager::{plugin::InputManagerSystem, prelude::*};

/// Wheel pixels per line on platforms that report pixels.
const PIXELS_PER_LINE: f32 = 120.0;

// ============================================================================
// Actions
// ============================================================================

/// Player actions for driving the vehicle and orbiting the camera.
#[derive(Actionlike, PartialEq, Eq, Hash, Clone, Copy, Debug, Reflect)]
pub enum DriveAction {
    /// Drive forward (up arrow).
    Forward,
    /// Drive backward (down arrow).
    Backward,
    /// Strafe left (left arrow).
    StrafeLeft,
    /// Strafe right (right arrow).
    StrafeRight,
    /// Turn counter-clockwise (page up).
    TurnLeft,
    /// Turn clockwise (page down).
    TurnRight,
    /// Mouse look (yaw/pitch).
    #[actionlike(DualAxis)]
    Look,
    /// Grab cursor (left click when ungrabbed).
    GrabCursor,
    /// Release cursor (ESC).
    ReleaseCursor,
}

impl DriveAction {
    /// The core driving key this action holds, if any.
    pub fn drive_key(self) -> Option<DriveKey> {
        match self {
            Self::Forward => Some(DriveKey::Up),
            Self::Backward => Some(DriveKey::Down),
            Self::StrafeLeft => Some(DriveKey::Left),
            Self::StrafeRight => Some(DriveKey::Right),
            Self::TurnLeft => Some(DriveKey::TurnLeft),
            Self::TurnRight => Some(DriveKey::TurnRight),
            Self::Look | Self::GrabCursor | Self::ReleaseCursor => None,
        }
    }
}

/// Actions that only make sense while the cursor is captured.
const GAMEPLAY_ACTIONS: &[DriveAction] = &[
    DriveAction::Forward,
    DriveAction::Backward,
    DriveAction::StrafeLeft,
    DriveAction::StrafeRight,
    DriveAction::TurnLeft,
    DriveAction::TurnRight,
    DriveAction::Look,
];

/// Keyboard-bound actions, disabled while egui has keyboard focus.
const KEYBOARD_ACTIONS: &[DriveAction] = &[
    DriveAction::Forward,
    DriveAction::Backward,
    DriveAction::StrafeLeft,
    DriveAction::StrafeRight,
    DriveAction::TurnLeft,
    DriveAction::TurnRight,
];

/// Create the default input map for driving.
pub fn default_drive_input_map() -> InputMap<DriveAction> {
    InputMap::default()
        .with(DriveAction::Forward, KeyCode::ArrowUp)
        .with(DriveAction::Backward, KeyCode::ArrowDown)
        .with(DriveAction::StrafeLeft, KeyCode::ArrowLeft)
        .with(DriveAction::StrafeRight, KeyCode::ArrowRight)
        .with(DriveAction::TurnLeft, KeyCode::PageUp)
        .with(DriveAction::TurnRight, KeyCode::PageDown)
        .with_dual_axis(DriveAction::Look, MouseMove::default())
        .with(DriveAction::GrabCursor, MouseButton::Left)
        .with(DriveAction::ReleaseCursor, KeyCode::Escape)
}

/// Held amount (`1.0`) for every pressed driving action.
pub fn sample_held_keys(action_state: &ActionState<DriveAction>) -> HeldKeys {
    GAMEPLAY_ACTIONS
        .iter()
        .filter(|action| action_state.pressed(action))
        .filter_map(|action| action.drive_key())
        .map(|key| (key, 1.0))
        .collect()
}

// ============================================================================
// Plugin
// ============================================================================

/// Plugin that registers the driving actions and the input focus system.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputManagerPlugin::<DriveAction>::default())
            .init_resource::<ScrollAccumulator>()
            .add_systems(Startup, grab_cursor_on_startup)
            .add_systems(
                PreUpdate,
                manage_input_focus.after(InputManagerSystem::Update),
            );
    }
}

// ============================================================================
// Scroll
// ============================================================================

/// Normalize a wheel delta to lines: web reports pixels, native reports lines.
pub fn scroll_lines(unit: MouseScrollUnit, y: f32) -> f32 {
    match unit {
        MouseScrollUnit::Line => y,
        MouseScrollUnit::Pixel => y / PIXELS_PER_LINE,
    }
}

/// Fractional wheel travel not yet turned into zoom events.
#[derive(Resource, Default, Debug)]
pub struct ScrollAccumulator {
    lines: f32,
}

impl ScrollAccumulator {
    /// Add `lines` of wheel travel and return one event per whole line.
    ///
    /// Wheel up (positive) zooms in; the sub-line remainder carries over.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn accumulate(&mut self, lines: f32) -> Vec<ScrollDirection> {
        if !lines.is_finite() {
            return Vec::new();
        }
        self.lines += lines;
        let whole = self.lines.trunc();
        self.lines -= whole;

        let direction = if whole > 0.0 {
            ScrollDirection::In
        } else {
            ScrollDirection::Out
        };
        vec![direction; whole.abs() as usize]
    }

    /// Drop any partial notch.
    pub fn clear(&mut self) {
        self.lines = 0.0;
    }
}

// ============================================================================
// Cursor grab
// ============================================================================

/// Whether the cursor is captured for look and zoom.
pub fn cursor_is_grabbed(cursor: &CursorOptions) -> bool {
    matches!(
        cursor.grab_mode,
        CursorGrabMode::Locked | CursorGrabMode::Confined
    )
}

/// Set cursor grab state, centering the cursor when grabbing.
pub fn set_cursor_grab(cursor: &mut CursorOptions, window: &mut Window, grabbed: bool) {
    if grabbed {
        // Browsers do not support Locked.
        #[cfg(not(target_family = "wasm"))]
        {
            cursor.grab_mode = CursorGrabMode::Locked;
        }
        #[cfg(target_family = "wasm")]
        {
            cursor.grab_mode = CursorGrabMode::Confined;
        }
        cursor.visible = false;
        let center = Vec2::new(window.width() / 2.0, window.height() / 2.0);
        window.set_cursor_position(Some(center));
    } else {
        cursor.grab_mode = CursorGrabMode::None;
        cursor.visible = true;
    }
}

/// Capture the mouse for look controls as soon as the window exists.
fn grab_cursor_on_startup(
    mut cursor: Single<&mut CursorOptions>,
    mut window: Single<&mut Window, With<PrimaryWindow>>,
) {
    set_cursor_grab(&mut cursor, &mut window, true);
}

/// Handle cursor grab/ungrab with ESC and left-click.
pub fn cursor_grab_system(
    action_query: Query<&ActionState<DriveAction>>,
    mut cursor: Single<&mut CursorOptions>,
    mut window: Single<&mut Window, With<PrimaryWindow>>,
    mut scroll: ResMut<ScrollAccumulator>,
    mut contexts: EguiContexts,
) {
    let Ok(action_state) = action_query.single() else {
        return;
    };

    if action_state.just_pressed(&DriveAction::ReleaseCursor) {
        set_cursor_grab(&mut cursor, &mut window, false);
        scroll.clear();
        return;
    }

    if action_state.just_pressed(&DriveAction::GrabCursor) {
        // Clicks on the overlay stay with the overlay.
        let egui_wants_pointer = contexts
            .ctx_mut()
            .ok()
            .is_some_and(|ctx| ctx.is_pointer_over_area());

        if !egui_wants_pointer {
            set_cursor_grab(&mut cursor, &mut window, true);
        }
    }
}

// ============================================================================
// Input focus management
// ============================================================================

fn set_actions(
    action_state: &mut ActionState<DriveAction>,
    actions: &[DriveAction],
    enabled: bool,
) {
    for action in actions {
        if enabled {
            action_state.enable_action(action);
        } else {
            action_state.disable_action(action);
        }
    }
}

/// Manage input focus based on overlay state and cursor grab.
///
/// Gameplay actions only run while the cursor is grabbed; keyboard driving
/// pauses while egui wants the keyboard.
fn manage_input_focus(
    mut action_query: Query<&mut ActionState<DriveAction>>,
    mut contexts: EguiContexts,
    cursor: Single<&CursorOptions>,
) {
    let egui_wants_kb = contexts
        .ctx_mut()
        .ok()
        .is_some_and(|ctx| ctx.wants_keyboard_input());
    let is_grabbed = cursor_is_grabbed(&cursor);

    for mut action_state in &mut action_query {
        if !is_grabbed {
            set_actions(&mut action_state, GAMEPLAY_ACTIONS, false);
            action_state.enable_action(&DriveAction::GrabCursor);
            action_state.disable_action(&DriveAction::ReleaseCursor);
        } else {
            set_actions(&mut action_state, GAMEPLAY_ACTIONS, true);
            if egui_wants_kb {
                set_actions(&mut action_state, KEYBOARD_ACTIONS, false);
            }
            action_state.disable_action(&DriveAction::GrabCursor);
            action_state.enable_action(&DriveAction::ReleaseCursor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_lines_normalizes_pixels() {
        assert_eq!(scroll_lines(MouseScrollUnit::Line, 2.0), 2.0);
        assert_eq!(scroll_lines(MouseScrollUnit::Pixel, 240.0), 2.0);
        assert_eq!(scroll_lines(MouseScrollUnit::Pixel, -60.0), -0.5);
    }

    #[test]
    fn test_accumulator_emits_one_event_per_line() {
        let mut scroll = ScrollAccumulator::default();
        assert_eq!(
            scroll.accumulate(2.0),
            vec![ScrollDirection::In, ScrollDirection::In]
        );
        assert_eq!(scroll.accumulate(-1.0), vec![ScrollDirection::Out]);
    }

    #[test]
    fn test_accumulator_carries_partial_lines() {
        let mut scroll = ScrollAccumulator::default();
        assert!(scroll.accumulate(0.5).is_empty());
        assert!(scroll.accumulate(0.25).is_empty());
        assert_eq!(scroll.accumulate(0.25), vec![ScrollDirection::In]);
        assert!(scroll.accumulate(0.0).is_empty());
    }

    #[test]
    fn test_accumulator_clear_drops_partial_notch() {
        let mut scroll = ScrollAccumulator::default();
        assert!(scroll.accumulate(-0.75).is_empty());
        scroll.clear();
        assert!(scroll.accumulate(-0.5).is_empty());
    }

    #[test]
    fn test_accumulator_ignores_non_finite() {
        let mut scroll = ScrollAccumulator::default();
        assert!(scroll.accumulate(f32::NAN).is_empty());
        assert_eq!(scroll.accumulate(1.0), vec![ScrollDirection::In]);
    }

    #[test]
    fn test_drive_keys_cover_driving_actions_only() {
        let keys: Vec<_> = KEYBOARD_ACTIONS
            .iter()
            .filter_map(|action| action.drive_key())
            .collect();
        assert_eq!(keys.len(), KEYBOARD_ACTIONS.len());
        assert_eq!(DriveAction::Look.drive_key(), None);
        assert_eq!(DriveAction::GrabCursor.drive_key(), None);
    }

    #[test]
    fn test_sample_held_keys_reads_pressed_actions() {
        let mut action_state = ActionState::<DriveAction>::default();
        action_state.press(&DriveAction::Forward);
        action_state.press(&DriveAction::TurnRight);

        let held = sample_held_keys(&action_state);
        assert_eq!(held.amount(DriveKey::Up), 1.0);
        assert_eq!(held.amount(DriveKey::TurnRight), 1.0);
        assert_eq!(held.amount(DriveKey::Down), 0.0);
        assert_eq!(held.amount(DriveKey::Left), 0.0);
    }
}
