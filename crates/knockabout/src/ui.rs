//! Overlay with the controls hint and live session readouts.

use bevy::{prelude::*, window::CursorOptions};
use bevy_egui::{EguiContexts, EguiPlugin, EguiPrimaryContextPass, egui};

use crate::{input::cursor_is_grabbed, sandbox::SandboxSession};

const CONTROLS_HINT: &str = "Move: arrow keys (forward/back + strafe)\n\
     Turn: page up/down + mouse (captured)\n\
     Zoom: mouse wheel\n\
     Release mouse: Esc, recapture: click";

/// Plugin for the egui overlay.
pub struct OverlayUiPlugin;

impl Plugin for OverlayUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin::default())
            .add_systems(EguiPrimaryContextPass, overlay_ui_system);
    }
}

/// Render the overlay window.
fn overlay_ui_system(
    mut contexts: EguiContexts,
    session: Res<SandboxSession>,
    cursor: Single<&CursorOptions>,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    let sandbox = session.sandbox();
    let frame = session.last_frame();
    let physics = &sandbox.settings().physics;

    egui::Window::new("Knockabout")
        .default_pos([10.0, 10.0])
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(CONTROLS_HINT);
            ui.separator();

            let vehicle = sandbox.vehicle();
            ui.label(format!("Speed: {:.1} m/s", frame.vehicle_speed()));
            ui.label(format!("Heading: {:.0}°", vehicle.yaw.rem_euclid(360.0)));

            let orbit = sandbox.orbit();
            ui.label(format!(
                "Camera: yaw {:.0}°, pitch {:.0}°",
                orbit.yaw.rem_euclid(360.0),
                orbit.pitch
            ));
            ui.label(format!("Zoom: {:.1}", orbit.distance));

            let airborne = sandbox
                .props()
                .iter()
                .filter(|prop| !prop.is_resting(physics))
                .count();
            ui.label(format!("Impacts this frame: {}", frame.impacts));
            ui.label(format!("Props airborne: {airborne}"));

            if !cursor_is_grabbed(&cursor) {
                ui.separator();
                ui.label("Click the view to capture the mouse");
            }
        });

    Ok(())
}
