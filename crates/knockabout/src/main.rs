//! Third-person driving sandbox built on Bevy.
//!
//! Drive a low-poly car around a flat arena with an orbiting camera and
//! knock the scattered props about. The per-frame math lives in
//! `knockabout-core`; this binary owns the window, the entities and input.

mod input;
mod launch_params;
mod sandbox;
mod ui;
mod world;

use bevy::{prelude::*, window::WindowMode};
use knockabout_core::{Sandbox, starter_scene};

use input::InputPlugin;
use sandbox::{SandboxPlugin, SandboxSession};
use ui::OverlayUiPlugin;
use world::{ScenePlacements, WorldPlugin};

/// Plugin for the main application.
pub struct AppPlugin;

impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((InputPlugin, WorldPlugin, SandboxPlugin, OverlayUiPlugin));
    }
}

fn main() {
    // Initialize tracing for native platforms.
    #[cfg(not(target_family = "wasm"))]
    {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    // Initialize tracing for WASM (logs to browser console).
    #[cfg(target_family = "wasm")]
    {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    }

    let params = launch_params::parse();
    let placements = starter_scene();

    let sandbox = match Sandbox::new(params.settings.clone(), &placements) {
        Ok(sandbox) => sandbox,
        Err(err) => {
            tracing::error!("Invalid sandbox configuration: {err}");
            std::process::exit(1);
        }
    };

    let mut app = App::new();

    let mut window = Window {
        title: params.title.clone(),
        resolution: (1920, 1080).into(),
        position: WindowPosition::Centered(MonitorSelection::Primary),
        decorations: !params.borderless,
        ..Default::default()
    };
    if params.fullscreen {
        window.mode = WindowMode::BorderlessFullscreen(MonitorSelection::Primary);
    }

    // WASM: Fit canvas to parent element and prevent browser event handling.
    #[cfg(target_family = "wasm")]
    {
        window.fit_canvas_to_parent = true;
        window.prevent_default_event_handling = true;
    }

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(window),
        ..Default::default()
    }));

    app.insert_resource(SandboxSession::new(sandbox))
        .insert_resource(ScenePlacements(placements))
        .add_plugins(AppPlugin)
        .run();
}
