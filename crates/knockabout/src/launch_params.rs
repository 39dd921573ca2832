//! Launch parameter parsing for the sandbox.
//!
//! On native, parameters are parsed from command-line arguments using clap.
//! On WASM, defaults are used (CLI argument parsing is not available).
//!
//! Flags only override the tuning they name; everything else keeps the
//! defaults from [`SandboxSettings`]. Validation happens later, when the
//! session is built.

use knockabout_core::SandboxSettings;

/// Default window title.
const DEFAULT_TITLE: &str = "knockabout";

/// Launch parameters for the sandbox.
#[derive(Debug, Clone)]
pub struct LaunchParams {
    /// Simulation tuning handed to the session.
    pub settings: SandboxSettings,
    /// Window title.
    pub title: String,
    /// Remove window decorations.
    pub borderless: bool,
    /// Start in borderless fullscreen on the primary monitor.
    pub fullscreen: bool,
}

impl Default for LaunchParams {
    fn default() -> Self {
        Self {
            settings: SandboxSettings::default(),
            title: DEFAULT_TITLE.to_string(),
            borderless: false,
            fullscreen: false,
        }
    }
}

#[cfg(not(target_family = "wasm"))]
mod native {
    use clap::Parser;

    use super::*;

    #[derive(Parser, Debug)]
    #[command(about = "Third-person driving sandbox with knockable props")]
    pub(super) struct CliArgs {
        /// Vehicle translation speed in units per second.
        #[arg(long)]
        move_speed: Option<f32>,

        /// Vehicle turn rate in degrees per second.
        #[arg(long)]
        turn_speed: Option<f32>,

        /// Camera look speed in degrees per pixel of mouse motion.
        #[arg(long)]
        look_speed: Option<f32>,

        /// Starting camera distance behind the vehicle.
        #[arg(long)]
        camera_distance: Option<f32>,

        /// Closest zoom distance.
        #[arg(long)]
        min_zoom: Option<f32>,

        /// Farthest zoom distance.
        #[arg(long, conflicts_with = "unbounded_zoom")]
        max_zoom: Option<f32>,

        /// Allow zooming out without limit.
        #[arg(long)]
        unbounded_zoom: bool,

        /// Distance change per mouse wheel notch.
        #[arg(long)]
        zoom_step: Option<f32>,

        /// Height of the orbit pivot above the vehicle.
        #[arg(long)]
        camera_height: Option<f32>,

        /// Symmetric pitch bound in degrees (at most 90).
        #[arg(long)]
        pitch_limit: Option<f32>,

        /// Window title.
        #[arg(long, default_value = DEFAULT_TITLE)]
        title: String,

        /// Remove window decorations.
        #[arg(long)]
        borderless: bool,

        /// Start in borderless fullscreen.
        #[arg(long)]
        fullscreen: bool,
    }

    impl CliArgs {
        pub(super) fn into_params(self) -> LaunchParams {
            let mut settings = SandboxSettings::default();

            let movement = &mut settings.movement;
            if let Some(speed) = self.move_speed {
                movement.move_speed = speed;
            }
            if let Some(speed) = self.turn_speed {
                movement.turn_speed = speed;
            }

            let camera = &mut settings.camera;
            if let Some(speed) = self.look_speed {
                camera.mouse_look_speed = speed;
            }
            if let Some(distance) = self.camera_distance {
                camera.distance = distance;
            }
            if let Some(min) = self.min_zoom {
                camera.min_distance = min;
            }
            if self.unbounded_zoom {
                camera.max_distance = None;
            } else if let Some(max) = self.max_zoom {
                camera.max_distance = Some(max);
            }
            if let Some(step) = self.zoom_step {
                camera.zoom_step = step;
            }
            if let Some(height) = self.camera_height {
                camera.height = height;
            }
            if let Some(limit) = self.pitch_limit {
                camera.pitch_min = -limit;
                camera.pitch_max = limit;
            }

            LaunchParams {
                settings,
                title: self.title,
                borderless: self.borderless,
                fullscreen: self.fullscreen,
            }
        }
    }

    pub fn parse() -> LaunchParams {
        CliArgs::parse().into_params()
    }
}

/// Parse launch parameters from CLI args (native) or use defaults (WASM).
pub fn parse() -> LaunchParams {
    #[cfg(not(target_family = "wasm"))]
    {
        native::parse()
    }
    #[cfg(target_family = "wasm")]
    {
        LaunchParams::default()
    }
}
