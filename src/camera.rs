//! Free-flying survey camera.
//!
//! WASD moves in the look-direction's ground plane, the mouse looks around,
//! Q/E and scroll adjust altitude, Shift sprints. Writes xz to
//! [`ViewerPos`](crate::ViewerPos); terrain writes the y the camera lerps
//! toward, so flying over a cliff rides the surface instead of clipping it.

mod entities;
mod systems;

pub use entities::TerrainCamera;

use bevy::prelude::*;

use crate::GameState;

/// Per-plugin configuration for the survey camera.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct CameraConfig {
    /// WASD movement speed in world-units per second.
    pub move_speed: f32,
    /// Speed multiplier while Shift is held.
    pub sprint_multiplier: f32,
    /// Horizontal mouse sensitivity (radians per pixel).
    pub mouse_sensitivity_x: f32,
    /// Vertical mouse sensitivity (radians per pixel).
    pub mouse_sensitivity_y: f32,
    /// Margin from vertical to prevent camera flip (radians).
    pub pitch_margin: f32,
    /// Altitude change per scroll line.
    pub scroll_sensitivity: f32,
    /// Pixel margin from window edge that triggers cursor recentering.
    pub edge_margin: f32,
    /// Height lerp factor for smooth camera Y transitions.
    pub height_lerp: f32,
    /// Initial altitude above the origin tile when spawning.
    pub spawn_altitude: f32,
    /// Bloom post-processing intensity.
    pub bloom_intensity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            move_speed: 12.0,
            sprint_multiplier: 3.0,
            mouse_sensitivity_x: 0.003,
            mouse_sensitivity_y: 0.002,
            pitch_margin: 0.05,
            scroll_sensitivity: 2.0,
            edge_margin: 100.0,
            height_lerp: 0.12,
            spawn_altitude: 18.0,
            bloom_intensity: 0.15,
        }
    }
}

/// Survey camera plugin: spawning, cursor capture, and flight controls.
pub struct CameraPlugin(pub CameraConfig);

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<TerrainCamera>()
            .register_type::<CameraConfig>()
            .insert_resource(self.0.clone())
            .init_resource::<entities::CursorRecentered>()
            .add_systems(Startup, (systems::spawn_camera, systems::capture_cursor))
            .add_systems(
                Update,
                systems::recenter_cursor.run_if(in_state(GameState::Running)),
            )
            .add_systems(
                Update,
                systems::fly
                    .after(systems::recenter_cursor)
                    .run_if(in_state(GameState::Running)),
            );
    }
}
