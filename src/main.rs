#![warn(missing_docs)]
//! Procedural hex-continent viewer.
//!
//! Grows a random landmass on a hexagonal lattice, floods it with integer
//! elevations, smooths the result, and renders the map as colored hex
//! prisms with cliff walls. R regenerates, Tab toggles the inspector.

mod camera;
pub mod mapgen;
pub mod math;
mod terrain;

use bevy::app::AppExit;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions};
use bevy_inspector_egui::quick::WorldInspectorPlugin;

/// Application-wide game state, used for system scheduling.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum GameState {
    /// Normal flight + terrain interaction.
    #[default]
    Running,
    /// Debug overlay active (Tab to toggle).
    Debugging,
}

/// Viewer world position. Camera writes xz + altitude; terrain writes y.
#[derive(Resource, Default, Reflect)]
pub struct ViewerPos {
    /// Final world position (terrain sets `.y`).
    pub pos: Vec3,
    /// User-controlled vertical offset (Q/E/scroll).
    pub altitude: f32,
}

/// Command-line overrides for map generation.
#[cfg(feature = "native")]
#[derive(clap::Parser)]
#[command(about = "Procedural hex-continent viewer")]
struct Cli {
    /// Seed for the first generated map (random when omitted).
    #[arg(long)]
    seed: Option<u64>,
    /// Landmass size override in tiles.
    #[arg(long)]
    tiles: Option<u32>,
    /// Avoider count override.
    #[arg(long)]
    avoiders: Option<u32>,
}

fn main() {
    #[allow(unused_mut)]
    let mut terrain_cfg = terrain::TerrainConfig::default();

    #[cfg(feature = "native")]
    {
        use clap::Parser;
        let cli = Cli::parse();
        terrain_cfg.map.seed = cli.seed;
        terrain_cfg.map.tile_count = cli.tiles;
        terrain_cfg.map.avoider_count = cli.avoiders;
    }

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Hex Continent".into(),
            ..default()
        }),
        ..default()
    }))
    .register_type::<GameState>()
    .register_type::<ViewerPos>()
    .init_state::<GameState>()
    .init_resource::<ViewerPos>()
    .add_plugins(bevy_egui::EguiPlugin::default())
    .add_plugins(terrain::TerrainPlugin(terrain_cfg))
    .add_plugins(camera::CameraPlugin(camera::CameraConfig::default()))
    .add_systems(Update, exit_on_esc)
    .add_systems(Update, toggle_inspector)
    .add_plugins(WorldInspectorPlugin::new().run_if(in_state(GameState::Debugging)));

    app.run();
}

fn toggle_inspector(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
    mut windows: Query<(&mut CursorOptions, &mut Window)>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        let new_state = match state.get() {
            GameState::Running => GameState::Debugging,
            GameState::Debugging => GameState::Running,
        };
        let entering_debug = new_state == GameState::Debugging;
        next.set(new_state);
        for (mut opts, mut window) in &mut windows {
            if entering_debug {
                opts.visible = true;
                opts.grab_mode = CursorGrabMode::None;
            } else {
                opts.visible = false;
                opts.grab_mode = CursorGrabMode::Confined;
                let center = Vec2::new(window.width() / 2.0, window.height() / 2.0);
                window.set_cursor_position(Some(center));
            }
        }
    }
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
