//! Continent terrain: map generation at startup, prism mesh construction,
//! camera height interpolation, and regeneration.
//!
//! The algorithmic work lives in [`crate::mapgen`]; this plugin only turns
//! its elevation field into colored hex faces and cliff walls and keeps the
//! viewer glued to the surface.

mod entities;
mod startup_systems;
mod systems;
pub mod world_layout;

pub use entities::{Continent, TileFace};

use bevy::prelude::*;

use crate::GameState;

/// Nested configuration for the terrain subsystem.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct TerrainConfig {
    /// Map generation settings.
    pub map: MapSettings,
    /// Colors and label display.
    pub visual: VisualSettings,
    /// Background clear color.
    pub clear_color: Color,
}

/// Map generation settings. The generator randomizes everything it is not
/// explicitly given.
#[derive(Clone, Debug, Reflect)]
pub struct MapSettings {
    /// Seed for the first map; `None` draws one from OS entropy. Either
    /// way the effective seed is logged, and regeneration always draws
    /// fresh.
    pub seed: Option<u64>,
    /// Overrides the randomized landmass size when set.
    pub tile_count: Option<u32>,
    /// Overrides the randomized avoider count when set.
    pub avoider_count: Option<u32>,
    /// Distance in world-units between adjacent hex centers.
    pub point_spacing: f32,
    /// World height of one elevation level.
    pub elevation_step: f32,
}

/// Tile colors and debug-label display settings.
#[derive(Clone, Debug, Reflect)]
pub struct VisualSettings {
    /// Ramp color at elevation 0.
    pub low_color: Color,
    /// Ramp color at the elevation ceiling.
    pub high_color: Color,
    /// Cliff wall color.
    pub wall_color: Color,
    /// Maximum camera distance for elevation labels.
    pub label_distance: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            map: MapSettings {
                seed: None,
                tile_count: None,
                avoider_count: None,
                point_spacing: 2.0,
                elevation_step: 1.2,
            },
            visual: VisualSettings {
                low_color: Color::srgb(0.18, 0.42, 0.16),
                high_color: Color::srgb(0.93, 0.93, 0.98),
                wall_color: Color::srgb(0.38, 0.30, 0.24),
                label_distance: 40.0,
            },
            clear_color: Color::srgb(0.04, 0.06, 0.10),
        }
    }
}

/// Terrain plugin: generation + mesh spawning at startup, height tracking
/// and R-key regeneration at runtime.
pub struct TerrainPlugin(pub TerrainConfig);

impl Plugin for TerrainPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<TerrainConfig>()
            .register_type::<TileFace>()
            .register_type::<entities::CliffWalls>()
            .insert_resource(self.0.clone())
            .insert_resource(ClearColor(self.0.clear_color))
            .add_systems(
                Startup,
                (startup_systems::spawn_lights, startup_systems::generate_continent),
            )
            .add_systems(
                Update,
                (systems::update_viewer_height, systems::track_viewer_tile)
                    .chain()
                    .run_if(in_state(GameState::Running)),
            )
            .add_systems(
                Update,
                systems::regenerate.run_if(in_state(GameState::Running)),
            )
            .add_systems(
                Update,
                systems::draw_elevation_labels.run_if(in_state(GameState::Debugging)),
            );
    }
}
