use bevy::color::Mix;
use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use super::VisualSettings;
use super::world_layout::ContinentLayout;
use crate::mapgen::{GenParams, HexPos};
use crate::math;

/// Central component holding the generated continent.
///
/// Spawned as a single entity that parents every tile face and cliff wall.
/// Replaced wholesale on regeneration.
#[derive(Component)]
pub struct Continent {
    /// World-space layout over the generated elevation field.
    pub layout: ContinentLayout,
    /// Seed the map was generated from, for log correlation.
    pub seed: u64,
    /// Parameters the generator drew (or was given) for this map.
    pub params: GenParams,
}

/// Marker on tile top-face entities.
#[derive(Component, Reflect)]
pub struct TileFace {
    /// Generation coordinate of this tile.
    pub pos: HexPos,
    /// Integer elevation, `[0, 8]`.
    pub elevation: u8,
}

/// Marker on per-tile cliff wall mesh entities.
#[derive(Component, Reflect)]
pub struct CliffWalls;

/// Maps generation coordinates to their spawned [`TileFace`] entity IDs.
/// Rebuilt on every regeneration.
#[derive(Resource)]
pub struct TileEntities {
    /// Lookup from cell to entity.
    pub map: HashMap<HexPos, Entity>,
}

/// Shared material handles: one per elevation band plus the cliff walls.
///
/// Created once at startup and reused across regenerations.
#[derive(Resource)]
pub struct TerrainMaterials {
    /// Indexed by elevation, `bands[e]` for `e` in `0..=8`.
    pub bands: Vec<Handle<StandardMaterial>>,
    /// Unculled cliff material shared by every wall quad.
    pub wall: Handle<StandardMaterial>,
}

impl TerrainMaterials {
    /// Builds the elevation color ramp and wall material from the visual
    /// settings.
    pub fn create(
        materials: &mut Assets<StandardMaterial>,
        visual: &VisualSettings,
        max_elevation: u8,
    ) -> Self {
        let bands = (0..=max_elevation)
            .map(|e| {
                let t = math::elevation_ratio(e, max_elevation);
                let color = visual.low_color.mix(&visual.high_color, t);
                materials.add(StandardMaterial {
                    base_color: color,
                    perceptual_roughness: 0.9,
                    ..default()
                })
            })
            .collect();
        let wall = materials.add(StandardMaterial {
            base_color: visual.wall_color,
            perceptual_roughness: 1.0,
            cull_mode: None,
            ..default()
        });
        Self { bands, wall }
    }
}
