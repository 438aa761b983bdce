use bevy::asset::RenderAssetUsages;
use bevy::mesh::Indices;
use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;
use hexx::EdgeDirection;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::TerrainConfig;
use super::entities::{CliffWalls, Continent, TerrainMaterials, TileEntities, TileFace};
use super::world_layout::ContinentLayout;
use crate::mapgen::{self, GenParams, HexPos, elevation};
use crate::math;

// ── Startup ─────────────────────────────────────────────────────────

/// Sun + ambient fill so the elevation bands read at a glance.
pub fn spawn_lights(mut commands: Commands) {
    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: 9_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(40.0, 60.0, 20.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(GlobalAmbientLight {
        color: Color::srgb(0.7, 0.8, 1.0),
        brightness: 220.0,
        ..default()
    });
}

/// Generates the first map and spawns its meshes.
pub fn generate_continent(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<TerrainConfig>,
) {
    let palette =
        TerrainMaterials::create(&mut materials, &cfg.visual, elevation::MAX_ELEVATION);

    let seed = cfg.map.seed.unwrap_or_else(|| rand::rng().random());
    spawn_continent(&mut commands, &mut meshes, &palette, &cfg, seed);

    commands.insert_resource(palette);
}

// ── Spawn helpers (shared with regeneration) ────────────────────────

/// Runs the full generation pipeline for `seed` and spawns the continent
/// entity tree: one parent, one face entity per tile, one wall entity per
/// tile that needs cliffs.
pub(super) fn spawn_continent(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    palette: &TerrainMaterials,
    cfg: &TerrainConfig,
    seed: u64,
) -> Entity {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut params = GenParams::randomized(&mut rng);
    if let Some(tiles) = cfg.map.tile_count {
        params.tile_count = tiles;
    }
    if let Some(avoiders) = cfg.map.avoider_count {
        params.avoider_count = avoiders;
    }

    let map = mapgen::generate_map_with(&mut rng, params);
    info!(
        "generated continent: seed {seed}, {} tiles, {} avoiders, smoothness {:.1}",
        map.elevations.len(),
        map.params.avoider_count,
        map.params.smoothness,
    );

    let layout = ContinentLayout::new(
        map.elevations,
        cfg.map.point_spacing,
        cfg.map.elevation_step,
    );

    let face_mesh_handle = meshes.add(build_face_mesh(&layout));

    let continent_entity = commands
        .spawn((
            Name::new("Continent"),
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    let mut tile_entity_map: HashMap<HexPos, Entity> = HashMap::new();

    for (pos, elevation) in layout.tiles() {
        let center = layout.center(pos);
        let height = f32::from(elevation) * cfg.map.elevation_step;

        let entity = commands
            .spawn((
                TileFace { pos, elevation },
                Name::new(format!("Tile({},{})", pos.hx, pos.hy)),
                Mesh3d(face_mesh_handle.clone()),
                MeshMaterial3d(palette.bands[elevation as usize].clone()),
                Transform::from_xyz(center.x, height, center.y),
            ))
            .id();
        commands.entity(continent_entity).add_child(entity);
        tile_entity_map.insert(pos, entity);

        // Cliff walls are built in world space and parented flat under the
        // continent so face transforms stay a pure translation.
        if let Some(wall_mesh) = build_wall_mesh(&layout, pos) {
            let wall_entity = commands
                .spawn((
                    CliffWalls,
                    Name::new(format!("Cliffs({},{})", pos.hx, pos.hy)),
                    Mesh3d(meshes.add(wall_mesh)),
                    MeshMaterial3d(palette.wall.clone()),
                    Transform::default(),
                ))
                .id();
            commands.entity(continent_entity).add_child(wall_entity);
        }
    }

    commands
        .entity(continent_entity)
        .insert(Continent { layout, seed, params });
    commands.insert_resource(TileEntities {
        map: tile_entity_map,
    });

    continent_entity
}

/// Flat hexagonal top face shared by every tile, centered on the origin.
fn build_face_mesh(layout: &ContinentLayout) -> Mesh {
    let info = layout.face_mesh_info();
    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, info.vertices)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, info.normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, info.uvs)
    .with_inserted_indices(Indices::U16(info.indices))
}

/// One quad per edge whose neighbor face is lower or absent, dropping from
/// this tile's top edge to the neighbor's face height (ground when the
/// neighbor is off the continent). Returns `None` when the tile needs no
/// cliffs.
fn build_wall_mesh(layout: &ContinentLayout, pos: HexPos) -> Option<Mesh> {
    let own_height = layout.face_height(pos)?;

    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut uvs: Vec<[f32; 2]> = Vec::new();
    let mut indices: Vec<u16> = Vec::new();

    for &dir in &EdgeDirection::ALL_DIRECTIONS {
        let neighbor = layout.neighbor(pos, dir);
        let base = layout.wall_base(neighbor);
        if base >= own_height {
            continue;
        }

        let vertex_dirs = dir.vertex_directions();
        let top_a = layout.corner(pos, vertex_dirs[0].index())?;
        let top_b = layout.corner(pos, vertex_dirs[1].index())?;
        let bottom_b = Vec3::new(top_b.x, base, top_b.z);
        let bottom_a = Vec3::new(top_a.x, base, top_a.z);

        let start = positions.len() as u16;
        let normal = math::compute_normal(top_a, top_b, bottom_b);
        for v in [top_a, top_b, bottom_b, bottom_a] {
            positions.push(v.to_array());
            normals.push(normal.to_array());
        }
        uvs.extend_from_slice(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        indices.extend_from_slice(&[start, start + 1, start + 2, start, start + 2, start + 3]);
    }

    if positions.is_empty() {
        return None;
    }

    Some(
        Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::RENDER_WORLD,
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_indices(Indices::U16(indices)),
    )
}
