use bevy::prelude::*;
use bevy_egui::egui;
use rand::Rng;

use super::TerrainConfig;
use super::entities::{Continent, TerrainMaterials, TileEntities, TileFace};
use crate::ViewerPos;
use crate::camera::TerrainCamera;
use crate::mapgen::HexPos;

// ── Update: viewer height ───────────────────────────────────────────

/// Sets `ViewerPos.pos.y` from terrain interpolation.
///
/// On the first frame, syncs [`ViewerPos::altitude`] from the camera's
/// current Y position so the initial drop onto the map is seamless.
pub fn update_viewer_height(
    continent_q: Query<&Continent>,
    mut viewer: ResMut<ViewerPos>,
    cam_q: Query<&Transform, With<TerrainCamera>>,
    mut synced: Local<bool>,
) {
    let Ok(continent) = continent_q.single() else {
        return;
    };

    if !*synced {
        *synced = true;
        if let Ok(cam_tf) = cam_q.single() {
            let xz = Vec2::new(cam_tf.translation.x, cam_tf.translation.z);
            let terrain_h = continent.layout.interpolate_height(xz);
            viewer.altitude = cam_tf.translation.y - terrain_h;
        }
    }

    let xz = Vec2::new(viewer.pos.x, viewer.pos.z);
    viewer.pos.y = continent.layout.interpolate_height(xz) + viewer.altitude;
}

/// Logs tile crossings as the viewer moves over the continent.
///
/// Keeps the previous tile in a `Local` to detect transitions without a
/// global resource. Leaving the landmass logs once as well.
pub fn track_viewer_tile(
    continent_q: Query<&Continent>,
    tile_entities: Option<Res<TileEntities>>,
    names: Query<&Name>,
    viewer: Res<ViewerPos>,
    mut prev_tile: Local<Option<Option<HexPos>>>,
) {
    let Ok(continent) = continent_q.single() else {
        return;
    };

    let pos = continent
        .layout
        .pos_at(Vec2::new(viewer.pos.x, viewer.pos.z));
    let current = continent.layout.contains(pos).then_some(pos);

    if *prev_tile == Some(current) {
        return;
    }
    *prev_tile = Some(current);

    match current {
        Some(pos) => {
            let name = tile_entities
                .as_ref()
                .and_then(|te| te.map.get(&pos))
                .and_then(|&e| names.get(e).ok());
            if let Some(name) = name {
                debug!("viewer over {name}");
            }
        }
        None => debug!("viewer off the continent"),
    }
}

// ── Update: regeneration ────────────────────────────────────────────

/// R key: throws the current continent away and grows a fresh one.
///
/// Every map is generated from scratch; nothing carries over but the
/// material palette. The viewer is recentered on the origin cell, which
/// every landmass contains.
pub fn regenerate(
    keys: Res<ButtonInput<KeyCode>>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    palette: Res<TerrainMaterials>,
    cfg: Res<TerrainConfig>,
    continent_q: Query<Entity, With<Continent>>,
    mut viewer: ResMut<ViewerPos>,
) {
    if !keys.just_pressed(KeyCode::KeyR) {
        return;
    }

    for entity in &continent_q {
        commands.entity(entity).despawn();
    }

    let seed = rand::rng().random();
    super::startup_systems::spawn_continent(&mut commands, &mut meshes, &palette, &cfg, seed);

    viewer.pos.x = 0.0;
    viewer.pos.z = 0.0;
}

// ── Update: debug labels ────────────────────────────────────────────

/// Draws each nearby tile's coordinate and elevation as a screen-projected
/// egui label.
pub fn draw_elevation_labels(
    mut egui_ctx: Query<&mut bevy_egui::EguiContext>,
    camera_q: Query<(&Camera, &GlobalTransform), With<TerrainCamera>>,
    continent_q: Query<&Continent>,
    tiles: Query<(&GlobalTransform, &TileFace)>,
    cfg: Res<TerrainConfig>,
    mut ready: Local<bool>,
) {
    if !*ready {
        *ready = true;
        return;
    }
    let Ok((camera, cam_gt)) = camera_q.single() else {
        return;
    };
    let Ok(mut ctx) = egui_ctx.single_mut() else {
        return;
    };
    let cam_pos = cam_gt.translation();

    let painter = ctx.get_mut().layer_painter(egui::LayerId::background());

    if let Ok(continent) = continent_q.single() {
        painter.text(
            egui::pos2(8.0, 8.0),
            egui::Align2::LEFT_TOP,
            format!(
                "seed {} | {} tiles | {} avoiders | smoothness {:.1}",
                continent.seed,
                continent.layout.len(),
                continent.params.avoider_count,
                continent.params.smoothness,
            ),
            egui::FontId::monospace(12.0),
            egui::Color32::LIGHT_GRAY,
        );
    }

    for (tile_gt, face) in &tiles {
        let world_pos = tile_gt.translation();
        if cam_pos.distance(world_pos) > cfg.visual.label_distance {
            continue;
        }
        if let Ok(viewport) = camera.world_to_viewport(cam_gt, world_pos) {
            painter.text(
                egui::pos2(viewport.x, viewport.y),
                egui::Align2::CENTER_CENTER,
                format!("({},{}) h{}", face.pos.hx, face.pos.hy, face.elevation),
                egui::FontId::proportional(11.0),
                egui::Color32::WHITE,
            );
        }
    }
}
