//! Bridge between lattice coordinates and world space: hexx layout,
//! prism geometry, and height interpolation under the camera.

use bevy::prelude::*;
use hexx::{EdgeDirection, Hex, HexLayout, MeshInfo, PlaneMeshBuilder};

use crate::mapgen::{HexMap, HexPos};

/// Encapsulates the hex layout, the generated elevation field, and vertex
/// computation for mesh building.
///
/// Generation coordinates use their own axial convention (second axis along
/// the `(+1,+1)` diagonal); [`axial`]/[`from_axial`] carry them onto hexx's
/// axial frame so the `HexLayout` can do world-space placement. The mapping
/// is adjacency-preserving, so neighboring landmass cells come out as
/// neighboring hexes on screen.
pub struct ContinentLayout {
    layout: HexLayout,
    corners: [Vec2; 6],
    elevations: HexMap<u8>,
    elevation_step: f32,
}

/// Generation coordinate → hexx axial coordinate.
pub fn axial(pos: HexPos) -> Hex {
    Hex::new(pos.hx, pos.hy - pos.hx)
}

/// Hexx axial coordinate → generation coordinate.
pub fn from_axial(hex: Hex) -> HexPos {
    HexPos::new(hex.x, hex.y + hex.x)
}

impl ContinentLayout {
    /// Wraps a finished elevation field in a world-space layout.
    ///
    /// `spacing` is the distance between adjacent hex centers and
    /// `elevation_step` the world height of one elevation level.
    pub fn new(elevations: HexMap<u8>, spacing: f32, elevation_step: f32) -> Self {
        let layout = HexLayout {
            scale: Vec2::splat(spacing),
            ..default()
        };
        let corner_slice = layout.center_aligned_hex_corners();
        let corners: [Vec2; 6] = std::array::from_fn(|i| corner_slice[i]);

        Self {
            layout,
            corners,
            elevations,
            elevation_step,
        }
    }

    // ── Coordinate conversion ──────────────────────────────────────

    /// World-space 2D position of a cell's center.
    pub fn center(&self, pos: HexPos) -> Vec2 {
        self.layout.hex_to_world_pos(axial(pos))
    }

    /// Cell under a world-space 2D position.
    pub fn pos_at(&self, world: Vec2) -> HexPos {
        from_axial(self.layout.world_pos_to_hex(world))
    }

    /// The cell adjacent to `pos` across `dir`, in generation coordinates.
    pub fn neighbor(&self, pos: HexPos, dir: EdgeDirection) -> HexPos {
        from_axial(axial(pos).neighbor(dir))
    }

    // ── Per-cell data access ───────────────────────────────────────

    /// Whether this cell is part of the landmass.
    pub fn contains(&self, pos: HexPos) -> bool {
        self.elevations.contains(pos)
    }

    /// Integer elevation of a cell, if occupied.
    pub fn elevation(&self, pos: HexPos) -> Option<u8> {
        self.elevations.find(pos).copied()
    }

    /// World-space height of a cell's top face, if occupied.
    pub fn face_height(&self, pos: HexPos) -> Option<f32> {
        self.elevation(pos)
            .map(|e| f32::from(e) * self.elevation_step)
    }

    /// World-space height a cliff wall facing `pos` drops to. An absent
    /// cell is the open continent edge, so walls there reach the ground.
    pub fn wall_base(&self, pos: HexPos) -> f32 {
        f32::from(self.elevations.get_copied_or(pos, 0)) * self.elevation_step
    }

    /// World-space corner `index` (0..5) of a cell's top face.
    ///
    /// Corner positions are lattice-shared: adjacent occupied cells produce
    /// identical xz for their shared corners, which is what lets wall quads
    /// close the prism mesh without seams.
    pub fn corner(&self, pos: HexPos, index: u8) -> Option<Vec3> {
        let height = self.face_height(pos)?;
        let center = self.center(pos);
        let offset = self.corners[index as usize];
        Some(Vec3::new(center.x + offset.x, height, center.y + offset.y))
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.elevations.len()
    }

    /// Whether the continent has no tiles.
    pub fn is_empty(&self) -> bool {
        self.elevations.is_empty()
    }

    /// All occupied cells with their elevations, order unspecified.
    pub fn tiles(&self) -> impl Iterator<Item = (HexPos, u8)> + '_ {
        self.elevations.iter().map(|(pos, &e)| (pos, e))
    }

    /// Mesh data for the flat top face every tile shares, centered on the
    /// origin at height zero.
    pub fn face_mesh_info(&self) -> MeshInfo {
        PlaneMeshBuilder::new(&self.layout).build()
    }

    // ── Compute methods ────────────────────────────────────────────

    /// Inverse-distance-weighted height under a world-space position,
    /// blending the face heights of the cell and its six neighbors.
    ///
    /// Positions off the continent fall back to ground level.
    pub fn interpolate_height(&self, world: Vec2) -> f32 {
        let hex = self.layout.world_pos_to_hex(world);
        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;

        for h in std::iter::once(hex).chain(hex.all_neighbors()) {
            let Some(height) = self.face_height(from_axial(h)) else {
                continue;
            };
            let center = self.layout.hex_to_world_pos(h);
            let dist_sq = world.distance_squared(center);
            if dist_sq < 0.001 {
                return height;
            }
            let weight = 1.0 / dist_sq;
            weighted_sum += height * weight;
            weight_total += weight;
        }

        if weight_total > 0.0 {
            weighted_sum / weight_total
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::hex::NEIGHBOR_DELTAS;

    fn uniform_layout(height: u8, radius: i32) -> ContinentLayout {
        let mut elevations = HexMap::new();
        for hx in -radius..=radius {
            for hy in -radius..=radius {
                elevations.insert(HexPos::new(hx, hy), height);
            }
        }
        ContinentLayout::new(elevations, 4.0, 2.0)
    }

    #[test]
    fn axial_conversion_roundtrips() {
        for hx in -5..=5 {
            for hy in -5..=5 {
                let pos = HexPos::new(hx, hy);
                assert_eq!(from_axial(axial(pos)), pos);
            }
        }
    }

    #[test]
    fn axial_conversion_preserves_adjacency() {
        let pos = HexPos::new(3, -2);
        let mapped = axial(pos);
        for (dx, dy) in NEIGHBOR_DELTAS {
            let neighbor = HexPos::new(pos.hx + dx, pos.hy + dy);
            assert!(
                mapped.all_neighbors().contains(&axial(neighbor)),
                "{neighbor:?} not adjacent after mapping"
            );
        }
    }

    #[test]
    fn world_position_roundtrips_through_layout() {
        let layout = uniform_layout(3, 4);
        for hx in -3..=3 {
            for hy in -3..=3 {
                let pos = HexPos::new(hx, hy);
                let world = layout.center(pos);
                assert_eq!(layout.pos_at(world), pos, "roundtrip failed for {pos:?}");
            }
        }
    }

    #[test]
    fn neighbor_follows_the_generation_delta_set() {
        let layout = uniform_layout(0, 2);
        let pos = HexPos::new(1, 1);
        let via_layout: Vec<HexPos> = EdgeDirection::ALL_DIRECTIONS
            .iter()
            .map(|&dir| layout.neighbor(pos, dir))
            .collect();
        for (dx, dy) in NEIGHBOR_DELTAS {
            assert!(via_layout.contains(&HexPos::new(pos.hx + dx, pos.hy + dy)));
        }
    }

    #[test]
    fn face_height_scales_by_elevation_step() {
        let layout = uniform_layout(3, 1);
        assert_eq!(layout.face_height(HexPos::ORIGIN), Some(6.0));
        assert_eq!(layout.face_height(HexPos::new(50, 50)), None);
    }

    #[test]
    fn wall_base_falls_to_ground_off_the_landmass() {
        let layout = uniform_layout(3, 1);
        assert_eq!(layout.wall_base(HexPos::new(50, 50)), 0.0);
        assert_eq!(layout.wall_base(HexPos::ORIGIN), 6.0);
    }

    #[test]
    fn corners_sit_at_face_height() {
        let layout = uniform_layout(4, 1);
        for i in 0..6u8 {
            let v = layout
                .corner(HexPos::ORIGIN, i)
                .expect("corner should exist");
            assert_eq!(v.y, 8.0);
        }
    }

    #[test]
    fn shared_corners_coincide_between_neighbors() {
        let layout = uniform_layout(2, 2);
        let pos = HexPos::ORIGIN;
        for &dir in &EdgeDirection::ALL_DIRECTIONS {
            let neighbor = layout.neighbor(pos, dir);
            let vertex_dirs = dir.vertex_directions();
            let own: Vec<Vec3> = [vertex_dirs[0], vertex_dirs[1]]
                .iter()
                .filter_map(|d| layout.corner(pos, d.index()))
                .collect();
            // Each of this edge's two corners appears among the neighbor's.
            for v in own {
                let shared = (0..6u8).filter_map(|i| layout.corner(neighbor, i)).any(
                    |w| (Vec2::new(v.x, v.z) - Vec2::new(w.x, w.z)).length() < 1e-3,
                );
                assert!(shared, "corner {v:?} not shared with {neighbor:?}");
            }
        }
    }

    #[test]
    fn interpolate_over_uniform_field_matches_face_height() {
        let layout = uniform_layout(3, 3);
        let h = layout.interpolate_height(Vec2::new(1.3, -2.1));
        assert!((h - 6.0).abs() < 0.1, "expected ~6.0, got {h}");
    }

    #[test]
    fn interpolate_off_the_continent_falls_back_to_ground() {
        let layout = uniform_layout(3, 1);
        assert_eq!(layout.interpolate_height(Vec2::new(1000.0, 1000.0)), 0.0);
    }
}
