//! Axial hex coordinates and the distance metric used by every generator.
//!
//! The `(hx, hy)` convention here has its second axis running along the
//! `(+1,+1)` diagonal, so a cell's six neighbors are the fixed delta set
//! [`NEIGHBOR_DELTAS`]. Growth, diffusion, and smoothing all enumerate
//! neighbors through this one table so adjacency stays consistent.

use bevy::prelude::{Reflect, Vec2};

/// The six axial offsets of a cell's neighbors, in the order every
/// algorithm enumerates them.
pub const NEIGHBOR_DELTAS: [(i32, i32); 6] =
    [(1, 0), (1, 1), (0, 1), (-1, 0), (-1, -1), (0, -1)];

/// A cell on the hexagonal lattice. Plain value type: copy, hash, compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub struct HexPos {
    /// Lattice column.
    pub hx: i32,
    /// Lattice row.
    pub hy: i32,
}

impl HexPos {
    /// The growth and diffusion seed cell.
    pub const ORIGIN: HexPos = HexPos { hx: 0, hy: 0 };

    /// Cell at the given lattice coordinates.
    pub const fn new(hx: i32, hy: i32) -> Self {
        Self { hx, hy }
    }

    /// The six adjacent cells, ordered per [`NEIGHBOR_DELTAS`].
    pub fn neighbors(self) -> [HexPos; 6] {
        std::array::from_fn(|i| {
            let (dx, dy) = NEIGHBOR_DELTAS[i];
            HexPos::new(self.hx + dx, self.hy + dy)
        })
    }

    /// Shortest-path distance to `other` in neighbor steps.
    ///
    /// When the deltas share a sign the two axes can be walked together
    /// along the `(±1,±1)` diagonal, giving the Chebyshev distance;
    /// otherwise every step helps only one axis and the Manhattan sum
    /// applies.
    pub fn distance(self, other: HexPos) -> i32 {
        let dx = other.hx - self.hx;
        let dy = other.hy - self.hy;
        if dx == 0 || dy == 0 {
            dx.abs() + dy.abs()
        } else if dx.signum() == dy.signum() {
            dx.abs().max(dy.abs())
        } else {
            dx.abs() + dy.abs()
        }
    }

    /// This cell as a real-valued axial point, for distances against
    /// non-lattice positions such as avoider centers.
    pub fn as_frac(self) -> Vec2 {
        Vec2::new(self.hx as f32, self.hy as f32)
    }
}

/// [`HexPos::distance`] extended to real-valued axial points.
///
/// Avoiders live at continuous positions, so the landmass generator needs
/// the same metric over `Vec2`. Agreement with the integer form on lattice
/// points is what keeps avoider fields centered where you expect.
pub fn frac_distance(a: Vec2, b: Vec2) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    if dx == 0.0 || dy == 0.0 {
        dx.abs() + dy.abs()
    } else if dx.signum() == dy.signum() {
        dx.abs().max(dy.abs())
    } else {
        dx.abs() + dy.abs()
    }
}
