//! Randomized landmass growth shaped by repulsive avoider fields.
//!
//! The continent starts as the single origin cell and accretes one random
//! boundary neighbor at a time until it reaches its target size. Avoiders
//! are transient repulsive fields that suppress growth near themselves,
//! carving bays and irregular coastlines into what would otherwise be a
//! round random blob.

use bevy::prelude::Vec2;
use rand::Rng;

use super::hex::{HexPos, frac_distance};
use super::hex_map::HexMap;

/// Side length of the square avoider positions are drawn from.
const AVOIDER_SPREAD: f32 = 100.0;

/// A transient repulsive field used only during growth. Positions are
/// real-valued axial coordinates, deliberately off-lattice.
#[derive(Debug, Clone, Copy)]
pub struct Avoider {
    /// Field center in fractional axial coordinates.
    pub pos: Vec2,
    /// Field strength at zero distance.
    pub radius: f32,
}

impl Avoider {
    /// Uniform position in a side-[`AVOIDER_SPREAD`] square centered on the
    /// origin; radius `uniform[0,1)² * 5 + 2`, right-skewed so most fields
    /// are small with the occasional large one.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let half = AVOIDER_SPREAD / 2.0;
        Self {
            pos: Vec2::new(
                rng.random::<f32>() * AVOIDER_SPREAD - half,
                rng.random::<f32>() * AVOIDER_SPREAD - half,
            ),
            radius: rng.random::<f32>().powi(2) * 5.0 + 2.0,
        }
    }

    /// How strongly this field rejects growth at `cell`. Falls off with the
    /// square root of hex distance; negative values carry no influence.
    pub fn rejection(&self, cell: HexPos) -> f32 {
        self.radius - 2.0 * frac_distance(cell.as_frac(), self.pos).sqrt()
    }
}

/// The connected set of occupied cells. Grows monotonically during
/// [`grow`]; immutable afterwards.
pub struct Landmass {
    /// Cells in insertion order. Growth picks uniformly from this list.
    cells: Vec<HexPos>,
    members: HexMap<()>,
}

impl Landmass {
    /// Whether `pos` is part of the landmass.
    pub fn contains(&self, pos: HexPos) -> bool {
        self.members.contains(pos)
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the landmass has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Occupied cells in growth order.
    pub fn cells(&self) -> &[HexPos] {
        &self.cells
    }

    /// Minimal constructor for tests: an explicit cell list.
    #[cfg(test)]
    pub fn from_cells(cells: Vec<HexPos>) -> Self {
        let mut members = HexMap::new();
        for &cell in &cells {
            members.insert(cell, ());
        }
        Self { cells, members }
    }
}

/// Grows a connected landmass of `tile_count` cells from the origin.
///
/// Each step picks a random occupied cell, then a random neighbor of it.
/// Occupied candidates are retried. Otherwise the candidate survives the
/// strongest avoider field with the complement of its rejection strength —
/// except that one attempt in ten skips the check entirely, which keeps
/// avoider boundaries fuzzy instead of hard.
///
/// A `tile_count` of 1 or less yields just the origin. Termination is
/// probabilistic: the 10% bypass means growth is never fully walled in,
/// but there is no iteration cap.
pub fn grow<R: Rng>(rng: &mut R, avoider_count: u32, tile_count: u32) -> Landmass {
    let avoiders: Vec<Avoider> = (0..avoider_count).map(|_| Avoider::random(rng)).collect();

    let mut cells = vec![HexPos::ORIGIN];
    let mut members = HexMap::new();
    members.insert(HexPos::ORIGIN, ());

    while (cells.len() as u32) < tile_count {
        let from = cells[rng.random_range(0..cells.len())];
        let candidate = from.neighbors()[rng.random_range(0..6)];
        if members.contains(candidate) {
            continue;
        }

        let strength = avoiders
            .iter()
            .map(|a| a.rejection(candidate))
            .fold(0.0_f32, f32::max);

        // Strength is not a probability: values above 1 make the candidate
        // effectively unreachable on the 90% of attempts that check.
        if rng.random::<f32>() < 0.9 && rng.random::<f32>() < strength {
            continue;
        }

        members.insert(candidate, ());
        cells.push(candidate);
    }

    Landmass { cells, members }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn connected_from_origin(landmass: &Landmass) -> bool {
        let mut visited = HexMap::new();
        visited.insert(HexPos::ORIGIN, ());
        let mut queue = vec![HexPos::ORIGIN];
        while let Some(cell) = queue.pop() {
            for n in cell.neighbors() {
                if landmass.contains(n) && !visited.contains(n) {
                    visited.insert(n, ());
                    queue.push(n);
                }
            }
        }
        visited.len() == landmass.len()
    }

    #[test]
    fn reaches_exact_target_size() {
        let mut rng = StdRng::seed_from_u64(11);
        let landmass = grow(&mut rng, 40, 900);
        assert_eq!(landmass.len(), 900);
    }

    #[test]
    fn every_cell_is_reachable_from_origin() {
        for seed in [0, 7, 42] {
            let mut rng = StdRng::seed_from_u64(seed);
            let landmass = grow(&mut rng, 25, 400);
            assert!(
                connected_from_origin(&landmass),
                "landmass disconnected for seed {seed}"
            );
        }
    }

    #[test]
    fn tile_count_of_one_yields_only_origin() {
        let mut rng = StdRng::seed_from_u64(3);
        let landmass = grow(&mut rng, 50, 1);
        assert_eq!(landmass.len(), 1);
        assert!(landmass.contains(HexPos::ORIGIN));
    }

    #[test]
    fn tile_count_of_zero_still_keeps_the_origin() {
        let mut rng = StdRng::seed_from_u64(3);
        let landmass = grow(&mut rng, 0, 0);
        assert_eq!(landmass.cells(), &[HexPos::ORIGIN]);
    }

    #[test]
    fn growth_without_avoiders_is_unconstrained() {
        let mut rng = StdRng::seed_from_u64(99);
        let landmass = grow(&mut rng, 0, 300);
        assert_eq!(landmass.len(), 300);
        assert!(connected_from_origin(&landmass));
    }

    #[test]
    fn avoider_radius_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let a = Avoider::random(&mut rng);
            assert!(a.radius >= 2.0 && a.radius < 7.0, "radius {}", a.radius);
            assert!(a.pos.x.abs() <= 50.0 && a.pos.y.abs() <= 50.0);
        }
    }

    #[test]
    fn rejection_weakens_with_distance() {
        let avoider = Avoider {
            pos: Vec2::ZERO,
            radius: 5.0,
        };
        let near = avoider.rejection(HexPos::new(1, 0));
        let far = avoider.rejection(HexPos::new(10, 0));
        assert!(near > far);
        assert_eq!(avoider.rejection(HexPos::ORIGIN), 5.0);
    }
}
