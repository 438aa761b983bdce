//! Elevation assignment by randomized frontier diffusion, then smoothing.
//!
//! Diffusion floods heights outward from the origin: each round rebuilds
//! the frontier of unassigned cells bordering assigned ones and extends one
//! random entry, so heights drift in ±1 steps away from the seed.
//! Smoothing then runs a fixed number of local-majority passes to erase
//! one-cell bumps and dips that carry no terrain meaning.

use rand::Rng;

use super::hex::HexPos;
use super::hex_map::HexMap;
use super::landmass::Landmass;

/// Inclusive elevation ceiling; the floor is 0.
pub const MAX_ELEVATION: u8 = 8;
/// Height seeded at the origin before diffusion starts.
pub const ORIGIN_ELEVATION: u8 = 2;
/// Fixed number of smoothing sweeps.
pub const SMOOTHING_PASSES: usize = 10;

/// Assigns every landmass cell an elevation in `[0, MAX_ELEVATION]`.
///
/// The frontier holds one entry per (unassigned cell, assigned-neighbor
/// height) pair, so a cell bordering three assigned neighbors is three
/// times as likely to be extended next — diffusion favors consensus
/// pockets over thin tendrils. With probability `smoothness / 100` the
/// neighbor's height propagates unchanged; otherwise it is perturbed by
/// ±1 and clamped.
///
/// The landmass is connected by construction, so the frontier only empties
/// once every cell is assigned.
pub fn assign<R: Rng>(rng: &mut R, landmass: &Landmass, smoothness: f32) -> HexMap<u8> {
    let mut elevations = HexMap::new();
    elevations.insert(HexPos::ORIGIN, ORIGIN_ELEVATION);

    loop {
        let mut frontier: Vec<(HexPos, u8)> = Vec::new();
        for &cell in landmass.cells() {
            if elevations.contains(cell) {
                continue;
            }
            for neighbor in cell.neighbors() {
                if let Some(&height) = elevations.find(neighbor) {
                    frontier.push((cell, height));
                }
            }
        }
        if frontier.is_empty() {
            break;
        }

        let (cell, base) = frontier[rng.random_range(0..frontier.len())];
        let height = if rng.random::<f32>() < smoothness / 100.0 {
            base
        } else if rng.random::<f32>() < 0.5 {
            (base + 1).min(MAX_ELEVATION)
        } else {
            base.saturating_sub(1)
        };
        elevations.insert(cell, height);
    }

    elevations
}

/// Runs `passes` local-majority smoothing sweeps over the field in place.
///
/// The cell list is captured once up front, and each pass is two-phase:
/// every decision reads the field as it stood when the pass began, then all
/// changes land together. A cell with snapshot height `h` considers only
/// present neighbors within two height steps. It drops to `h - 1` when no
/// such neighbor sits at `h + 1` and strictly more sit at `h - 1` than at
/// `h`; symmetrically it rises to `h + 1`. The "no neighbor on the far
/// side" guard means a cell only ever moves onto a height some neighbor
/// already occupies, which also keeps the field inside `[0, MAX_ELEVATION]`
/// without an explicit clamp.
pub fn smooth(elevations: &mut HexMap<u8>, passes: usize) {
    let cells: Vec<HexPos> = elevations.keys().collect();

    for _ in 0..passes {
        let mut changes: Vec<(HexPos, u8)> = Vec::new();

        for &cell in &cells {
            let h = elevations.get_copied_or(cell, 0) as i16;

            let mut count_equal = 0u32;
            let mut count_up = 0u32;
            let mut count_down = 0u32;
            for neighbor in cell.neighbors() {
                let Some(&nh) = elevations.find(neighbor) else {
                    continue;
                };
                let nh = nh as i16;
                if (nh - h).abs() > 2 {
                    continue;
                }
                if nh == h {
                    count_equal += 1;
                } else if nh == h + 1 {
                    count_up += 1;
                } else if nh == h - 1 {
                    count_down += 1;
                }
            }

            if count_up == 0 && count_down > count_equal {
                changes.push((cell, (h - 1) as u8));
            } else if count_down == 0 && count_up > count_equal {
                changes.push((cell, (h + 1) as u8));
            }
        }

        for (cell, height) in changes {
            elevations.insert(cell, height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::landmass;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn single_cell_landmass_gets_origin_elevation() {
        let mut rng = StdRng::seed_from_u64(1);
        let landmass = landmass::grow(&mut rng, 0, 1);
        let elevations = assign(&mut rng, &landmass, 30.0);
        assert_eq!(elevations.len(), 1);
        assert_eq!(elevations.get(HexPos::ORIGIN), Ok(&ORIGIN_ELEVATION));
    }

    #[test]
    fn seven_cell_landmass_is_fully_assigned() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut cells = vec![HexPos::ORIGIN];
        cells.extend(HexPos::ORIGIN.neighbors());
        let landmass = landmass::Landmass::from_cells(cells);
        let elevations = assign(&mut rng, &landmass, 20.0);
        assert_eq!(elevations.len(), 7);
        for &cell in landmass.cells() {
            assert!(elevations.contains(cell), "{cell:?} left unassigned");
        }
    }

    #[test]
    fn every_cell_is_assigned_within_bounds() {
        for seed in [2, 19, 77] {
            let mut rng = StdRng::seed_from_u64(seed);
            let landmass = landmass::grow(&mut rng, 30, 500);
            let elevations = assign(&mut rng, &landmass, 15.0);
            assert_eq!(elevations.len(), landmass.len());
            for (cell, &h) in elevations.iter() {
                assert!(h <= MAX_ELEVATION, "{cell:?} has height {h}");
            }
        }
    }

    #[test]
    fn full_smoothness_propagates_the_seed_height_everywhere() {
        let mut rng = StdRng::seed_from_u64(4);
        let landmass = landmass::grow(&mut rng, 0, 60);
        let elevations = assign(&mut rng, &landmass, 100.0);
        for (cell, &h) in elevations.iter() {
            assert_eq!(h, ORIGIN_ELEVATION, "{cell:?} drifted to {h}");
        }
    }

    #[test]
    fn smoothing_leaves_a_uniform_field_unchanged() {
        let mut rng = StdRng::seed_from_u64(21);
        let landmass = landmass::grow(&mut rng, 0, 120);
        let mut elevations = HexMap::new();
        for &cell in landmass.cells() {
            elevations.insert(cell, 5u8);
        }
        smooth(&mut elevations, SMOOTHING_PASSES);
        for (cell, &h) in elevations.iter() {
            assert_eq!(h, 5, "{cell:?} changed in a uniform field");
        }
    }

    #[test]
    fn smoothing_leaves_a_lone_cell_unchanged() {
        let mut elevations = HexMap::new();
        elevations.insert(HexPos::ORIGIN, 2u8);
        smooth(&mut elevations, SMOOTHING_PASSES);
        assert_eq!(elevations.get(HexPos::ORIGIN), Ok(&2));
    }

    #[test]
    fn smoothing_fills_an_isolated_dip() {
        // Origin at 3 surrounded by six cells at 4: no neighbor at 2,
        // count_up = 6 > count_equal = 0, so the dip rises.
        let mut elevations = HexMap::new();
        elevations.insert(HexPos::ORIGIN, 3u8);
        for n in HexPos::ORIGIN.neighbors() {
            elevations.insert(n, 4u8);
        }
        smooth(&mut elevations, 1);
        assert_eq!(elevations.get(HexPos::ORIGIN), Ok(&4));
    }

    #[test]
    fn smoothing_levels_an_isolated_bump() {
        let mut elevations = HexMap::new();
        elevations.insert(HexPos::ORIGIN, 6u8);
        for n in HexPos::ORIGIN.neighbors() {
            elevations.insert(n, 5u8);
        }
        smooth(&mut elevations, 1);
        assert_eq!(elevations.get(HexPos::ORIGIN), Ok(&5));
    }

    #[test]
    fn smoothing_respects_elevation_bounds() {
        for seed in [6, 33] {
            let mut rng = StdRng::seed_from_u64(seed);
            let landmass = landmass::grow(&mut rng, 20, 600);
            let mut elevations = assign(&mut rng, &landmass, 5.0);
            smooth(&mut elevations, SMOOTHING_PASSES);
            assert_eq!(elevations.len(), landmass.len());
            for (cell, &h) in elevations.iter() {
                assert!(h <= MAX_ELEVATION, "{cell:?} escaped bounds: {h}");
            }
        }
    }

    #[test]
    fn smoothing_only_moves_cells_onto_existing_neighbor_heights() {
        // The guard's actual guarantee: a changed cell's new height was
        // already occupied by one of its neighbors before the pass.
        for seed in [12, 48] {
            let mut rng = StdRng::seed_from_u64(seed);
            let landmass = landmass::grow(&mut rng, 15, 400);
            let mut elevations = assign(&mut rng, &landmass, 10.0);
            for _ in 0..SMOOTHING_PASSES {
                let before = elevations.clone();
                smooth(&mut elevations, 1);
                for (cell, &after_h) in elevations.iter() {
                    let before_h = before.get_copied_or(cell, 0);
                    if after_h == before_h {
                        continue;
                    }
                    let adopted = cell
                        .neighbors()
                        .iter()
                        .any(|&n| before.find(n) == Some(&after_h));
                    assert!(
                        adopted,
                        "{cell:?} moved {before_h} -> {after_h} with no neighbor there"
                    );
                }
            }
        }
    }
}
