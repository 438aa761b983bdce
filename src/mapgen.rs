//! Procedural continent generation, free of Bevy ECS dependencies.
//!
//! The pipeline runs in three stages over the hex lattice defined in
//! [`hex`]: [`landmass::grow`] accretes a connected set of occupied cells
//! shaped by repulsive avoider fields, [`elevation::assign`] floods integer
//! heights outward from the origin, and [`elevation::smooth`] erases
//! single-cell height noise. [`generate_map`] strings the stages together.
//!
//! All randomness flows through an explicit [`rand::Rng`] handed in by the
//! caller, so a seeded `StdRng` reproduces a map exactly.

pub mod elevation;
pub mod hex;
pub mod hex_map;
pub mod landmass;

pub use hex::HexPos;
pub use hex_map::{HexMap, LookupError};

use rand::Rng;

/// Per-map generation parameters, freshly randomized for every map.
#[derive(Debug, Clone, Copy)]
pub struct GenParams {
    /// Number of repulsive fields shaping the coastline, `[0, 200)`.
    pub avoider_count: u32,
    /// Target landmass size in cells, `[750, 1250)`.
    pub tile_count: u32,
    /// Chance (in percent) that diffusion copies a height unperturbed,
    /// `[0, 60)` and right-skewed — jagged terrain is the common case.
    pub smoothness: f32,
}

impl GenParams {
    /// Draws a fresh parameter set from `rng`.
    pub fn randomized<R: Rng>(rng: &mut R) -> Self {
        Self {
            avoider_count: (rng.random::<f32>() * 200.0) as u32,
            tile_count: 750 + (rng.random::<f32>() * 500.0) as u32,
            smoothness: rng.random::<f32>().powi(2) * 60.0,
        }
    }
}

/// A finished map: the elevation field plus the parameters that shaped it.
///
/// The landmass is exactly the key set of `elevations` — every occupied
/// cell carries a height in `[0, 8]`.
pub struct GeneratedMap {
    /// The parameters the map was generated with.
    pub params: GenParams,
    /// Height per occupied cell.
    pub elevations: HexMap<u8>,
}

/// Generates a complete map with self-randomized parameters.
pub fn generate_map<R: Rng>(rng: &mut R) -> GeneratedMap {
    let params = GenParams::randomized(rng);
    generate_map_with(rng, params)
}

/// Generates a complete map from explicit parameters.
pub fn generate_map_with<R: Rng>(rng: &mut R, params: GenParams) -> GeneratedMap {
    let landmass = landmass::grow(rng, params.avoider_count, params.tile_count);
    let mut elevations = elevation::assign(rng, &landmass, params.smoothness);
    elevation::smooth(&mut elevations, elevation::SMOOTHING_PASSES);
    GeneratedMap { params, elevations }
}
