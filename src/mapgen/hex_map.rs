//! Sparse map keyed by hex coordinate.
//!
//! Backs both the landmass membership set (`HexMap<()>`) and the elevation
//! field (`HexMap<u8>`). Keyed directly by [`HexPos`] value for O(1)
//! amortized lookup. Enumeration order is unspecified; the generators never
//! rely on it for correctness.

use bevy::platform::collections::HashMap;
use thiserror::Error;

use super::hex::HexPos;

/// A required cell was not present in the map.
///
/// The generators guard every `get` with a prior membership check, so this
/// surfaces caller misuse rather than returning a silent sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no value stored at hex ({}, {})", .0.hx, .0.hy)]
pub struct LookupError(pub HexPos);

/// Sparse hex-coordinate-indexed map.
#[derive(Debug, Clone, Default)]
pub struct HexMap<T> {
    entries: HashMap<HexPos, T>,
}

impl<T> HexMap<T> {
    /// An empty map.
    pub fn new() -> Self {
        Self {
            entries: HashMap::default(),
        }
    }

    /// Whether a value is stored at `pos`.
    pub fn contains(&self, pos: HexPos) -> bool {
        self.entries.contains_key(&pos)
    }

    /// Inserts or overwrites the value at `pos`.
    pub fn insert(&mut self, pos: HexPos, value: T) {
        self.entries.insert(pos, value);
    }

    /// Precondition-checked accessor: `pos` must be present.
    pub fn get(&self, pos: HexPos) -> Result<&T, LookupError> {
        self.entries.get(&pos).ok_or(LookupError(pos))
    }

    /// Non-failing lookup for guarded call sites.
    pub fn find(&self, pos: HexPos) -> Option<&T> {
        self.entries.get(&pos)
    }

    /// Number of stored cells.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no cells are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All inserted coordinates, in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = HexPos> + '_ {
        self.entries.keys().copied()
    }

    /// All entries, in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (HexPos, &T)> {
        self.entries.iter().map(|(&pos, value)| (pos, value))
    }
}

impl<T: Copy> HexMap<T> {
    /// The value at `pos`, or `fallback` when absent. Never fails.
    pub fn get_copied_or(&self, pos: HexPos, fallback: T) -> T {
        self.entries.get(&pos).copied().unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_map_contains_nothing() {
        let map: HexMap<u8> = HexMap::new();
        assert!(map.is_empty());
        assert!(!map.contains(HexPos::ORIGIN));
    }

    #[test]
    fn insert_then_get() {
        let mut map = HexMap::new();
        map.insert(HexPos::new(3, -1), 7u8);
        assert!(map.contains(HexPos::new(3, -1)));
        assert_eq!(map.get(HexPos::new(3, -1)), Ok(&7));
    }

    #[test]
    fn insert_overwrites() {
        let mut map = HexMap::new();
        map.insert(HexPos::ORIGIN, 1u8);
        map.insert(HexPos::ORIGIN, 2u8);
        assert_eq!(map.get(HexPos::ORIGIN), Ok(&2));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn get_on_missing_cell_fails_loudly() {
        let map: HexMap<u8> = HexMap::new();
        let err = map.get(HexPos::new(1, 2)).unwrap_err();
        assert_eq!(err, LookupError(HexPos::new(1, 2)));
        assert_eq!(err.to_string(), "no value stored at hex (1, 2)");
    }

    #[test]
    fn get_copied_or_falls_back() {
        let mut map = HexMap::new();
        map.insert(HexPos::ORIGIN, 5u8);
        assert_eq!(map.get_copied_or(HexPos::ORIGIN, 0), 5);
        assert_eq!(map.get_copied_or(HexPos::new(9, 9), 0), 0);
    }

    #[test]
    fn keys_enumerates_every_inserted_cell() {
        let mut map = HexMap::new();
        let cells = [HexPos::new(0, 0), HexPos::new(1, 1), HexPos::new(-2, 0)];
        for (i, &c) in cells.iter().enumerate() {
            map.insert(c, i);
        }
        let mut seen: Vec<HexPos> = map.keys().collect();
        assert_eq!(seen.len(), cells.len());
        for c in cells {
            assert!(seen.contains(&c));
        }
        // Enumeration is restartable.
        seen.clear();
        seen.extend(map.keys());
        assert_eq!(seen.len(), cells.len());
    }
}
