//! Tile-state queries.
//!
//! The [`TileStateProvider`] trait is the only thing a route search needs
//! from a tile map. Map storage, occupancy bookkeeping and rendering stay
//! with whoever implements it.

use crate::Point;

/// Occupancy of a single tile, as seen at query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileState {
    /// Walkable.
    Free,
    /// Inside the map but currently taken by a unit or obstacle.
    Occupied,
    /// Outside the map.
    OutOfBounds,
}

impl TileState {
    /// Whether a unit may step onto the tile right now.
    #[inline]
    pub fn is_free(self) -> bool {
        self == Self::Free
    }
}

/// Read-only tile-state query.
///
/// Implementations must tolerate being called many times per search and,
/// when shared between threads, concurrent read-only calls. The answer may
/// change between searches; a search never caches it across calls.
pub trait TileStateProvider {
    /// State of the tile at `p`.
    fn tile_state(&self, p: Point) -> TileState;
}

impl<F> TileStateProvider for F
where
    F: Fn(Point) -> TileState,
{
    #[inline]
    fn tile_state(&self, p: Point) -> TileState {
        self(p)
    }
}
