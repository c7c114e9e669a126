//! A bounded occupancy grid.
//!
//! [`TileGrid`] answers tile-state queries for a rectangle of tiles: each
//! tile inside is free or occupied, everything outside is out of bounds.
//! Storage is a plain owned buffer, so a `&TileGrid` can be shared between
//! threads running independent searches.

use squadpath_core::{Point, Range, TileState, TileStateProvider};

/// A rectangle of tiles, each either free or occupied.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "TileGridData"))]
pub struct TileGrid {
    bounds: Range,
    /// One flag per tile of `bounds`, row-major, bottom row first.
    occupied: Vec<bool>,
}

/// Unchecked serialized form of a [`TileGrid`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct TileGridData {
    bounds: Range,
    occupied: Vec<bool>,
}

#[cfg(feature = "serde")]
impl TryFrom<TileGridData> for TileGrid {
    type Error = String;

    fn try_from(data: TileGridData) -> Result<Self, Self::Error> {
        if data.occupied.len() != data.bounds.len() {
            return Err(format!(
                "tile grid {}x{} needs {} occupancy flags, got {}",
                data.bounds.width(),
                data.bounds.height(),
                data.bounds.len(),
                data.occupied.len()
            ));
        }
        Ok(Self {
            bounds: data.bounds,
            occupied: data.occupied,
        })
    }
}

impl TileGrid {
    /// Create a `width` × `height` grid of free tiles with its lower-left
    /// corner at the origin.
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_range(Range::new(0, 0, width.max(0), height.max(0)))
    }

    /// Create a grid of free tiles covering `bounds`.
    pub fn with_range(bounds: Range) -> Self {
        Self {
            bounds,
            occupied: vec![false; bounds.len()],
        }
    }

    /// Returns the bounding range of this grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Width of this grid.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Height of this grid.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Whether this grid contains the given point.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        let Range { min, max } = self.bounds;
        let x = p.x.abs_diff(min.x) as usize;
        let y = p.y.abs_diff(min.y) as usize;
        Some(y * max.x.abs_diff(min.x) as usize + x)
    }

    /// Mark the tile at `p` occupied. Does nothing if out of bounds.
    pub fn set_occupied(&mut self, p: Point) {
        self.set(p, true);
    }

    /// Mark the tile at `p` free. Does nothing if out of bounds.
    pub fn set_free(&mut self, p: Point) {
        self.set(p, false);
    }

    /// Set the occupancy of the tile at `p`. Does nothing if out of bounds.
    pub fn set(&mut self, p: Point, occupied: bool) {
        if let Some(i) = self.index(p) {
            self.occupied[i] = occupied;
        }
    }

    /// Whether the tile at `p` is inside the grid and occupied.
    pub fn is_occupied(&self, p: Point) -> bool {
        self.index(p).is_some_and(|i| self.occupied[i])
    }

    /// Mark every tile occupied (`true`) or free (`false`).
    pub fn fill(&mut self, occupied: bool) {
        self.occupied.fill(occupied);
    }

    /// Number of occupied tiles.
    pub fn occupied_count(&self) -> usize {
        self.occupied.iter().filter(|&&o| o).count()
    }
}

impl TileStateProvider for TileGrid {
    fn tile_state(&self, p: Point) -> TileState {
        match self.index(p) {
            None => TileState::OutOfBounds,
            Some(i) if self.occupied[i] => TileState::Occupied,
            Some(_) => TileState::Free,
        }
    }
}
