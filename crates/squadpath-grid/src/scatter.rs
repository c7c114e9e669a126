//! Random obstacle placement.

use rand::{Rng, RngExt};
use squadpath_core::Point;

use crate::grid::TileGrid;

/// Settings for [`scatter_obstacles`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScatterConfig {
    /// Chance (0.0–1.0) for each tile to become occupied. Clamped.
    pub density: f64,
    /// Tiles that are never touched, e.g. unit positions and destinations.
    pub keep_clear: Vec<Point>,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            density: 0.25,
            keep_clear: Vec::new(),
        }
    }
}

/// Mark random tiles of `grid` occupied.
///
/// Tiles that are already occupied stay occupied. Returns the number of
/// tiles newly marked.
pub fn scatter_obstacles<R: Rng + ?Sized>(
    grid: &mut TileGrid,
    rng: &mut R,
    config: &ScatterConfig,
) -> usize {
    let density = if config.density.is_nan() {
        0.0
    } else {
        config.density.clamp(0.0, 1.0)
    };
    let mut placed = 0usize;
    for p in grid.bounds() {
        if config.keep_clear.contains(&p) {
            continue;
        }
        if rng.random_bool(density) && !grid.is_occupied(p) {
            grid.set_occupied(p);
            placed += 1;
        }
    }
    log::debug!(
        "scattered {placed} obstacles over {} tiles (density {density})",
        grid.bounds().len()
    );
    placed
}
