//! In-memory tile maps for squadpath: a bounded occupancy grid, ASCII
//! layouts, and random obstacle scatter.

pub mod grid;
pub mod layout;
pub mod scatter;

pub use grid::TileGrid;
pub use layout::{Layout, LayoutError, render_route};
pub use scatter::{ScatterConfig, scatter_obstacles};
