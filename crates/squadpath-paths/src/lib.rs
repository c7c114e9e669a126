//! Tile-by-tile route search for squad movement.
//!
//! [`GridPathfinder`] runs a uniform-cost search over any
//! [`TileStateProvider`](squadpath_core::TileStateProvider) with 4-way
//! movement:
//!
//! - free tiles cost one step each;
//! - occupied tiles stay candidates at [`MAX_COST`] but are never walked
//!   through;
//! - equal-cost routes are broken towards the earliest discovered tile, with
//!   neighbours discovered up, down, left, right;
//! - an optional search radius ([`SearchConfig::max_radius`]) bounds the
//!   explored area around the start.
//!
//! Failures are reported as [`NoPath`] values. A found route is handed to
//! movement code through [`Waypoints`].
//!
//! ```
//! use squadpath_core::{Point, TileState};
//! use squadpath_paths::GridPathfinder;
//!
//! let tiles = |p: Point| {
//!     if (0..5).contains(&p.x) && (0..5).contains(&p.y) {
//!         TileState::Free
//!     } else {
//!         TileState::OutOfBounds
//!     }
//! };
//! let mut pf = GridPathfinder::new();
//! let path = pf.find_path(&tiles, Point::new(0, 0), Point::new(0, 2));
//! assert_eq!(path, Some(vec![Point::new(0, 1), Point::new(0, 2)]));
//! ```

mod config;
mod distance;
mod error;
mod node;
mod pathfinder;
mod waypoints;

pub use config::{SearchConfig, UNBOUNDED};
pub use distance::manhattan;
pub use error::NoPath;
pub use node::{MAX_COST, STEP_COST};
pub use pathfinder::{GridPathfinder, SearchStats};
pub use waypoints::Waypoints;
