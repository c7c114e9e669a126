//! **squadpath-core**: shared types for tile-by-tile unit routing.
//!
//! This crate provides the coordinate primitives ([`Point`], [`Range`]) and
//! the one query the pathfinder needs from a tile map: [`TileStateProvider`].
//! Map storage itself lives elsewhere (see `squadpath-grid`).

pub mod geom;
pub mod tiles;

pub use geom::{Point, Range};
pub use tiles::{TileState, TileStateProvider};
