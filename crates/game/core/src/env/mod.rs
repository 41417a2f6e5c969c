//! Read-only world data.
//!
//! The map layout is owned outside the core (loaded by `tactics-content` or
//! handed in by the host) and exposed through the [`MapOracle`] seam so the
//! movement rules never depend on a concrete storage format.
mod map;

pub use map::{GridError, MapDimensions, MapOracle, Tile, TileGrid, TileKind};
