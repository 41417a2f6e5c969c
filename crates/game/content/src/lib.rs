//! Data-driven encounter content and loaders.
//!
//! This crate houses static content and the loaders that read it:
//! - Map layouts (RON, tile lists or ASCII rows)
//! - Encounter rosters (RON)
//! - Combat rules (TOML)
//!
//! Content is consumed when a session is built and never appears in the
//! turn state itself. All loaders deserialize straight into `tactics-core`
//! types through serde.

pub mod builtin;
pub mod loaders;

pub use loaders::{
    ConfigLoader, ContentFactory, Encounter, LoadResult, MapLoader, RosterLoader, UnitSpec,
};
