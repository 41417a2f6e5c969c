//! Deterministic tactical grid-combat rules.
//!
//! `tactics-core` defines the canonical rules (tile walkability, reachable
//! tiles, targeting, damage) and the phase state machine that gates them. It
//! is synchronous and free of I/O; all state mutation flows through
//! [`engine::TurnController`], and drivers such as the `runtime` crate depend
//! on the types re-exported here.
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod movement;
pub mod state;
pub mod targeting;

pub use combat::{DamageParams, DamageResult, calculate_damage, resolve_attack};
pub use config::RulesConfig;
pub use engine::{
    CommandError, MoveError, Notification, Notifications, Request, ResolveError, TargetError,
    TurnController,
};
pub use env::{GridError, MapDimensions, MapOracle, Tile, TileGrid, TileKind};
pub use error::{ErrorSeverity, GameError};
pub use movement::{ReachableSet, reachable_tiles};
pub use state::{
    ActionKind, Combatant, CombatantId, DamageTaken, Faction, Phase, Position, Rgb, Roster,
    RosterError, Stats, StatsOverride, TurnState, health_bar_color,
};
pub use targeting::{DistanceMetric, range_for, valid_targets};
