//! Session state representation.
//!
//! This module owns the data structures that describe combatants, the roster
//! and turn bookkeeping. Drivers clone or query this state but mutate it
//! exclusively through [`crate::engine::TurnController`].
mod combatant;
mod common;
mod roster;
mod turn;

pub use combatant::{Combatant, DamageTaken, Faction, Rgb, Stats, StatsOverride, health_bar_color};
pub use common::{CombatantId, Position};
pub use roster::{Roster, RosterError};
pub use turn::{ActionKind, Phase, TurnState};
