//! Outbound notifications produced by accepted requests.
//!
//! The controller never talks to renderers or UI directly; it returns these
//! in the order the changes happened and the driver fans them out.

use crate::state::{CombatantId, Phase, Position, Stats};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "snake_case"))]
pub enum Notification {
    PhaseChanged {
        phase: Phase,
    },
    CombatantSpawned {
        id: CombatantId,
        position: Position,
    },
    CombatantMoved {
        id: CombatantId,
        position: Position,
    },
    DamageApplied {
        defender: CombatantId,
        amount: u32,
        died: bool,
    },
    StatsChanged {
        id: CombatantId,
        stats: Stats,
    },
    CombatantRemoved {
        id: CombatantId,
    },
}

impl Notification {
    /// Combatant the notification is about, if any.
    pub fn subject(&self) -> Option<CombatantId> {
        match *self {
            Notification::PhaseChanged { .. } => None,
            Notification::CombatantSpawned { id, .. }
            | Notification::CombatantMoved { id, .. }
            | Notification::StatsChanged { id, .. }
            | Notification::CombatantRemoved { id } => Some(id),
            Notification::DamageApplied { defender, .. } => Some(defender),
        }
    }
}
