use crate::state::{ActionKind, Combatant, CombatantId, Position, Stats};

/// Every mutating request the controller accepts, as a value.
///
/// Drivers that queue input (see the `runtime` crate) send these across a
/// channel and feed them to [`super::TurnController::execute`] one at a time.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "request", rename_all = "snake_case"))]
pub enum Request {
    Spawn {
        combatant: Combatant,
    },
    BeginTargeting {
        source: CombatantId,
        action: ActionKind,
    },
    ConfirmTarget {
        target: CombatantId,
    },
    Cancel,
    Resolve,
    RequestMove {
        combatant: CombatantId,
        destination: Position,
    },
    /// External authority write; bypasses movement rules.
    SetPosition {
        combatant: CombatantId,
        position: Position,
    },
    /// External authority write; bypasses phase gating.
    SetStats {
        combatant: CombatantId,
        stats: Stats,
    },
    Heal {
        combatant: CombatantId,
        amount: u32,
    },
    Reset,
}

impl Request {
    pub fn as_str(&self) -> &'static str {
        match self {
            Request::Spawn { .. } => "spawn",
            Request::BeginTargeting { .. } => "begin_targeting",
            Request::ConfirmTarget { .. } => "confirm_target",
            Request::Cancel => "cancel",
            Request::Resolve => "resolve",
            Request::RequestMove { .. } => "request_move",
            Request::SetPosition { .. } => "set_position",
            Request::SetStats { .. } => "set_stats",
            Request::Heal { .. } => "heal",
            Request::Reset => "reset",
        }
    }
}
