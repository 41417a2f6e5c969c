use strum::Display;

use super::CombatantId;

/// Interaction phase governing which requests are legal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    #[default]
    Movement,
    Targeting,
    Battle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum ActionKind {
    Attack,
    Ability,
    Move,
}

impl ActionKind {
    /// Whether the action goes through target selection.
    pub const fn is_targeted(self) -> bool {
        matches!(self, ActionKind::Attack | ActionKind::Ability)
    }
}

/// Turn bookkeeping for the match. Exactly one instance per session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    pub phase: Phase,
    pub active_source: Option<CombatantId>,
    pub active_action: Option<ActionKind>,
    /// Confirmed target; only set during [`Phase::Battle`].
    pub target: Option<CombatantId>,
}

impl TurnState {
    pub const fn new() -> Self {
        Self {
            phase: Phase::Movement,
            active_source: None,
            active_action: None,
            target: None,
        }
    }

    /// Whether `id` is the active source or the confirmed target.
    pub fn involves(&self, id: CombatantId) -> bool {
        self.active_source == Some(id) || self.target == Some(id)
    }
}
