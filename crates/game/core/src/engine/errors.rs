//! Rejection types for turn-controller requests.
//!
//! A rejected request leaves the session exactly as it was, except
//! [`ResolveError::StaleReference`], which also drops the broken targeting
//! state so the session can continue.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{ActionKind, CombatantId, Phase, Position, RosterError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("moves are only legal during MOVEMENT (current phase: {phase})")]
    WrongPhase { phase: Phase },

    #[error("combatant {0} not found")]
    UnknownCombatant(CombatantId),

    #[error("combatant {0} is dead")]
    Dead(CombatantId),

    #[error("destination {destination} is not reachable from {origin}")]
    Unreachable {
        origin: Position,
        destination: Position,
    },

    #[error("destination {destination} is occupied by {by}")]
    Occupied {
        origin: Position,
        destination: Position,
        by: CombatantId,
    },
}

impl MoveError {
    /// Where the mover still stands, so callers can snap visuals back.
    pub fn origin(&self) -> Option<Position> {
        match self {
            MoveError::Unreachable { origin, .. } | MoveError::Occupied { origin, .. } => {
                Some(*origin)
            }
            _ => None,
        }
    }
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            MoveError::WrongPhase { .. } | MoveError::Occupied { .. } => {
                ErrorSeverity::Recoverable
            }
            MoveError::UnknownCombatant(_) | MoveError::Dead(_) | MoveError::Unreachable { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            MoveError::WrongPhase { .. } => "MOVE_WRONG_PHASE",
            MoveError::UnknownCombatant(_) => "MOVE_UNKNOWN_COMBATANT",
            MoveError::Dead(_) => "MOVE_DEAD",
            MoveError::Unreachable { .. } => "MOVE_UNREACHABLE",
            MoveError::Occupied { .. } => "MOVE_OCCUPIED",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetError {
    #[error("request not legal during {phase}")]
    WrongPhase { phase: Phase },

    #[error("source {0} not found")]
    UnknownSource(CombatantId),

    #[error("source {0} is dead")]
    SourceDead(CombatantId),

    #[error("{0} actions do not select targets")]
    NotTargetable(ActionKind),

    #[error("{0} is not a valid target")]
    InvalidTarget(CombatantId),
}

impl GameError for TargetError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            TargetError::WrongPhase { .. } => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            TargetError::WrongPhase { .. } => "TARGET_WRONG_PHASE",
            TargetError::UnknownSource(_) => "TARGET_UNKNOWN_SOURCE",
            TargetError::SourceDead(_) => "TARGET_SOURCE_DEAD",
            TargetError::NotTargetable(_) => "TARGET_NOT_TARGETABLE",
            TargetError::InvalidTarget(_) => "TARGET_INVALID_TARGET",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolveError {
    #[error("resolution is only legal during BATTLE (current phase: {phase})")]
    WrongPhase { phase: Phase },

    #[error("battle participant {id:?} is gone; targeting was cleared")]
    StaleReference { id: Option<CombatantId> },
}

impl GameError for ResolveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ResolveError::WrongPhase { .. } => ErrorSeverity::Recoverable,
            ResolveError::StaleReference { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ResolveError::WrongPhase { .. } => "RESOLVE_WRONG_PHASE",
            ResolveError::StaleReference { .. } => "RESOLVE_STALE_REFERENCE",
        }
    }
}

/// Any rejection produced by [`super::TurnController::execute`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandError {
    #[error("move rejected: {0}")]
    Move(#[from] MoveError),

    #[error("targeting rejected: {0}")]
    Target(#[from] TargetError),

    #[error("resolution rejected: {0}")]
    Resolve(#[from] ResolveError),

    #[error("roster update rejected: {0}")]
    Roster(#[from] RosterError),
}

impl GameError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CommandError::Move(e) => e.severity(),
            CommandError::Target(e) => e.severity(),
            CommandError::Resolve(e) => e.severity(),
            CommandError::Roster(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            CommandError::Move(e) => e.error_code(),
            CommandError::Target(e) => e.error_code(),
            CommandError::Resolve(e) => e.error_code(),
            CommandError::Roster(e) => e.error_code(),
        }
    }
}
