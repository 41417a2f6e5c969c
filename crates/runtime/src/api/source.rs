//! Asynchronous abstraction over an external state authority.
//!
//! A blockchain contract or game server can own the canonical positions and
//! stats of some combatants. Implement [`StateSource`] for it and hand it to
//! [`crate::RuntimeBuilder::state_source`]; the mirror worker polls it and
//! writes changes into the session.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use tactics_core::{CombatantId, Position, Stats};

use super::errors::MirrorError;

/// Authoritative state of one combatant as reported by the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorState {
    pub id: CombatantId,
    pub position: Position,
    pub stats: Stats,
}

#[async_trait]
pub trait StateSource: Send + Sync {
    /// Current state of every combatant the source knows about.
    async fn fetch(&self) -> std::result::Result<Vec<MirrorState>, MirrorError>;
}
