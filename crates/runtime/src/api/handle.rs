//! Cloneable façade for issuing commands to the session.
//!
//! [`SessionHandle`] hides channel plumbing and offers async helpers for each
//! turn-controller operation, plus topic subscriptions on the event bus.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use tactics_core::{
    ActionKind, Combatant, CombatantId, Notifications, Position, Request, Stats, TurnController,
};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Detached copy of the session state. Mutating it does not touch the session.
pub type SessionSnapshot = TurnController;

/// Client-facing handle to interact with the session
#[derive(Clone)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl SessionHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Execute a request against the session.
    ///
    /// Returns the notifications it produced, which are also published on the
    /// event bus. A rejected request surfaces as [`RuntimeError::Command`].
    pub async fn execute(&self, request: Request) -> Result<Notifications> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Execute {
                request,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    pub async fn spawn(&self, combatant: Combatant) -> Result<Notifications> {
        self.execute(Request::Spawn { combatant }).await
    }

    pub async fn begin_targeting(
        &self,
        source: CombatantId,
        action: ActionKind,
    ) -> Result<Notifications> {
        self.execute(Request::BeginTargeting { source, action }).await
    }

    pub async fn confirm_target(&self, target: CombatantId) -> Result<Notifications> {
        self.execute(Request::ConfirmTarget { target }).await
    }

    pub async fn cancel(&self) -> Result<Notifications> {
        self.execute(Request::Cancel).await
    }

    pub async fn resolve(&self) -> Result<Notifications> {
        self.execute(Request::Resolve).await
    }

    pub async fn request_move(
        &self,
        combatant: CombatantId,
        destination: Position,
    ) -> Result<Notifications> {
        self.execute(Request::RequestMove {
            combatant,
            destination,
        })
        .await
    }

    /// Unconditional position write from an external authority.
    pub async fn set_combatant_position(
        &self,
        combatant: CombatantId,
        position: Position,
    ) -> Result<Notifications> {
        self.execute(Request::SetPosition {
            combatant,
            position,
        })
        .await
    }

    /// Unconditional stats write from an external authority.
    pub async fn set_combatant_stats(
        &self,
        combatant: CombatantId,
        stats: Stats,
    ) -> Result<Notifications> {
        self.execute(Request::SetStats { combatant, stats }).await
    }

    pub async fn heal(&self, combatant: CombatantId, amount: u32) -> Result<Notifications> {
        self.execute(Request::Heal { combatant, amount }).await
    }

    pub async fn reset(&self) -> Result<Notifications> {
        self.execute(Request::Reset).await
    }

    /// Query the current session state (read-only copy)
    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QuerySnapshot { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Phase` - Phase transitions
    /// - `Topic::Combat` - Damage applications
    /// - `Topic::Roster` - Spawns, moves, stat writes and removals
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// True once the session worker has stopped.
    pub fn is_closed(&self) -> bool {
        self.command_tx.is_closed()
    }
}
