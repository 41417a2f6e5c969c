//! Mirror worker that tracks an external state authority.
//!
//! Polls a [`StateSource`] on a fixed interval and forwards only what changed
//! since the previous poll as unconditional position and stats writes.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::time::{self, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

use tactics_core::{CombatantId, GameError};

use crate::api::{MirrorState, RuntimeError, SessionHandle, StateSource};

/// Background worker that mirrors an external [`StateSource`] into the session.
pub struct MirrorWorker {
    source: Arc<dyn StateSource>,
    handle: SessionHandle,
    poll_interval: Duration,
    /// Last state seen per combatant, whether or not the session accepted it.
    /// Only ids present in the latest fetch are kept.
    last: HashMap<CombatantId, MirrorState>,
    shutdown_rx: oneshot::Receiver<()>,
}

impl MirrorWorker {
    pub fn new(
        source: Arc<dyn StateSource>,
        handle: SessionHandle,
        poll_interval: Duration,
        shutdown_rx: oneshot::Receiver<()>,
    ) -> Self {
        Self {
            source,
            handle,
            poll_interval,
            last: HashMap::new(),
            shutdown_rx,
        }
    }

    /// Main worker loop.
    ///
    /// Stops on the shutdown signal or once the session worker is gone.
    pub async fn run(mut self) {
        info!(
            target: "runtime::mirror",
            interval_ms = self.poll_interval.as_millis() as u64,
            "MirrorWorker started"
        );

        let mut ticker = time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = &mut self.shutdown_rx => break,
                _ = ticker.tick() => {
                    if self.poll().await.is_err() {
                        break;
                    }
                }
            }
        }

        info!(target: "runtime::mirror", "MirrorWorker stopped");
    }

    /// Fetches once and forwards the changes.
    ///
    /// Source errors are logged and skipped. Only a closed session is
    /// reported back.
    async fn poll(&mut self) -> Result<(), RuntimeError> {
        let states = match self.source.fetch().await {
            Ok(states) => states,
            Err(error) => {
                warn!(target: "runtime::mirror", error = %error, "State source fetch failed");
                return Ok(());
            }
        };

        let reported: HashSet<CombatantId> = states.iter().map(|state| state.id).collect();
        self.last.retain(|id, _| reported.contains(id));

        for state in states {
            let previous = self.last.insert(state.id, state);

            if previous.map(|p| p.position) != Some(state.position) {
                self.forward(
                    state.id,
                    "set_position",
                    self.handle
                        .set_combatant_position(state.id, state.position)
                        .await,
                )?;
            }
            if previous.map(|p| p.stats) != Some(state.stats) {
                self.forward(
                    state.id,
                    "set_stats",
                    self.handle.set_combatant_stats(state.id, state.stats).await,
                )?;
            }
        }

        Ok(())
    }

    fn forward<T>(
        &self,
        id: CombatantId,
        write: &'static str,
        result: crate::api::Result<T>,
    ) -> Result<(), RuntimeError> {
        match result {
            Ok(_) => {
                debug!(target: "runtime::mirror", combatant = %id, write, "Mirrored change");
                Ok(())
            }
            Err(RuntimeError::Command(error)) => {
                debug!(
                    target: "runtime::mirror",
                    combatant = %id,
                    write,
                    code = error.error_code(),
                    "Session ignored mirrored change"
                );
                Ok(())
            }
            Err(error) => Err(error),
        }
    }
}
