//! Session worker that owns the authoritative [`TurnController`].
//!
//! Receives commands from [`crate::SessionHandle`], executes them one at a
//! time, and publishes the resulting notifications to the EventBus.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use tactics_core::{
    ErrorSeverity, GameError, Notification, Notifications, Request, TurnController,
};

use crate::api::{Result, RuntimeError, SessionSnapshot};
use crate::events::{Event, EventBus};

/// Commands that can be sent to the session worker
pub enum Command {
    /// Execute a request against the turn controller.
    Execute {
        request: Request,
        reply: oneshot::Sender<Result<Notifications>>,
    },
    /// Query the current session state (read-only copy).
    QuerySnapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
}

/// Background task that processes session commands.
///
/// The worker is the only owner of the controller, so every request is
/// applied in arrival order and never interleaves with another.
pub struct SessionWorker {
    controller: TurnController,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    sequence: u64,
}

impl SessionWorker {
    /// Creates a new session worker.
    pub fn new(
        controller: TurnController,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        info!(
            target: "runtime::session",
            combatants = controller.roster().len(),
            width = controller.grid().width(),
            height = controller.grid().height(),
            "SessionWorker initialized"
        );

        Self {
            controller,
            command_rx,
            event_bus,
            sequence: 0,
        }
    }

    /// Main worker loop. Ends when every handle has been dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        info!(target: "runtime::session", "SessionWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Execute { request, reply } => {
                let result = self.handle_request(request);
                if reply.send(result).is_err() {
                    debug!("Execute reply channel closed (caller dropped)");
                }
            }
            Command::QuerySnapshot { reply } => {
                if reply.send(self.controller.clone()).is_err() {
                    debug!("QuerySnapshot reply channel closed (caller dropped)");
                }
            }
        }
    }

    /// Applies one request and publishes what it produced.
    ///
    /// Rejections are returned to the caller and logged. The one rejection
    /// that still changes state (a stale reference during resolution clears
    /// targeting) publishes the resulting phase change.
    fn handle_request(&mut self, request: Request) -> Result<Notifications> {
        let kind = request.as_str();
        let phase_before = self.controller.phase();

        match self.controller.execute(request) {
            Ok(notifications) => {
                debug!(
                    target: "runtime::session",
                    request = kind,
                    notifications = notifications.len(),
                    phase = %self.controller.phase(),
                    "Request accepted"
                );
                self.publish(&notifications);
                Ok(notifications)
            }
            Err(error) => {
                match error.severity() {
                    ErrorSeverity::Internal => warn!(
                        target: "runtime::session",
                        request = kind,
                        code = error.error_code(),
                        error = %error,
                        phase = %self.controller.phase(),
                        "Request rejected"
                    ),
                    _ => debug!(
                        target: "runtime::session",
                        request = kind,
                        code = error.error_code(),
                        error = %error,
                        "Request rejected"
                    ),
                }
                let phase = self.controller.phase();
                if phase != phase_before {
                    self.publish(&[Notification::PhaseChanged { phase }]);
                }
                Err(RuntimeError::Command(error))
            }
        }
    }

    fn publish(&mut self, notifications: &[Notification]) {
        for &notification in notifications {
            self.event_bus.publish(Event {
                sequence: self.sequence,
                notification,
            });
            self.sequence += 1;
        }
    }
}
