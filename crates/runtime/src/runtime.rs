//! High-level runtime orchestrator.
//!
//! The runtime owns background workers, wires up command/event channels, and
//! exposes a builder-based API for clients to drive the session.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Duration;

use tactics_core::TurnController;

use crate::api::{Result, RuntimeError, SessionHandle, StateSource};
use crate::events::EventBus;
use crate::workers::{Command, MirrorWorker, SessionWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// How often the mirror worker polls its state source.
    pub mirror_poll_interval: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            command_buffer_size: 32,
            mirror_poll_interval: Duration::from_millis(1000),
        }
    }
}

/// Main runtime that orchestrates the combat session
///
/// Runtime owns workers and coordinates execution.
/// [`SessionHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: SessionHandle,

    session_worker_handle: JoinHandle<()>,
    mirror_worker_handle: Option<JoinHandle<()>>,
    mirror_shutdown: Option<oneshot::Sender<()>>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// Stops the mirror first, then waits for the session worker to drain.
    /// Handles cloned out of the runtime keep the session alive until they
    /// are dropped too.
    pub async fn shutdown(self) -> Result<()> {
        if let Some(shutdown) = self.mirror_shutdown {
            let _ = shutdown.send(());
        }
        if let Some(mirror) = self.mirror_worker_handle {
            mirror.await.map_err(RuntimeError::WorkerJoin)?;
        }

        drop(self.handle);

        self.session_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    controller: Option<TurnController>,
    state_source: Option<Arc<dyn StateSource>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            controller: None,
            state_source: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide the session's initial state (required)
    pub fn controller(mut self, controller: TurnController) -> Self {
        self.controller = Some(controller);
        self
    }

    /// Mirror an external authority into the session (optional)
    pub fn state_source(mut self, source: impl StateSource + 'static) -> Self {
        self.state_source = Some(Arc::new(source));
        self
    }

    /// Build the runtime and spawn its workers
    pub async fn build(self) -> Result<Runtime> {
        let controller = self.controller.ok_or(RuntimeError::MissingController)?;

        let (command_tx, command_rx) =
            mpsc::channel::<Command>(self.config.command_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = SessionHandle::new(command_tx, event_bus.clone());

        let session_worker = SessionWorker::new(controller, command_rx, event_bus);
        let session_worker_handle = tokio::spawn(async move {
            session_worker.run().await;
        });

        let (mirror_worker_handle, mirror_shutdown) = match self.state_source {
            Some(source) => {
                let (shutdown_tx, shutdown_rx) = oneshot::channel();
                let poll_interval = self.config.mirror_poll_interval.max(Duration::from_millis(1));
                let mirror_worker =
                    MirrorWorker::new(source, handle.clone(), poll_interval, shutdown_rx);
                let join = tokio::spawn(async move {
                    mirror_worker.run().await;
                });
                (Some(join), Some(shutdown_tx))
            }
            None => (None, None),
        };

        Ok(Runtime {
            handle,
            session_worker_handle,
            mirror_worker_handle,
            mirror_shutdown,
        })
    }
}
