//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and rejected session commands so
//! clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use tactics_core::{CommandError, ErrorSeverity, GameError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires a turn controller before building")]
    MissingController,

    /// The session rejected the request; its state is unchanged.
    #[error(transparent)]
    Command(#[from] CommandError),
}

impl RuntimeError {
    /// Rejected commands keep their own severity; plumbing failures are internal.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Command(error) => error.severity(),
            _ => ErrorSeverity::Internal,
        }
    }

    /// The rejection, when the session refused the request.
    pub fn as_command(&self) -> Option<&CommandError> {
        match self {
            RuntimeError::Command(error) => Some(error),
            _ => None,
        }
    }
}

/// Failures reported by an external [`super::StateSource`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MirrorError {
    #[error("state source unavailable: {0}")]
    Unavailable(String),

    #[error("state source returned malformed data: {0}")]
    Decode(String),
}
