//! Runtime orchestration for a tactical combat session.
//!
//! This crate puts the synchronous [`tactics_core::TurnController`] behind a
//! single worker task so every input is serialized, fans its notifications
//! out over a topic-based event bus, and optionally mirrors an external state
//! authority into the session. Consumers embed [`Runtime`] and interact with
//! the session through [`SessionHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`workers`] keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{
    MirrorError, MirrorState, Result, RuntimeError, SessionHandle, SessionSnapshot, StateSource,
};
pub use events::{Event, EventBus, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
