//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration and workers.

pub mod errors;
pub mod handle;
pub mod source;

pub use errors::{MirrorError, Result, RuntimeError};
pub use handle::{SessionHandle, SessionSnapshot};
pub use source::{MirrorState, StateSource};
