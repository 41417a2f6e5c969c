//! Worker tasks that back the runtime orchestration.
//!
//! The session worker executes turn-controller commands, while the mirror
//! worker keeps the session in step with an external state authority.

mod mirror;
mod session;

pub use mirror::MirrorWorker;
pub use session::{Command, SessionWorker};
