//! Console client for a tactical combat session.
//!
//! The `tactics` binary is the composition root: it loads configuration and
//! content, builds the runtime, and drives it from stdin through [`Console`].
//!
//! - [`config`] reads the environment
//! - [`logging`] installs the tracing subscriber
//! - [`console`] parses and dispatches commands

pub mod config;
pub mod console;
pub mod logging;

pub use config::ClientConfig;
pub use console::{Console, ConsoleCommand, ParseError};
