//! Client configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;

use runtime::RuntimeConfig;

/// Configuration required to assemble the encounter, runtime and logging.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    /// RON map file; the built-in arena map when unset.
    pub map_path: Option<PathBuf>,
    /// RON roster file; the built-in arena roster when unset.
    pub roster_path: Option<PathBuf>,
    /// TOML rules file; default rules when unset.
    pub rules_path: Option<PathBuf>,
    pub runtime: RuntimeConfig,
    /// Also write logs to a daily rolling file in this directory.
    pub log_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TACTICS_MAP` - Map file (default: built-in arena)
    /// - `TACTICS_ROSTER` - Roster file (default: built-in arena)
    /// - `TACTICS_RULES` - Rules file (default: built-in rules)
    /// - `TACTICS_COMMAND_BUFFER` - Session command queue size (default: 32)
    /// - `TACTICS_EVENT_BUFFER` - Per-topic event capacity (default: 100)
    /// - `TACTICS_LOG_DIR` - Directory for log files (default: stderr only)
    pub fn from_env() -> Self {
        let mut config = Self {
            map_path: read_path("TACTICS_MAP"),
            roster_path: read_path("TACTICS_ROSTER"),
            rules_path: read_path("TACTICS_RULES"),
            log_dir: read_path("TACTICS_LOG_DIR"),
            ..Self::default()
        };

        if let Some(capacity) = read_env::<usize>("TACTICS_COMMAND_BUFFER") {
            config.runtime.command_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("TACTICS_EVENT_BUFFER") {
            config.runtime.event_buffer_size = capacity.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_path(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
