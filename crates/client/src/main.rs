//! Tactics console binary.
//!
//! Main entry point for the tactics client.
//!
//! # Architecture
//!
//! This binary is the composition root that assembles:
//! 1. Encounter content (map, roster, rules) via `tactics-content`
//! 2. Runtime (session worker and event bus) via `Runtime::builder`
//! 3. A line-based console reading commands from stdin
//!
//! # Examples
//!
//! ```bash
//! # Built-in demo arena
//! cargo run -p tactics-client
//!
//! # Custom content and verbose session logs
//! TACTICS_MAP=data/maps/keep.ron TACTICS_ROSTER=data/rosters/keep.ron \
//!     RUST_LOG=runtime=debug cargo run -p tactics-client
//! ```

use anyhow::{Context, Result};
use runtime::{Runtime, Topic};
use tactics_client::{ClientConfig, Console, ConsoleCommand};
use tactics_content::Encounter;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::broadcast;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let config = ClientConfig::from_env();

    // 2. Setup logging; the guard flushes the log file on exit
    let _log_guard = tactics_client::logging::setup_logging(config.log_dir.as_deref())?;

    tracing::info!("Starting tactics client");

    // 3. Load the encounter
    let encounter = Encounter::from_paths(
        config.map_path.as_deref(),
        config.roster_path.as_deref(),
        config.rules_path.as_deref(),
    )
    .context("failed to load encounter")?;
    tracing::info!(
        width = encounter.grid.width(),
        height = encounter.grid.height(),
        units = encounter.units.len(),
        "Encounter loaded"
    );
    let controller = encounter.into_controller()?;

    // 4. Build the runtime
    let runtime = Runtime::builder()
        .config(config.runtime.clone())
        .controller(controller)
        .build()
        .await?;

    // 5. Trace everything the session publishes
    let handle = runtime.handle();
    for (topic, mut rx) in handle.subscribe_multiple(&Topic::ALL) {
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => tracing::debug!(
                        target: "tactics::events",
                        ?topic,
                        sequence = event.sequence,
                        notification = ?event.notification,
                        "Published"
                    ),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(
                            target: "tactics::events",
                            ?topic,
                            skipped,
                            "Subscriber lagged"
                        )
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
    }

    // 6. Drive it from stdin
    let console = Console::new(handle);
    run_console(&console).await?;

    drop(console);
    runtime.shutdown().await?;

    tracing::info!("Client shutdown complete");
    Ok(())
}

async fn run_console(console: &Console) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout
        .write_all(b"tactics console; type `help` for commands\n")
        .await?;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let output = match line.parse::<ConsoleCommand>() {
            Ok(ConsoleCommand::Quit) => break,
            Ok(command) => console.dispatch(command).await?,
            Err(error) => vec![error.to_string()],
        };

        for text in output {
            stdout.write_all(text.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
        }
        stdout.flush().await?;
    }

    Ok(())
}
