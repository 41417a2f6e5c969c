//! Line-based command console over a [`SessionHandle`].
//!
//! Each input line is parsed into a [`ConsoleCommand`] and dispatched to the
//! session; accepted requests print their notifications as JSON lines.

use std::str::{FromStr, SplitWhitespace};

use anyhow::Result;
use runtime::{RuntimeError, SessionHandle, SessionSnapshot};
use tactics_core::{
    ActionKind, Combatant, CombatantId, CommandError, GameError, MoveError, Notifications,
    Position, health_bar_color,
};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  list                      show every combatant
  reach <name>              tiles <name> can move to
  move <name> <x> <y>       move <name> (movement phase only)
  attack <name>             start targeting an attack from <name>
  ability <name>            start targeting an ability from <name>
  target <name>             confirm <name> as the target
  resolve                   resolve the confirmed action
  cancel                    abandon targeting
  phase                     show the turn state
  help                      show this text
  quit                      exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    List,
    Reach { name: String },
    Move { name: String, destination: Position },
    Begin { name: String, action: ActionKind },
    Target { name: String },
    Resolve,
    Cancel,
    Phase,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,

    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),

    #[error("`{command}` needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("`{0}` is not a coordinate")]
    InvalidCoordinate(String),
}

impl FromStr for ConsoleCommand {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let head = words.next().ok_or(ParseError::Empty)?.to_ascii_lowercase();

        let command = match head.as_str() {
            "list" | "ls" => ConsoleCommand::List,
            "reach" => ConsoleCommand::Reach {
                name: name_arg(&mut words, "reach")?,
            },
            "move" => {
                let name = name_arg(&mut words, "move")?;
                let mut coordinate = || -> Result<i32, ParseError> {
                    let word = words.next().ok_or(ParseError::MissingArgument {
                        command: "move",
                        expected: "<x> <y>",
                    })?;
                    word.parse()
                        .map_err(|_| ParseError::InvalidCoordinate(word.to_owned()))
                };
                let x = coordinate()?;
                let y = coordinate()?;
                ConsoleCommand::Move {
                    name,
                    destination: Position::new(x, y),
                }
            }
            "attack" => ConsoleCommand::Begin {
                name: name_arg(&mut words, "attack")?,
                action: ActionKind::Attack,
            },
            "ability" => ConsoleCommand::Begin {
                name: name_arg(&mut words, "ability")?,
                action: ActionKind::Ability,
            },
            "target" => ConsoleCommand::Target {
                name: name_arg(&mut words, "target")?,
            },
            "resolve" => ConsoleCommand::Resolve,
            "cancel" => ConsoleCommand::Cancel,
            "phase" => ConsoleCommand::Phase,
            "help" | "?" => ConsoleCommand::Help,
            "quit" | "exit" => ConsoleCommand::Quit,
            other => return Err(ParseError::Unknown(other.to_owned())),
        };

        Ok(command)
    }
}

fn name_arg(words: &mut SplitWhitespace<'_>, command: &'static str) -> Result<String, ParseError> {
    words
        .next()
        .map(str::to_owned)
        .ok_or(ParseError::MissingArgument {
            command,
            expected: "a combatant name",
        })
}

/// Executes console commands against a running session.
pub struct Console {
    handle: SessionHandle,
}

impl Console {
    pub fn new(handle: SessionHandle) -> Self {
        Self { handle }
    }

    /// Runs one command and returns the lines to print.
    ///
    /// Rejected requests become output lines; only a broken session is an
    /// error.
    pub async fn dispatch(&self, command: ConsoleCommand) -> Result<Vec<String>> {
        let snapshot = self.handle.snapshot().await?;

        let result = match command {
            ConsoleCommand::List => return Ok(list(&snapshot)),
            ConsoleCommand::Phase => return Ok(phase(&snapshot)),
            ConsoleCommand::Help => return Ok(vec![HELP.to_owned()]),
            ConsoleCommand::Quit => return Ok(Vec::new()),
            ConsoleCommand::Reach { name } => {
                let Some(unit) = find(&snapshot, &name) else {
                    return Ok(vec![unknown(&name)]);
                };
                let Some(reach) = snapshot.reachable_for(unit.id) else {
                    return Ok(vec![format!("{} cannot move", unit.name)]);
                };
                let tiles: Vec<String> = reach.sorted().iter().map(|p| p.to_string()).collect();
                return Ok(vec![format!(
                    "{} can reach {} tiles: {}",
                    unit.name,
                    tiles.len(),
                    tiles.join(" ")
                )]);
            }
            ConsoleCommand::Move { name, destination } => match resolve_id(&snapshot, &name) {
                Ok(id) => self.handle.request_move(id, destination).await,
                Err(line) => return Ok(vec![line]),
            },
            ConsoleCommand::Begin { name, action } => match resolve_id(&snapshot, &name) {
                Ok(id) => self.handle.begin_targeting(id, action).await,
                Err(line) => return Ok(vec![line]),
            },
            ConsoleCommand::Target { name } => match resolve_id(&snapshot, &name) {
                Ok(id) => self.handle.confirm_target(id).await,
                Err(line) => return Ok(vec![line]),
            },
            ConsoleCommand::Resolve => self.handle.resolve().await,
            ConsoleCommand::Cancel => self.handle.cancel().await,
        };

        match result {
            Ok(notifications) => render_notifications(&notifications),
            Err(RuntimeError::Command(error)) => Ok(vec![rejection(&error)]),
            Err(error) => Err(error.into()),
        }
    }
}

fn find<'a>(snapshot: &'a SessionSnapshot, name: &str) -> Option<&'a Combatant> {
    snapshot.roster().find_by_name(name)
}

fn resolve_id(snapshot: &SessionSnapshot, name: &str) -> Result<CombatantId, String> {
    find(snapshot, name).map(|unit| unit.id).ok_or_else(|| unknown(name))
}

fn unknown(name: &str) -> String {
    format!("no combatant named `{}`", name)
}

fn name_of(snapshot: &SessionSnapshot, id: CombatantId) -> String {
    snapshot
        .roster()
        .get(id)
        .map_or_else(|| id.to_string(), |unit| unit.name.clone())
}

fn list(snapshot: &SessionSnapshot) -> Vec<String> {
    let mut units: Vec<&Combatant> = snapshot.roster().iter().collect();
    units.sort_by(|a, b| a.name.cmp(&b.name));
    units
        .into_iter()
        .map(|unit| {
            let stats = unit.stats();
            format!(
                "{:<10} {} {:<6} at {:<8} hp {}/{} atk {} def {} mov {} rng {}/{} #{:06X}",
                unit.name,
                unit.id,
                unit.faction,
                unit.position.to_string(),
                stats.hp,
                stats.max_hp,
                stats.attack,
                stats.defense,
                stats.movement,
                stats.attack_range,
                stats.ability_range,
                health_bar_color(unit.faction, unit.hp_percent()).0,
            )
        })
        .collect()
}

fn phase(snapshot: &SessionSnapshot) -> Vec<String> {
    let turn = snapshot.turn();
    let mut line = format!("phase {}", turn.phase);
    if let (Some(source), Some(action)) = (turn.active_source, turn.active_action) {
        line.push_str(&format!(", {} uses {}", name_of(snapshot, source), action));
    }
    if let Some(target) = turn.target {
        line.push_str(&format!(" on {}", name_of(snapshot, target)));
    }
    let mut lines = vec![line];
    if !snapshot.cached_targets().is_empty() {
        let names: Vec<String> = snapshot
            .cached_targets()
            .iter()
            .map(|&id| name_of(snapshot, id))
            .collect();
        lines.push(format!("targets: {}", names.join(", ")));
    }
    lines
}

fn render_notifications(notifications: &Notifications) -> Result<Vec<String>> {
    if notifications.is_empty() {
        return Ok(vec!["ok (no changes)".to_owned()]);
    }
    notifications
        .iter()
        .map(|notification| Ok(serde_json::to_string(notification)?))
        .collect()
}

fn rejection(error: &CommandError) -> String {
    let mut line = format!("rejected [{}]: {}", error.error_code(), error);
    if let CommandError::Move(
        MoveError::Unreachable { origin, .. } | MoveError::Occupied { origin, .. },
    ) = error
    {
        line.push_str(&format!(" (stays at {})", origin));
    }
    line
}
