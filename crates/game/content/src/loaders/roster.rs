//! Encounter roster loader.
//!
//! A roster file is a RON list of units. Stats are partial and merged over
//! the rules' default stat block, so most entries only name what differs:
//!
//! ```ron
//! #![enable(implicit_some)]
//! [
//!     (name: "Hero", owner: "player1", faction: Player, position: (x: 1, y: 1)),
//!     (name: "Brute", faction: Enemy, position: (x: 6, y: 4), stats: (attack: 14, defense: 8)),
//! ]
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::{Combatant, CombatantId, Faction, Position, Roster, Stats, StatsOverride};

use crate::loaders::{LoadResult, read_file};

/// One unit entry in a roster file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSpec {
    /// Fixed identifier; a fresh one is generated when absent.
    #[serde(default)]
    pub id: Option<CombatantId>,
    pub name: String,
    #[serde(default)]
    pub owner: String,
    pub faction: Faction,
    pub position: Position,
    #[serde(default)]
    pub stats: StatsOverride,
}

impl UnitSpec {
    /// Builds the combatant, merging the stat override over `defaults`.
    pub fn to_combatant(&self, defaults: Stats) -> Combatant {
        let combatant = Combatant::new(&*self.name, &*self.owner, self.faction, self.position)
            .with_stats(self.stats.apply(defaults));
        match self.id {
            Some(id) => combatant.with_id(id),
            None => combatant,
        }
    }
}

/// Loader for roster data from RON files.
pub struct RosterLoader;

impl RosterLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<UnitSpec>> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| e.context(format!("in roster {}", path.display())))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<UnitSpec>> {
        let units: Vec<UnitSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        let mut names = HashSet::new();
        for unit in &units {
            if !names.insert(unit.name.to_lowercase()) {
                anyhow::bail!("duplicate unit name `{}`", unit.name);
            }
        }

        Ok(units)
    }

    /// Materializes `units` into a roster.
    ///
    /// Units that would start dead are skipped; repeated fixed ids are an
    /// error.
    pub fn build(units: &[UnitSpec], defaults: Stats) -> LoadResult<Roster> {
        let mut roster = Roster::default();
        for unit in units {
            let combatant = unit.to_combatant(defaults);
            if !combatant.is_alive() {
                continue;
            }
            roster
                .insert(combatant)
                .map_err(|e| anyhow::anyhow!("unit `{}`: {}", unit.name, e))?;
        }
        Ok(roster)
    }
}
