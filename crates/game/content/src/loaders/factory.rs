//! Content factory for assembling encounters from data files.

use std::path::{Path, PathBuf};

use tactics_core::{Roster, RulesConfig, TileGrid, TurnController};

use crate::loaders::{ConfigLoader, LoadResult, MapLoader, RosterLoader, UnitSpec};

/// Everything needed to start a session: terrain, units and rules.
#[derive(Debug, Clone)]
pub struct Encounter {
    pub grid: TileGrid,
    pub units: Vec<UnitSpec>,
    pub rules: RulesConfig,
}

impl Encounter {
    /// Builds the live roster, merging unit overrides over the rules' defaults.
    pub fn roster(&self) -> LoadResult<Roster> {
        RosterLoader::build(&self.units, self.rules.default_stats)
    }

    /// Consumes the encounter into a controller ready for play.
    pub fn into_controller(self) -> LoadResult<TurnController> {
        let roster = self.roster()?;
        Ok(TurnController::with_roster(self.grid, roster, self.rules))
    }

    /// Loads each part from its file when given, falling back to the
    /// built-in demo arena for any part left out.
    pub fn from_paths(
        map: Option<&Path>,
        roster: Option<&Path>,
        rules: Option<&Path>,
    ) -> LoadResult<Self> {
        let grid = match map {
            Some(path) => MapLoader::load(path)?,
            None => MapLoader::parse(crate::builtin::DEMO_MAP)?,
        };
        let units = match roster {
            Some(path) => RosterLoader::load(path)?,
            None => RosterLoader::parse(crate::builtin::DEMO_ROSTER)?,
        };
        let rules = match rules {
            Some(path) => ConfigLoader::load(path)?,
            None => ConfigLoader::parse(crate::builtin::DEMO_RULES)?,
        };
        Ok(Self { grid, units, rules })
    }
}

/// Content factory that loads encounters from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── rules.toml
/// ├── maps/
/// │   └── arena.ron
/// └── rosters/
///     └── arena.ron
/// ```
///
/// `rules.toml` is optional; defaults apply when it is missing.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat rules from `rules.toml`.
    pub fn load_rules(&self) -> LoadResult<RulesConfig> {
        let path = self.data_dir.join("rules.toml");
        if !path.exists() {
            return Ok(RulesConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load a map from `maps/{name}.ron`.
    pub fn load_map(&self, name: &str) -> LoadResult<TileGrid> {
        let path = self.data_dir.join("maps").join(format!("{}.ron", name));
        MapLoader::load(&path)
    }

    /// Load a roster from `rosters/{name}.ron`.
    pub fn load_roster(&self, name: &str) -> LoadResult<Vec<UnitSpec>> {
        let path = self.data_dir.join("rosters").join(format!("{}.ron", name));
        RosterLoader::load(&path)
    }

    /// Load the map and roster sharing `name`, plus the directory's rules.
    pub fn load_encounter(&self, name: &str) -> LoadResult<Encounter> {
        Ok(Encounter {
            grid: self.load_map(name)?,
            units: self.load_roster(name)?,
            rules: self.load_rules()?,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
