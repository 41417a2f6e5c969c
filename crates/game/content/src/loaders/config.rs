//! Combat rules loader.

use std::path::Path;

use tactics_core::RulesConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat rules from TOML files.
///
/// Every key is optional; missing keys keep [`RulesConfig::default`].
///
/// ```toml
/// distance_metric = "euclidean"
///
/// [damage]
/// defense_divisor = 2
/// minimum = 1
///
/// [default_stats]
/// movement = 4
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<RulesConfig> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| e.context(format!("in rules {}", path.display())))
    }

    pub fn parse(content: &str) -> LoadResult<RulesConfig> {
        let config: RulesConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules TOML: {}", e))?;

        if config.default_stats.max_hp == 0 {
            anyhow::bail!("default_stats.max_hp must be positive");
        }

        Ok(config)
    }
}
