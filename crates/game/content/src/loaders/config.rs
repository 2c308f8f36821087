//! Battle configuration loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`BattleConfig::default`]. The retry ceiling
    /// is raised to at least one and the flee chance clamped to `[0, 1]`.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        let config: BattleConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse battle config TOML: {}", e))?;

        let max_attempts = config.max_half_turn_attempts;
        let flee_chance = config.flee_chance;
        Ok(config
            .with_max_half_turn_attempts(max_attempts)
            .with_flee_chance(flee_chance))
    }
}
