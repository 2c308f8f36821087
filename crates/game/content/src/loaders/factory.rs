//! Content factory for building battle inputs from data files.

use std::path::{Path, PathBuf};

use battle_core::{BattleConfig, FighterTemplate};

use crate::CharacterSheet;
use crate::loaders::{CharacterLoader, ConfigLoader, CreatureLoader, LoadResult};

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── battle.toml
/// ├── character.toml
/// └── creatures.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "battle.toml";
    pub const CHARACTER_FILE: &'static str = "character.toml";
    pub const CREATURES_FILE: &'static str = "creatures.ron";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle configuration from `battle.toml`.
    ///
    /// A missing file yields [`BattleConfig::default`].
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.config_path();
        if !path.exists() {
            return Ok(BattleConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the creature catalog from `creatures.ron`.
    pub fn load_creatures(&self) -> LoadResult<Vec<(String, FighterTemplate)>> {
        CreatureLoader::load(&self.data_dir.join(Self::CREATURES_FILE))
    }

    /// Load a single creature by id from `creatures.ron`.
    pub fn load_creature(&self, id: &str) -> LoadResult<FighterTemplate> {
        self.load_creatures()?
            .into_iter()
            .find(|(creature_id, _)| creature_id == id)
            .map(|(_, template)| template)
            .ok_or_else(|| anyhow::anyhow!("Unknown creature: {}", id))
    }

    /// Load the player character from `character.toml`.
    pub fn load_character(&self) -> LoadResult<CharacterSheet> {
        CharacterLoader::load(&self.character_path())
    }

    /// Write the player character back to `character.toml`.
    pub fn save_character(&self, sheet: &CharacterSheet) -> LoadResult<()> {
        CharacterLoader::save(&self.character_path(), sheet)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn config_path(&self) -> PathBuf {
        self.data_dir.join(Self::CONFIG_FILE)
    }

    fn character_path(&self) -> PathBuf {
        self.data_dir.join(Self::CHARACTER_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn bundled() -> ContentFactory {
        ContentFactory::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
    }

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn bundled_data_loads() {
        let factory = bundled();

        let config = factory.load_config().unwrap();
        assert!(config.max_half_turn_attempts >= 1);

        let creatures = factory.load_creatures().unwrap();
        assert!(!creatures.is_empty());

        let character = factory.load_character().unwrap();
        assert!(character.health > 0);
    }

    #[test]
    fn load_creature_finds_by_id() {
        let factory = bundled();
        let (id, expected) = factory.load_creatures().unwrap().remove(0);

        assert_eq!(factory.load_creature(&id).unwrap(), expected);
        assert!(factory.load_creature("no-such-creature").is_err());
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let factory = ContentFactory::new(dir.path());

        assert_eq!(factory.load_config().unwrap(), BattleConfig::default());
        assert!(factory.load_creatures().is_err());
    }
}
