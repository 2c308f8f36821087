//! Character sheet loader.

use std::path::Path;

use crate::CharacterSheet;
use crate::loaders::{LoadResult, read_file};

/// Loader for the player character sheet from TOML files.
pub struct CharacterLoader;

impl CharacterLoader {
    /// Load a character sheet from a TOML file.
    pub fn load(path: &Path) -> LoadResult<CharacterSheet> {
        let content = read_file(path)?;
        let sheet: CharacterSheet = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse character sheet TOML: {}", e))?;

        if sheet.max_health <= 0 {
            anyhow::bail!("Character {} has no maximum health", sheet.name);
        }
        Ok(sheet)
    }

    /// Write a character sheet back to a TOML file.
    pub fn save(path: &Path, sheet: &CharacterSheet) -> LoadResult<()> {
        let content = toml::to_string_pretty(sheet)
            .map_err(|e| anyhow::anyhow!("Failed to serialize character sheet: {}", e))?;
        std::fs::write(path, content)
            .map_err(|e| anyhow::anyhow!("Failed to write file {}: {}", path.display(), e))
    }
}
