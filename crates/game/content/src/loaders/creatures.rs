//! Creature and master catalog loader.

use std::path::Path;

use battle_core::FighterTemplate;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Creature catalog structure for RON files.
///
/// Entries are `(id, template)` pairs; ids must be unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatureCatalog {
    pub creatures: Vec<(String, FighterTemplate)>,
}

/// Loader for creature catalogs from RON files.
pub struct CreatureLoader;

impl CreatureLoader {
    /// Load a creature catalog from a RON file.
    ///
    /// Rejects duplicate ids and templates that start the fight already dead.
    pub fn load(path: &Path) -> LoadResult<Vec<(String, FighterTemplate)>> {
        let content = read_file(path)?;
        let catalog: CreatureCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse creature catalog RON: {}", e))?;

        for (index, (id, template)) in catalog.creatures.iter().enumerate() {
            if catalog.creatures[..index].iter().any(|(other, _)| other == id) {
                anyhow::bail!("Duplicate creature id: {}", id);
            }
            if template.health <= 0 {
                anyhow::bail!("Creature {} has no health", id);
            }
        }

        Ok(catalog.creatures)
    }
}
