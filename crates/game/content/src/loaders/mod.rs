//! Content loaders for reading battle data from files.
//!
//! Creature catalogs are RON, character sheets and battle configuration are
//! TOML. Every loader returns [`LoadResult`] with the offending path or format
//! in the error message.

pub mod character;
pub mod config;
pub mod creatures;
pub mod factory;

pub use character::CharacterLoader;
pub use config::ConfigLoader;
pub use creatures::{CreatureCatalog, CreatureLoader};
pub use factory::ContentFactory;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
