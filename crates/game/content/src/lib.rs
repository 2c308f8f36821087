//! Data-driven content definitions and loaders.
//!
//! This crate houses static battle content and provides loaders for RON/TOML data files:
//! - Creature and master stat blocks (data-driven via RON)
//! - The player character sheet (data-driven via TOML)
//! - Battle configuration (data-driven via TOML)
//!
//! Content is read once at startup and handed to `battle-core` by value; the
//! engine never touches the filesystem.

pub mod character;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use character::CharacterSheet;

#[cfg(feature = "loaders")]
pub use loaders::{CharacterLoader, ConfigLoader, ContentFactory, CreatureLoader};
