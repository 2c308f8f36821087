//! Collaborators the combat engine consumes but does not own.
//!
//! - [`DiceBag`]: randomness for rolls and critical hits
//! - [`Character`]: the persistent player character behind the live fighter

pub mod character;
pub mod dice;

pub use character::{Character, SharedCharacter, share};
pub use dice::{DiceBag, PcgDiceBag, ScriptedDiceBag};
