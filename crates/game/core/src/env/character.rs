//! Live character oracle.
//!
//! The persistent player character lives outside the engine. Battles only
//! read its combat-relevant values when a fight starts and write its health
//! back after every round.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Read/write accessors the engine needs from a persistent character.
///
/// `attack` and `defense` must already include equipment bonuses; the engine
/// treats them as final values.
pub trait Character: fmt::Debug {
    fn name(&self) -> &str;

    fn level(&self) -> i32;

    /// Display name of the equipped weapon, if any.
    fn weapon(&self) -> Option<&str>;

    fn health(&self) -> i32;

    fn max_health(&self) -> i32;

    fn attack(&self) -> i32;

    fn defense(&self) -> i32;

    fn set_health(&mut self, health: i32);
}

/// Handle to the live character shared between the caller and a battle.
///
/// Battles are single-threaded and owned by one caller, so `Rc<RefCell<_>>`
/// is enough.
pub type SharedCharacter = Rc<RefCell<dyn Character>>;

/// Wrap a concrete character into a [`SharedCharacter`].
pub fn share<C: Character + 'static>(character: C) -> SharedCharacter {
    Rc::new(RefCell::new(character))
}
