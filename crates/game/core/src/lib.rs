//! Turn-based combat engine.
//!
//! `battle-core` resolves a fight between the live player character and a
//! creature or master, round by round. Damage is randomized through an
//! injected [`DiceBag`], modified by level adjustment, critical hits and
//! ripostes, and every occurrence is recorded as a [`BattleEvent`] that is
//! applied exactly once and then narrated into a [`BattleMessage`].
//! All state mutation flows through [`Battle`], and the crate performs no I/O.
pub mod battle;
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod fighter;
pub mod state;
pub mod value;

pub use battle::{Battle, DamageRoundMask, FleeOutcome};
pub use combat::{
    BattleEvent, BattleMessage, BattleTurn, CriticalHitEvent, DamageEvent, DeathEvent, HalfTurns,
};
pub use config::{BattleConfig, BattleOptions};
pub use env::{Character, DiceBag, PcgDiceBag, ScriptedDiceBag, SharedCharacter, share};
pub use error::{BattleError, ErrorSeverity, GameError};
pub use fighter::{Combatant, Fighter, FighterPair, FighterTemplate, Side};
pub use state::{BattleResult, BattleState, Rewards, RoundLog};
pub use value::{Context, Value};
