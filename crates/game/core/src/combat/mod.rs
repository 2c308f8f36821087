//! Combat resolution system.
//!
//! # Architecture
//!
//! - **Events**: [`BattleEvent`] variants capture one occurrence each, apply
//!   their numeric effect exactly once, then narrate themselves
//! - **Turns**: [`BattleTurn`] rolls the dice for half-turns and guarantees a
//!   round in which something happens
//! - **Messages**: [`BattleMessage`] templates are left unrendered
//!
//! # Core Functions
//!
//! - `BattleTurn::attack_and_defense`: level adjustment and critical hits
//! - `BattleTurn::partial_turn`: one attacker against one defender
//! - `BattleTurn::half_turns`: offense and defense of one round

pub mod event;
pub mod message;
pub mod turn;

pub use event::{BattleEvent, CriticalHitEvent, DamageEvent, DeathEvent};
pub use message::BattleMessage;
pub use turn::{BattleTurn, HalfTurns};
