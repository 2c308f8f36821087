//! Session record of one fight.
//!
//! [`BattleState`] owns both fighters, the round counter, the narrated log and
//! the outcome. It is created by [`crate::Battle::start`], mutated once per
//! round, and becomes read-only in practice once [`BattleState::is_over`]
//! reports `true`: the outcome is terminal and never reset.

use crate::combat::{BattleEvent, BattleMessage};
use crate::config::BattleOptions;
use crate::env::SharedCharacter;
use crate::error::BattleError;
use crate::fighter::{Combatant, Fighter, FighterPair};

/// Outcome of a battle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BattleResult {
    #[default]
    Undecided,
    GoodGuyWon,
    BadGuyWon,
}

impl BattleResult {
    pub fn is_decided(self) -> bool {
        self != Self::Undecided
    }
}

/// Messages recorded for one round.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundLog {
    round: u32,
    messages: Vec<BattleMessage>,
}

impl RoundLog {
    /// Round counter at the time the messages were recorded.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn messages(&self) -> &[BattleMessage] {
        &self.messages
    }
}

/// Spoils read from the defeated opponent's payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rewards {
    pub gold: i64,
    pub experience: i64,
}

/// Mutable record of a single fight.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    fighters: FighterPair,
    round_counter: u32,
    message_rounds: Vec<RoundLog>,
    result: BattleResult,
    options: BattleOptions,
    /// Owner of the live fighter. Rebound by the battle every round.
    #[cfg_attr(feature = "serde", serde(skip))]
    character: Option<SharedCharacter>,
}

impl BattleState {
    pub fn new(good_guy: Fighter, bad_guy: Fighter, options: BattleOptions) -> Self {
        Self {
            fighters: FighterPair::new(good_guy, bad_guy),
            round_counter: 0,
            message_rounds: Vec::new(),
            result: BattleResult::Undecided,
            options,
            character: None,
        }
    }

    // ===== fighters =====

    pub fn good_guy(&self) -> &Fighter {
        &self.fighters.good_guy
    }

    pub fn bad_guy(&self) -> &Fighter {
        &self.fighters.bad_guy
    }

    pub fn fighter(&self, combatant: Combatant) -> &Fighter {
        self.fighters.get(combatant)
    }

    pub fn fighters(&self) -> &FighterPair {
        &self.fighters
    }

    pub(crate) fn fighters_mut(&mut self) -> &mut FighterPair {
        &mut self.fighters
    }

    // ===== toggles =====

    pub fn options(&self) -> BattleOptions {
        self.options
    }

    pub fn is_level_adjustment_enabled(&self) -> bool {
        self.options.level_adjustment
    }

    pub fn is_critical_hit_enabled(&self) -> bool {
        self.options.critical_hits
    }

    pub fn is_riposte_enabled(&self) -> bool {
        self.options.riposte
    }

    pub fn allow_flee(&self) -> bool {
        self.options.allow_flee
    }

    // ===== character binding =====

    /// Bind the persistent character that owns the live fighter.
    pub fn set_character(&mut self, character: SharedCharacter) {
        self.character = Some(character);
    }

    pub fn character(&self) -> Option<&SharedCharacter> {
        self.character.as_ref()
    }

    /// Write the live fighter's current health back onto the bound character.
    pub fn synchronize_to_character(&self) -> Result<(), BattleError> {
        let character = self
            .character
            .as_ref()
            .ok_or(BattleError::Precondition("no character is bound to the battle"))?;
        let live = self
            .fighters
            .live()
            .ok_or(BattleError::Precondition("battle has no live fighter"))?;

        character
            .try_borrow_mut()
            .map_err(|_| BattleError::Precondition("character is borrowed elsewhere"))?
            .set_health(self.fighters.get(live).health());

        Ok(())
    }

    // ===== rounds and log =====

    pub fn round_counter(&self) -> u32 {
        self.round_counter
    }

    pub fn increment_round(&mut self) {
        self.round_counter += 1;
    }

    pub fn message_rounds(&self) -> &[RoundLog] {
        &self.message_rounds
    }

    /// Record one round of narration.
    ///
    /// The new [`RoundLog`] is stamped with the current round counter. Events
    /// that decorate to nothing are skipped.
    pub fn add_messages(&mut self, events: &[BattleEvent]) -> Result<(), BattleError> {
        let mut messages = Vec::with_capacity(events.len());
        for event in events {
            if let Some(message) = event.decorate(&self.fighters)? {
                messages.push(message);
            }
        }

        self.message_rounds.push(RoundLog {
            round: self.round_counter,
            messages,
        });
        Ok(())
    }

    // ===== outcome =====

    pub fn result(&self) -> BattleResult {
        self.result
    }

    pub fn is_over(&self) -> bool {
        self.result.is_decided()
    }

    /// Record the outcome. A decided outcome is never overwritten.
    pub(crate) fn conclude(&mut self, result: BattleResult) {
        if !self.result.is_decided() {
            self.result = result;
        }
    }

    pub fn winner(&self) -> Option<Combatant> {
        match self.result {
            BattleResult::Undecided => None,
            BattleResult::GoodGuyWon => Some(Combatant::GoodGuy),
            BattleResult::BadGuyWon => Some(Combatant::BadGuy),
        }
    }

    pub fn loser(&self) -> Option<Combatant> {
        self.winner().map(Combatant::opponent)
    }

    /// Gold and experience carried by the defeated bad guy.
    ///
    /// `None` unless the good guy won.
    pub fn rewards(&self) -> Option<Rewards> {
        if self.result != BattleResult::GoodGuyWon {
            return None;
        }

        let bad_guy = self.bad_guy();
        Some(Rewards {
            gold: bad_guy.extra_int("gold").unwrap_or_default(),
            experience: bad_guy.extra_int("experience").unwrap_or_default(),
        })
    }

    /// Flavor text of the bad guy for the decided outcome, if it has any.
    pub fn outcome_text(&self) -> Option<&str> {
        let key = match self.result {
            BattleResult::Undecided => return None,
            BattleResult::GoodGuyWon => "textDefeated",
            BattleResult::BadGuyWon => "textLost",
        };
        self.bad_guy().extra_text(key)
    }
}
