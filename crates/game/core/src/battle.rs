//! Battle orchestrator.
//!
//! [`Battle`] owns the lifecycle of a fight: it snapshots the fighters into a
//! [`BattleState`], advances it one round at a time, and feeds the resulting
//! events through [`Battle::process_battle_events`], which stops at the first
//! death.
//!
//! # Round Algorithm
//!
//! ```text
//! half_turns()  ->  mask offense/defense  ->  process (apply, detect death)
//!               ->  record messages  ->  increment round  ->  sync health
//! ```

use bitflags::bitflags;
use tracing::{debug, trace};

use crate::combat::{BattleEvent, BattleTurn, DeathEvent, HalfTurns};
use crate::config::{BattleConfig, BattleOptions};
use crate::env::{DiceBag, SharedCharacter};
use crate::error::BattleError;
use crate::fighter::{Combatant, Fighter, FighterTemplate};
use crate::state::{BattleResult, BattleState};

bitflags! {
    /// Which half-turns of a round are allowed to land.
    ///
    /// Suppressing one side models surprise rounds and failed flee attempts.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct DamageRoundMask: u8 {
        /// The good guy attacks.
        const OFFENSE = 0b01;
        /// The bad guy attacks.
        const DEFENSE = 0b10;
        const BOTH = Self::OFFENSE.bits() | Self::DEFENSE.bits();
    }
}

impl Default for DamageRoundMask {
    fn default() -> Self {
        Self::BOTH
    }
}

/// Result of a flee attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum FleeOutcome {
    /// The live character got away. The battle state is untouched.
    Escaped,
    /// The opponent got a free round.
    Caught,
}

/// Drives fights between the live character and template opponents.
pub struct Battle<D: DiceBag> {
    character: SharedCharacter,
    dice: D,
    config: BattleConfig,
}

impl<D: DiceBag> Battle<D> {
    pub fn new(character: SharedCharacter, dice: D) -> Self {
        Self {
            character,
            dice,
            config: BattleConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn character(&self) -> &SharedCharacter {
        &self.character
    }

    pub fn dice(&self) -> &D {
        &self.dice
    }

    pub fn dice_mut(&mut self) -> &mut D {
        &mut self.dice
    }

    /// Start a fight against `template` with explicit toggles.
    ///
    /// The good guy is a snapshot of the live character, the bad guy a fresh
    /// fighter built from the template.
    pub fn start(
        &self,
        template: &FighterTemplate,
        options: BattleOptions,
    ) -> Result<BattleState, BattleError> {
        let good_guy = {
            let character = self
                .character
                .try_borrow()
                .map_err(|_| BattleError::Precondition("character is borrowed elsewhere"))?;
            Fighter::from_character(&*character)
        };
        let bad_guy = Fighter::from_template(template);

        debug!(
            good_guy = good_guy.name(),
            bad_guy = bad_guy.name(),
            ?options,
            "battle started"
        );

        let mut state = BattleState::new(good_guy, bad_guy, options);
        state.set_character(self.character.clone());
        Ok(state)
    }

    /// Start a fight using the configured default toggles.
    pub fn start_with_defaults(&self, template: &FighterTemplate) -> Result<BattleState, BattleError> {
        self.start(template, self.config.options)
    }

    /// Advance the fight by one round.
    ///
    /// Only the half-turns selected by `mask` are applied. Fails with
    /// [`BattleError::BattleAlreadyOver`] once the outcome is decided.
    pub fn fight_one_round(
        &mut self,
        state: &mut BattleState,
        mask: DamageRoundMask,
    ) -> Result<(), BattleError> {
        if state.is_over() {
            return Err(BattleError::BattleAlreadyOver);
        }

        state.set_character(self.character.clone());

        let HalfTurns { offense, defense } = BattleTurn::new(&mut self.dice)
            .with_max_attempts(self.config.max_half_turn_attempts)
            .half_turns(state)?;

        let mut events = Vec::with_capacity(offense.len() + defense.len());
        if mask.contains(DamageRoundMask::OFFENSE) {
            events.extend(offense);
        }
        if mask.contains(DamageRoundMask::DEFENSE) {
            events.extend(defense);
        }

        let processed = self.process_battle_events(events, state)?;

        state.add_messages(&processed)?;
        state.increment_round();
        state.synchronize_to_character()?;

        debug!(
            round = state.round_counter(),
            good_guy_health = state.good_guy().health(),
            bad_guy_health = state.bad_guy().health(),
            result = %state.result(),
            "round finished"
        );
        Ok(())
    }

    /// Fight up to `rounds` rounds, stopping early when the battle ends.
    ///
    /// Returns the number of rounds actually fought.
    pub fn fight_n_rounds(
        &mut self,
        state: &mut BattleState,
        rounds: u32,
        mask: DamageRoundMask,
    ) -> Result<u32, BattleError> {
        let mut fought = 0;
        while fought < rounds && !state.is_over() {
            self.fight_one_round(state, mask)?;
            fought += 1;
        }
        Ok(fought)
    }

    /// Try to run away. A failed attempt hands the opponent a free round.
    pub fn attempt_flee(&mut self, state: &mut BattleState) -> Result<FleeOutcome, BattleError> {
        if state.is_over() {
            return Err(BattleError::BattleAlreadyOver);
        }
        if !state.allow_flee() {
            return Err(BattleError::FleeNotAllowed);
        }

        if self
            .dice
            .chance(self.config.flee_chance, BattleConfig::FLEE_PRECISION)
        {
            debug!(round = state.round_counter(), "flee succeeded");
            return Ok(FleeOutcome::Escaped);
        }

        debug!(round = state.round_counter(), "flee failed");
        self.fight_one_round(state, DamageRoundMask::DEFENSE)?;
        Ok(FleeOutcome::Caught)
    }

    /// Apply `events` in order, stopping at the first death.
    ///
    /// After each application the good guy is checked first, then the bad
    /// guy. On a death an applied [`DeathEvent`] for the victim is appended,
    /// the outcome is recorded, and the remaining events are dropped without
    /// being applied. The returned list is what happened this round.
    pub fn process_battle_events(
        &self,
        events: Vec<BattleEvent>,
        state: &mut BattleState,
    ) -> Result<Vec<BattleEvent>, BattleError> {
        let mut processed = Vec::with_capacity(events.len() + 1);

        for mut event in events {
            event.apply(state.fighters_mut())?;
            trace!(event = event.name(), attacker = %event.attacker(), "event applied");
            processed.push(event);

            let fallen = if state.good_guy().is_dead() {
                Some((Combatant::GoodGuy, BattleResult::BadGuyWon))
            } else if state.bad_guy().is_dead() {
                Some((Combatant::BadGuy, BattleResult::GoodGuyWon))
            } else {
                None
            };

            if let Some((victim, result)) = fallen {
                let mut death: BattleEvent =
                    DeathEvent::new(victim.opponent(), victim, victim)?.into();
                death.apply(state.fighters_mut())?;
                processed.push(death);

                state.conclude(result);
                debug!(%victim, %result, "battle decided");
                break;
            }
        }

        Ok(processed)
    }
}
