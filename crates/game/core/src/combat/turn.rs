//! Half-turn resolution.
//!
//! A half-turn is one attacker swinging at one defender. Its draw order is
//! fixed so that a seeded dice bag replays a fight exactly:
//!
//! 1. critical-hit chance (only when enabled and the attacker is live)
//! 2. attack roll `pseudo_bell(0, attack)`
//! 3. defense roll `pseudo_bell(0, defense)`
//!
//! # Formula
//!
//! ```text
//! defense' = defense × defense_adjustment
//! attack'  = attack × 3            (critical hit)
//! damage   = roll(attack') - roll(defense')
//! damage   = damage / 2            (damage < 0, riposte enabled)
//! damage   = 0                     (damage < 0, riposte disabled)
//! ```
//!
//! where `defense_adjustment` is `(defender_level / attacker_level)²` when the
//! live character attacks and the linear `defender_level / attacker_level`
//! when the live character defends.

use tracing::{trace, warn};

use crate::combat::event::{BattleEvent, CriticalHitEvent, DamageEvent};
use crate::config::BattleConfig;
use crate::env::DiceBag;
use crate::error::BattleError;
use crate::fighter::Combatant;
use crate::state::BattleState;

/// Events of one full round, split by who attacked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HalfTurns {
    /// Good guy attacking the bad guy.
    pub offense: Vec<BattleEvent>,
    /// Bad guy attacking the good guy.
    pub defense: Vec<BattleEvent>,
}

/// Damage carried by the damage event of a half-turn, zero if none.
fn half_turn_damage(events: &[BattleEvent]) -> i32 {
    events
        .iter()
        .rev()
        .find_map(BattleEvent::as_damage)
        .map_or(0, DamageEvent::damage)
}

/// Computes half-turns against a borrowed dice bag.
pub struct BattleTurn<'d, D: DiceBag + ?Sized> {
    dice: &'d mut D,
    max_attempts: u32,
}

impl<'d, D: DiceBag + ?Sized> BattleTurn<'d, D> {
    pub fn new(dice: &'d mut D) -> Self {
        Self {
            dice,
            max_attempts: BattleConfig::DEFAULT_MAX_HALF_TURN_ATTEMPTS,
        }
    }

    /// Cap on zero-damage half-turn pairs before [`Self::half_turns`] fails.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Adjusted `(attack, defense)` for one half-turn, rounded.
    ///
    /// Level adjustment only applies when the live character is involved and
    /// both levels exceed 1. A critical hit may triple the live attacker's
    /// attack; that is the only dice draw made here.
    pub fn attack_and_defense(
        &mut self,
        state: &BattleState,
        attacker: Combatant,
        defender: Combatant,
    ) -> (i32, i32) {
        let attacking = state.fighter(attacker);
        let defending = state.fighter(defender);

        let mut defense_adjustment = 1.0;
        if state.is_level_adjustment_enabled() && attacking.level() > 1 && defending.level() > 1 {
            let attacker_level = f64::from(attacking.level());
            let defender_level = f64::from(defending.level());

            if attacking.is_live() {
                let adjustment = attacker_level / defender_level;
                defense_adjustment = 1.0 / (adjustment * adjustment);
            } else if defending.is_live() {
                let adjustment = defender_level / attacker_level;
                defense_adjustment = adjustment;
            }
        }

        let mut attack = f64::from(attacking.attack());
        let defense = f64::from(defending.defense()) * defense_adjustment;

        if state.is_critical_hit_enabled()
            && attacking.is_live()
            && self.dice.chance(
                BattleConfig::CRITICAL_HIT_CHANCE,
                BattleConfig::CRITICAL_HIT_PRECISION,
            )
        {
            attack *= BattleConfig::CRITICAL_HIT_MULTIPLIER;
        }

        (attack.round() as i32, defense.round() as i32)
    }

    /// Resolve one attacker against one defender.
    ///
    /// Returns `[critical?, damage]`, critical first when present.
    pub fn partial_turn(
        &mut self,
        state: &BattleState,
        attacker: Combatant,
        defender: Combatant,
    ) -> Result<Vec<BattleEvent>, BattleError> {
        let (attack, defense) = self.attack_and_defense(state, attacker, defender);

        let attack_roll = self.dice.pseudo_bell(0, attack);
        let defense_roll = self.dice.pseudo_bell(0, defense);
        let mut damage = f64::from(attack_roll) - f64::from(defense_roll);

        let mut events = Vec::with_capacity(2);
        if state.is_critical_hit_enabled() && attack > state.fighter(attacker).attack() {
            events.push(CriticalHitEvent::new(attacker, defender, attack)?.into());
        }

        if damage < 0.0 {
            damage = if state.is_riposte_enabled() {
                damage / 2.0
            } else {
                0.0
            };
        }
        let damage = damage.round() as i32;

        trace!(
            %attacker,
            attack,
            defense,
            attack_roll,
            defense_roll,
            damage,
            "half-turn resolved"
        );

        events.push(DamageEvent::new(attacker, defender, damage)?.into());
        Ok(events)
    }

    /// Offense and defense half-turns of a round in which something happens.
    ///
    /// Pairs where both half-turns deal zero damage are discarded and redrawn.
    /// Only the final pair is returned.
    pub fn half_turns(&mut self, state: &BattleState) -> Result<HalfTurns, BattleError> {
        for attempt in 1..=self.max_attempts {
            let offense = self.partial_turn(state, Combatant::GoodGuy, Combatant::BadGuy)?;
            let defense = self.partial_turn(state, Combatant::BadGuy, Combatant::GoodGuy)?;

            if half_turn_damage(&offense) != 0 || half_turn_damage(&defense) != 0 {
                trace!(attempt, "half-turn pair produced damage");
                return Ok(HalfTurns { offense, defense });
            }
        }

        warn!(
            attempts = self.max_attempts,
            "dice produced no damage within the half-turn retry ceiling"
        );
        Err(BattleError::HalfTurnRetriesExhausted {
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BattleOptions;
    use crate::env::ScriptedDiceBag;
    use crate::fighter::{Fighter, Side};

    use Combatant::{BadGuy, GoodGuy};

    fn state(options: BattleOptions) -> BattleState {
        BattleState::new(
            Fighter::new(Side::Player)
                .with_name("Hero")
                .with_level(10)
                .with_attack(15)
                .with_defense(10)
                .with_health(100),
            Fighter::new(Side::Opponent)
                .with_name("Ogre")
                .with_level(5)
                .with_attack(10)
                .with_defense(5)
                .with_health(60),
            options,
        )
    }

    fn damage(events: &[BattleEvent]) -> i32 {
        half_turn_damage(events)
    }

    #[test]
    fn level_adjustment_shrinks_defense_quadratically_when_player_attacks() {
        let state = state(BattleOptions::plain().with_level_adjustment(true));
        let mut dice = ScriptedDiceBag::new();
        let mut turn = BattleTurn::new(&mut dice);

        // 10 / 5 = 2, defense × 1/4 = 1.25
        assert_eq!(turn.attack_and_defense(&state, GoodGuy, BadGuy), (15, 1));
    }

    #[test]
    fn level_adjustment_scales_defense_linearly_when_player_defends() {
        let state = state(BattleOptions::plain().with_level_adjustment(true));
        let mut dice = ScriptedDiceBag::new();
        let mut turn = BattleTurn::new(&mut dice);

        // 10 / 5 = 2, defense × 2
        assert_eq!(turn.attack_and_defense(&state, BadGuy, GoodGuy), (10, 20));
    }

    #[test]
    fn level_adjustment_needs_both_levels_above_one() {
        let mut state = state(BattleOptions::plain().with_level_adjustment(true));
        state.fighters_mut().bad_guy.set_level(1);
        let mut dice = ScriptedDiceBag::new();
        let mut turn = BattleTurn::new(&mut dice);

        assert_eq!(turn.attack_and_defense(&state, GoodGuy, BadGuy), (15, 5));
    }

    #[test]
    fn level_adjustment_disabled_leaves_stats_alone() {
        let state = state(BattleOptions::plain());
        let mut dice = ScriptedDiceBag::new();
        let mut turn = BattleTurn::new(&mut dice);

        assert_eq!(turn.attack_and_defense(&state, GoodGuy, BadGuy), (15, 5));
        assert_eq!(turn.attack_and_defense(&state, BadGuy, GoodGuy), (10, 10));
    }

    #[test]
    fn level_adjusted_scenario_deals_fifty() {
        let state = state(BattleOptions::plain().with_level_adjustment(true));
        let mut dice = ScriptedDiceBag::new().with_pseudo_bells([80, 30]);
        let events = BattleTurn::new(&mut dice)
            .partial_turn(&state, GoodGuy, BadGuy)
            .unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(damage(&events), 50);
    }

    #[test]
    fn negative_damage_is_halved_with_riposte() {
        let state = state(BattleOptions::plain().with_riposte(true));
        let mut dice = ScriptedDiceBag::new().with_pseudo_bells([2, 5, 1, 8]);
        let mut turn = BattleTurn::new(&mut dice);

        // -3 / 2 = -1.5 rounds away from zero
        let first = turn.partial_turn(&state, BadGuy, GoodGuy).unwrap();
        assert_eq!(damage(&first), -2);

        // -7 / 2 = -3.5
        let second = turn.partial_turn(&state, BadGuy, GoodGuy).unwrap();
        assert_eq!(damage(&second), -4);
    }

    #[test]
    fn negative_damage_is_dropped_without_riposte() {
        let state = state(BattleOptions::plain());
        let mut dice = ScriptedDiceBag::new().with_pseudo_bells([2, 5]);
        let events = BattleTurn::new(&mut dice)
            .partial_turn(&state, BadGuy, GoodGuy)
            .unwrap();
        assert_eq!(damage(&events), 0);
    }

    #[test]
    fn critical_hit_triples_attack_and_comes_first() {
        let state = state(BattleOptions::plain().with_critical_hits(true));
        let mut dice = ScriptedDiceBag::new()
            .with_chances([true])
            .with_pseudo_bells([40, 3]);
        let events = BattleTurn::new(&mut dice)
            .partial_turn(&state, GoodGuy, BadGuy)
            .unwrap();

        assert_eq!(events.len(), 2);
        match &events[0] {
            BattleEvent::CriticalHit(critical) => assert_eq!(critical.critical_attack_value(), 45),
            other => panic!("expected critical hit first, got {other:?}"),
        }
        assert_eq!(damage(&events), 37);
    }

    #[test]
    fn opponents_never_roll_for_critical_hits() {
        let state = state(BattleOptions::plain().with_critical_hits(true));
        let mut dice = ScriptedDiceBag::new()
            .with_chances([true])
            .with_pseudo_bells([4, 1]);
        let events = BattleTurn::new(&mut dice)
            .partial_turn(&state, BadGuy, GoodGuy)
            .unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(dice.chance_draws(), 0);
    }

    #[test]
    fn failed_critical_roll_emits_no_critical_event() {
        let state = state(BattleOptions::plain().with_critical_hits(true));
        let mut dice = ScriptedDiceBag::new()
            .with_chances([false])
            .with_pseudo_bells([9, 2]);
        let events = BattleTurn::new(&mut dice)
            .partial_turn(&state, GoodGuy, BadGuy)
            .unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(damage(&events), 7);
    }

    #[test]
    fn half_turns_retry_until_something_happens() {
        let state = state(BattleOptions::plain());
        let mut dice = ScriptedDiceBag::new().with_pseudo_bells([
            5, 5, 3, 3, // nothing happens
            9, 4, 2, 6, // offense deals 5, defense dropped to 0
        ]);
        let turns = BattleTurn::new(&mut dice).half_turns(&state).unwrap();

        assert_eq!(damage(&turns.offense), 5);
        assert_eq!(damage(&turns.defense), 0);
        assert_eq!(turns.offense[0].attacker(), GoodGuy);
        assert_eq!(turns.defense[0].attacker(), BadGuy);
        assert_eq!(dice.pseudo_bell_draws(), 8);
        assert_eq!(dice.remaining_pseudo_bells(), 0);
    }

    #[test]
    fn half_turns_accept_defense_only_damage() {
        let state = state(BattleOptions::plain());
        let mut dice = ScriptedDiceBag::new().with_pseudo_bells([1, 1, 7, 2]);
        let turns = BattleTurn::new(&mut dice).half_turns(&state).unwrap();

        assert_eq!(damage(&turns.offense), 0);
        assert_eq!(damage(&turns.defense), 5);
        assert_eq!(dice.pseudo_bell_draws(), 4);
    }

    #[test]
    fn half_turns_give_up_after_ceiling() {
        let state = state(BattleOptions::plain());
        // Exhausted script always answers the lower bound: 0 - 0 every time
        let mut dice = ScriptedDiceBag::new();
        let result = BattleTurn::new(&mut dice)
            .with_max_attempts(25)
            .half_turns(&state);

        assert_eq!(
            result,
            Err(BattleError::HalfTurnRetriesExhausted { attempts: 25 })
        );
        assert_eq!(dice.pseudo_bell_draws(), 100);
    }
}
