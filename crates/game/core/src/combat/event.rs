//! Battle events.
//!
//! An event captures one combat occurrence between an attacker and a
//! defender. Its lifecycle is one-way:
//!
//! ```text
//! Unapplied --apply()--> Applied --decorate()--> BattleMessage
//! ```
//!
//! Every variant tracks the applied state the same way: applying twice is a
//! [`BattleError::DoubleApply`] and decorating before applying is a
//! [`BattleError::DecorateBeforeApply`], even for variants whose numeric
//! effect is a no-op.
//!
//! Events refer to fighters through [`Combatant`] handles, so applying one
//! mutates the very [`FighterPair`] the battle state reads afterwards.

use crate::combat::message::BattleMessage;
use crate::error::BattleError;
use crate::fighter::{Combatant, FighterPair};
use crate::value::Context;

// ============================================================================
// Shared Event Core
// ============================================================================

/// Attacker/defender handles plus the applied flag shared by every variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct EventCore {
    attacker: Combatant,
    defender: Combatant,
    applied: bool,
}

impl EventCore {
    fn new(event: &'static str, attacker: Combatant, defender: Combatant) -> Result<Self, BattleError> {
        if attacker == defender {
            return Err(BattleError::InvalidEventContext {
                event,
                key: "defender",
                reason: "must differ from the attacker",
            });
        }

        Ok(Self {
            attacker,
            defender,
            applied: false,
        })
    }

    fn mark_applied(&mut self, event: &'static str) -> Result<(), BattleError> {
        if self.applied {
            return Err(BattleError::DoubleApply { event });
        }
        self.applied = true;
        Ok(())
    }

    fn ensure_applied(&self, event: &'static str) -> Result<(), BattleError> {
        if self.applied {
            Ok(())
        } else {
            Err(BattleError::DecorateBeforeApply { event })
        }
    }
}

/// Read an `i32` out of an event context.
fn context_int(
    event: &'static str,
    context: &Context,
    key: &'static str,
) -> Result<i32, BattleError> {
    let value = context.get(key).ok_or(BattleError::missing(event, key))?;
    value
        .as_int()
        .and_then(|value| i32::try_from(value).ok())
        .ok_or(BattleError::mistyped(event, key, "must be a 32-bit integer"))
}

// ============================================================================
// Damage Event
// ============================================================================

/// Damage dealt in one half-turn.
///
/// Positive damage hurts the defender, negative damage is a riposte that
/// hurts the attacker, zero is a miss.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageEvent {
    core: EventCore,
    damage: i32,
}

impl DamageEvent {
    pub const NAME: &'static str = "DamageEvent";

    pub fn new(attacker: Combatant, defender: Combatant, damage: i32) -> Result<Self, BattleError> {
        Ok(Self {
            core: EventCore::new(Self::NAME, attacker, defender)?,
            damage,
        })
    }

    /// Build from a context map. Requires an integer `damage`.
    pub fn from_context(
        attacker: Combatant,
        defender: Combatant,
        context: &Context,
    ) -> Result<Self, BattleError> {
        let damage = context_int(Self::NAME, context, "damage")?;
        Self::new(attacker, defender, damage)
    }

    pub fn damage(&self) -> i32 {
        self.damage
    }

    fn apply(&mut self, fighters: &mut FighterPair) -> Result<(), BattleError> {
        self.core.mark_applied(Self::NAME)?;

        if self.damage > 0 {
            fighters.get_mut(self.core.defender).damage(self.damage);
        } else if self.damage < 0 {
            // Riposte hits the original attacker
            fighters
                .get_mut(self.core.attacker)
                .damage(self.damage.saturating_neg());
        }

        Ok(())
    }

    fn decorate(&self, fighters: &FighterPair) -> Result<BattleMessage, BattleError> {
        self.core.ensure_applied(Self::NAME)?;

        let attacker = fighters.get(self.core.attacker);
        let defender = fighters.get(self.core.defender);

        let template = match self.damage.signum() {
            0 if attacker.is_live() => "You try to hit {{ defender }} but MISS!",
            0 if defender.is_live() => "{{ attacker }} tries to hit you but MISSES!",
            0 => "{{ attacker }} tries to hit {{ defender }} but MISSES!",
            1 if attacker.is_live() => "You hit {{ defender }} for {{ damage }} points of damage!",
            1 if defender.is_live() => "{{ attacker }} hits you for {{ damage }} points of damage!",
            1 => "{{ attacker }} hits {{ defender }} for {{ damage }} points of damage!",
            _ if attacker.is_live() => {
                "You try to hit {{ defender }} but are RIPOSTED for {{ damage }} points of damage!"
            }
            _ if defender.is_live() => {
                "{{ attacker }} tries to hit you but you RIPOSTE for {{ damage }} points of damage!"
            }
            _ => {
                "{{ attacker }} tries to hit {{ defender }} but is RIPOSTED for {{ damage }} points of damage!"
            }
        };

        Ok(BattleMessage::new(template)
            .with("attacker", attacker.name())
            .with("defender", defender.name())
            .with("damage", self.damage.saturating_abs()))
    }
}

// ============================================================================
// Critical Hit Event
// ============================================================================

/// Narration of a tripled attack. Has no numeric effect of its own.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CriticalHitEvent {
    core: EventCore,
    critical_attack_value: i32,
}

impl CriticalHitEvent {
    pub const NAME: &'static str = "CriticalHitEvent";

    pub fn new(
        attacker: Combatant,
        defender: Combatant,
        critical_attack_value: i32,
    ) -> Result<Self, BattleError> {
        Ok(Self {
            core: EventCore::new(Self::NAME, attacker, defender)?,
            critical_attack_value,
        })
    }

    /// Build from a context map. Requires an integer `criticalAttackValue`.
    pub fn from_context(
        attacker: Combatant,
        defender: Combatant,
        context: &Context,
    ) -> Result<Self, BattleError> {
        let value = context_int(Self::NAME, context, "criticalAttackValue")?;
        Self::new(attacker, defender, value)
    }

    pub fn critical_attack_value(&self) -> i32 {
        self.critical_attack_value
    }

    fn apply(&mut self) -> Result<(), BattleError> {
        self.core.mark_applied(Self::NAME)
    }

    /// Phrase the power move against the attacker's base attack.
    ///
    /// Returns `None` when the critical value does not clear 1.25× base.
    fn decorate(&self, fighters: &FighterPair) -> Result<Option<BattleMessage>, BattleError> {
        self.core.ensure_applied(Self::NAME)?;

        let attacker = fighters.get(self.core.attacker);
        let base = f64::from(attacker.attack());
        let value = f64::from(self.critical_attack_value);

        let power = if value > 4.0 * base {
            "a MEGA power move!!!"
        } else if value > 3.0 * base {
            "a DOUBLE power move!!!"
        } else if value > 2.0 * base {
            "a power move!!!"
        } else if value > 1.25 * base {
            "a minor power move!"
        } else {
            return Ok(None);
        };

        let template = if attacker.is_live() {
            format!("You execute {power}")
        } else {
            format!("{{{{ attacker }}}} executes {power}")
        };

        Ok(Some(
            BattleMessage::new(template)
                .with("attacker", attacker.name())
                .with("criticalAttackValue", self.critical_attack_value),
        ))
    }
}

// ============================================================================
// Death Event
// ============================================================================

/// One of the two fighters dropped to zero health.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeathEvent {
    core: EventCore,
    victim: Combatant,
}

impl DeathEvent {
    pub const NAME: &'static str = "DeathEvent";

    pub fn new(
        attacker: Combatant,
        defender: Combatant,
        victim: Combatant,
    ) -> Result<Self, BattleError> {
        let core = EventCore::new(Self::NAME, attacker, defender)?;
        if victim != attacker && victim != defender {
            return Err(BattleError::mistyped(
                Self::NAME,
                "victim",
                "must be one of the two fighters",
            ));
        }
        Ok(Self { core, victim })
    }

    /// Build from a context map. Requires `victim` to name a fighter.
    pub fn from_context(
        attacker: Combatant,
        defender: Combatant,
        context: &Context,
    ) -> Result<Self, BattleError> {
        let victim = context
            .get("victim")
            .ok_or(BattleError::missing(Self::NAME, "victim"))?
            .as_combatant()
            .ok_or(BattleError::mistyped(
                Self::NAME,
                "victim",
                "must be one of the two fighters",
            ))?;
        Self::new(attacker, defender, victim)
    }

    pub fn victim(&self) -> Combatant {
        self.victim
    }

    fn apply(&mut self) -> Result<(), BattleError> {
        self.core.mark_applied(Self::NAME)
    }

    fn decorate(&self, fighters: &FighterPair) -> Result<BattleMessage, BattleError> {
        self.core.ensure_applied(Self::NAME)?;

        let victim = fighters.get(self.victim);
        if victim.is_live() {
            Ok(BattleMessage::new("You died."))
        } else {
            Ok(BattleMessage::new("You defeated {{ victim }}.").with("victim", victim.name()))
        }
    }
}

// ============================================================================
// Battle Event
// ============================================================================

/// Closed set of combat occurrences.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    Damage(DamageEvent),
    CriticalHit(CriticalHitEvent),
    Death(DeathEvent),
}

impl BattleEvent {
    fn core(&self) -> &EventCore {
        match self {
            Self::Damage(event) => &event.core,
            Self::CriticalHit(event) => &event.core,
            Self::Death(event) => &event.core,
        }
    }

    /// Variant name used in errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Damage(_) => DamageEvent::NAME,
            Self::CriticalHit(_) => CriticalHitEvent::NAME,
            Self::Death(_) => DeathEvent::NAME,
        }
    }

    pub fn attacker(&self) -> Combatant {
        self.core().attacker
    }

    pub fn defender(&self) -> Combatant {
        self.core().defender
    }

    pub fn is_applied(&self) -> bool {
        self.core().applied
    }

    pub fn as_damage(&self) -> Option<&DamageEvent> {
        match self {
            Self::Damage(event) => Some(event),
            _ => None,
        }
    }

    /// Apply this event's numeric effect. Exactly once.
    pub fn apply(&mut self, fighters: &mut FighterPair) -> Result<(), BattleError> {
        match self {
            Self::Damage(event) => event.apply(fighters),
            Self::CriticalHit(event) => event.apply(),
            Self::Death(event) => event.apply(),
        }
    }

    /// Render this event into a message. Requires prior application.
    ///
    /// Only critical hits below the narration threshold yield `None`.
    pub fn decorate(&self, fighters: &FighterPair) -> Result<Option<BattleMessage>, BattleError> {
        match self {
            Self::Damage(event) => event.decorate(fighters).map(Some),
            Self::CriticalHit(event) => event.decorate(fighters),
            Self::Death(event) => event.decorate(fighters).map(Some),
        }
    }
}

impl From<DamageEvent> for BattleEvent {
    fn from(event: DamageEvent) -> Self {
        Self::Damage(event)
    }
}

impl From<CriticalHitEvent> for BattleEvent {
    fn from(event: CriticalHitEvent) -> Self {
        Self::CriticalHit(event)
    }
}

impl From<DeathEvent> for BattleEvent {
    fn from(event: DeathEvent) -> Self {
        Self::Death(event)
    }
}
