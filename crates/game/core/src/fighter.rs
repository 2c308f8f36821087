//! Combatant snapshots.
//!
//! A [`Fighter`] is a mutable copy of a combatant's stats, created once per
//! fight and mutated in place by damage. It comes either from the live player
//! character ([`Side::Player`]) or from a static creature/master template
//! ([`Side::Opponent`]); both expose the same read/write contract and the
//! engine selects behavior from the [`Side`] tag alone.
//!
//! Health is never clamped here. It may go negative while events are
//! applied; the engine only compares `<= 0` to detect death.

use std::collections::BTreeMap;

use crate::env::Character;
use crate::value::Value;

/// Which kind of combatant a fighter was built from.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    /// Snapshot of the live player character. Health is written back.
    Player,
    /// Ad-hoc fighter from a creature or master template.
    #[default]
    Opponent,
}

/// Handle to one of the two seats of a battle.
///
/// Serialized as its snake_case name (`"good_guy"`, `"bad_guy"`) so that it
/// reads back through self-describing formats inside an untagged [`Value`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::IntoStaticStr,
    strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "&'static str", try_from = "String"))]
#[strum(serialize_all = "snake_case")]
pub enum Combatant {
    GoodGuy,
    BadGuy,
}

impl TryFrom<String> for Combatant {
    type Error = strum::ParseError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl Combatant {
    /// The other seat.
    pub const fn opponent(self) -> Self {
        match self {
            Self::GoodGuy => Self::BadGuy,
            Self::BadGuy => Self::GoodGuy,
        }
    }
}

// ============================================================================
// Fighter
// ============================================================================

/// Mutable combatant snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fighter {
    side: Side,
    name: Option<String>,
    level: Option<i32>,
    weapon: Option<String>,
    health: Option<i32>,
    max_health: Option<i32>,
    attack: Option<i32>,
    defense: Option<i32>,
    /// Template-only payload (reward gold/experience, flavor text).
    #[cfg_attr(feature = "serde", serde(default))]
    extra: BTreeMap<String, Value>,
}

impl Fighter {
    /// Creates an empty fighter on the given side.
    pub fn new(side: Side) -> Self {
        Self {
            side,
            ..Self::default()
        }
    }

    /// Snapshot the live character's current combat values.
    pub fn from_character(character: &dyn Character) -> Self {
        Self {
            side: Side::Player,
            name: Some(character.name().to_owned()),
            level: Some(character.level()),
            weapon: character.weapon().map(str::to_owned),
            health: Some(character.health()),
            max_health: Some(character.max_health()),
            attack: Some(character.attack()),
            defense: Some(character.defense()),
            extra: BTreeMap::new(),
        }
    }

    /// Build a fresh opponent from a static template.
    pub fn from_template(template: &FighterTemplate) -> Self {
        Self {
            side: Side::Opponent,
            name: Some(template.name.clone()),
            level: Some(template.level),
            weapon: template.weapon.clone(),
            health: Some(template.health),
            max_health: Some(template.health),
            attack: Some(template.attack),
            defense: Some(template.defense),
            extra: template.extra.clone(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: i32) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use]
    pub fn with_weapon(mut self, weapon: impl Into<String>) -> Self {
        self.weapon = Some(weapon.into());
        self
    }

    /// Sets both current and maximum health.
    #[must_use]
    pub fn with_health(mut self, health: i32) -> Self {
        self.health = Some(health);
        self.max_health = Some(health);
        self
    }

    #[must_use]
    pub fn with_attack(mut self, attack: i32) -> Self {
        self.attack = Some(attack);
        self
    }

    #[must_use]
    pub fn with_defense(mut self, defense: i32) -> Self {
        self.defense = Some(defense);
        self
    }

    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// True when this fighter stands in for the live player character.
    pub fn is_live(&self) -> bool {
        self.side == Side::Player
    }

    /// Name, or an empty string if unset.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    // Unset numeric stats read as zero.

    pub fn level(&self) -> i32 {
        self.level.unwrap_or_default()
    }

    pub fn weapon(&self) -> Option<&str> {
        self.weapon.as_deref()
    }

    pub fn health(&self) -> i32 {
        self.health.unwrap_or_default()
    }

    pub fn max_health(&self) -> i32 {
        self.max_health.unwrap_or_default()
    }

    pub fn attack(&self) -> i32 {
        self.attack.unwrap_or_default()
    }

    pub fn defense(&self) -> i32 {
        self.defense.unwrap_or_default()
    }

    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    pub fn extra_int(&self, key: &str) -> Option<i64> {
        self.extra.get(key).and_then(Value::as_int)
    }

    pub fn extra_text(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_text)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn set_level(&mut self, level: i32) {
        self.level = Some(level);
    }

    pub fn set_weapon(&mut self, weapon: Option<String>) {
        self.weapon = weapon;
    }

    pub fn set_health(&mut self, health: i32) {
        self.health = Some(health);
    }

    pub fn set_max_health(&mut self, max_health: i32) {
        self.max_health = Some(max_health);
    }

    pub fn set_attack(&mut self, attack: i32) {
        self.attack = Some(attack);
    }

    pub fn set_defense(&mut self, defense: i32) {
        self.defense = Some(defense);
    }

    pub fn insert_extra(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.extra.insert(key.into(), value.into());
    }

    /// Subtract `amount` from health. No clamping.
    pub fn damage(&mut self, amount: i32) {
        self.health = Some(self.health() - amount);
    }

    pub fn is_dead(&self) -> bool {
        self.health() <= 0
    }
}

// ============================================================================
// Fighter Template
// ============================================================================

/// Static stat block of a creature or master.
///
/// Reward metadata (`gold`, `experience`, `textDefeated`, `textLost`) travels
/// opaquely in `extra` and ends up on the fighter built from the template.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FighterTemplate {
    pub name: String,
    pub level: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapon: Option<String>,
    pub health: i32,
    pub attack: i32,
    pub defense: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub extra: BTreeMap<String, Value>,
}

// ============================================================================
// Fighter Pair
// ============================================================================

/// The two fighters of a battle, addressed by [`Combatant`].
///
/// Events hold handles rather than copies so that damage applied through an
/// event is what the battle state reads afterwards.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FighterPair {
    pub good_guy: Fighter,
    pub bad_guy: Fighter,
}

impl FighterPair {
    pub fn new(good_guy: Fighter, bad_guy: Fighter) -> Self {
        Self { good_guy, bad_guy }
    }

    pub fn get(&self, combatant: Combatant) -> &Fighter {
        match combatant {
            Combatant::GoodGuy => &self.good_guy,
            Combatant::BadGuy => &self.bad_guy,
        }
    }

    pub fn get_mut(&mut self, combatant: Combatant) -> &mut Fighter {
        match combatant {
            Combatant::GoodGuy => &mut self.good_guy,
            Combatant::BadGuy => &mut self.bad_guy,
        }
    }

    /// Seat of the live player fighter, if either fighter is live.
    pub fn live(&self) -> Option<Combatant> {
        if self.good_guy.is_live() {
            Some(Combatant::GoodGuy)
        } else if self.bad_guy.is_live() {
            Some(Combatant::BadGuy)
        } else {
            None
        }
    }
}
