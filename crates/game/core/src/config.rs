/// Feature toggles of a single battle.
///
/// Fixed when the battle starts and never changed afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleOptions {
    /// Scale defense by the level ratio when the live character is involved.
    pub level_adjustment: bool,
    /// Let the live character land tripled attacks.
    pub critical_hits: bool,
    /// Turn negative damage into half-strength counter damage instead of zero.
    pub riposte: bool,
    /// Allow the live character to attempt to flee.
    pub allow_flee: bool,
}

impl BattleOptions {
    /// All toggles off.
    pub const fn plain() -> Self {
        Self {
            level_adjustment: false,
            critical_hits: false,
            riposte: false,
            allow_flee: false,
        }
    }

    #[must_use]
    pub const fn with_level_adjustment(mut self, enabled: bool) -> Self {
        self.level_adjustment = enabled;
        self
    }

    #[must_use]
    pub const fn with_critical_hits(mut self, enabled: bool) -> Self {
        self.critical_hits = enabled;
        self
    }

    #[must_use]
    pub const fn with_riposte(mut self, enabled: bool) -> Self {
        self.riposte = enabled;
        self
    }

    #[must_use]
    pub const fn with_allow_flee(mut self, enabled: bool) -> Self {
        self.allow_flee = enabled;
        self
    }
}

impl Default for BattleOptions {
    fn default() -> Self {
        Self {
            level_adjustment: true,
            critical_hits: true,
            riposte: true,
            allow_flee: true,
        }
    }
}

/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Toggles used when a battle is started without explicit options.
    pub options: BattleOptions,
    /// How many half-turn pairs may come back without damage before a round
    /// gives up with an error.
    pub max_half_turn_attempts: u32,
    /// Probability that a flee attempt succeeds.
    pub flee_chance: f64,
}

impl BattleConfig {
    // ===== combat formula constants =====
    /// 1-in-20 roll where the two boundary values count half: 1/19 ÷ 2.
    pub const CRITICAL_HIT_CHANCE: f64 = 0.0263;
    pub const CRITICAL_HIT_PRECISION: u32 = 4;
    pub const CRITICAL_HIT_MULTIPLIER: f64 = 3.0;
    pub const FLEE_PRECISION: u32 = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_HALF_TURN_ATTEMPTS: u32 = 1000;
    pub const DEFAULT_FLEE_CHANCE: f64 = 1.0 / 3.0;

    pub fn new() -> Self {
        Self {
            options: BattleOptions::default(),
            max_half_turn_attempts: Self::DEFAULT_MAX_HALF_TURN_ATTEMPTS,
            flee_chance: Self::DEFAULT_FLEE_CHANCE,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: BattleOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_max_half_turn_attempts(mut self, attempts: u32) -> Self {
        self.max_half_turn_attempts = attempts.max(1);
        self
    }

    #[must_use]
    pub fn with_flee_chance(mut self, chance: f64) -> Self {
        self.flee_chance = chance.clamp(0.0, 1.0);
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
