//! Dice oracle for combat randomness.
//!
//! The combat engine never touches a global RNG: every roll goes through a
//! [`DiceBag`], so battles are reproducible under test with
//! [`ScriptedDiceBag`] and replayable in production with a seeded
//! [`PcgDiceBag`].
//!
//! # Determinism
//!
//! Given the same seed, [`PcgDiceBag`] produces the same sequence of draws.
//! Combined with the fixed draw order of a half-turn (critical chance, then
//! attack roll, then defense roll) this makes a whole fight replayable from
//! its seed.

use std::collections::VecDeque;

/// Source of randomness for combat resolution.
pub trait DiceBag {
    /// Draw an integer in `[min, max]` biased toward the center.
    ///
    /// The two extremes are about half as likely as any interior value.
    fn pseudo_bell(&mut self, min: i32, max: i32) -> i32;

    /// Returns `true` with the given probability.
    ///
    /// `precision` is the number of decimal digits of `probability` that are
    /// honoured.
    fn chance(&mut self, probability: f64, precision: u32) -> bool;

    /// Draw a real number from a symmetric bell around the midpoint of
    /// `[min, max]`. `min` may be negative.
    fn bell(&mut self, min: f64, max: f64) -> f64;
}

impl<D: DiceBag + ?Sized> DiceBag for &mut D {
    fn pseudo_bell(&mut self, min: i32, max: i32) -> i32 {
        (**self).pseudo_bell(min, max)
    }

    fn chance(&mut self, probability: f64, precision: u32) -> bool {
        (**self).chance(probability, precision)
    }

    fn bell(&mut self, min: f64, max: f64) -> f64 {
        (**self).bell(min, max)
    }
}

// ============================================================================
// PCG Dice Bag
// ============================================================================

/// Seeded dice bag backed by a PCG random number generator.
///
/// PCG is a family of simple, fast, space-efficient RNGs with excellent
/// statistical quality. This implementation uses PCG-XSH-RR, which produces
/// 32-bit output from 64-bit state.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Debug)]
pub struct PcgDiceBag {
    state: u64,
}

impl PcgDiceBag {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Highest decimal precision honoured by [`DiceBag::chance`].
    const MAX_PRECISION: u32 = 9;

    /// Creates a dice bag whose draw sequence is fully determined by `seed`.
    pub fn from_seed(seed: u64) -> Self {
        // One warm-up step so nearby seeds diverge immediately
        Self {
            state: Self::pcg_step(seed ^ Self::INCREMENT),
        }
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Next raw 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        Self::pcg_output(self.state)
    }

    /// Uniform draw in `[0, 1)`.
    fn uniform(&mut self) -> f64 {
        f64::from(self.next_u32()) / (f64::from(u32::MAX) + 1.0)
    }
}

impl DiceBag for PcgDiceBag {
    fn pseudo_bell(&mut self, min: i32, max: i32) -> i32 {
        let (low, high) = if min <= max { (min, max) } else { (max, min) };
        if low == high {
            return low;
        }

        // Rounding a continuous uniform draw gives each extreme only half a
        // unit of width, hence half the weight of interior values.
        let span = f64::from(high) - f64::from(low);
        (f64::from(low) + self.uniform() * span).round() as i32
    }

    fn chance(&mut self, probability: f64, precision: u32) -> bool {
        if probability <= 0.0 {
            return false;
        }
        if probability >= 1.0 {
            return true;
        }

        let scale = 10_u64.pow(precision.min(Self::MAX_PRECISION)) as f64;
        let roll = (self.uniform() * scale).floor();
        roll < (probability * scale).round()
    }

    fn bell(&mut self, min: f64, max: f64) -> f64 {
        let average = (self.uniform() + self.uniform()) / 2.0;
        min + (max - min) * average
    }
}

// ============================================================================
// Scripted Dice Bag
// ============================================================================

/// Dice bag that replays queued outcomes.
///
/// Each operation has its own queue. Once a queue runs dry the bag falls back
/// to a neutral outcome: `pseudo_bell` returns the lower bound, `chance`
/// returns `false` and `bell` returns the midpoint.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDiceBag {
    pseudo_bells: VecDeque<i32>,
    chances: VecDeque<bool>,
    bells: VecDeque<f64>,
    pseudo_bell_draws: usize,
    chance_draws: usize,
}

impl ScriptedDiceBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue values returned by successive `pseudo_bell` calls.
    #[must_use]
    pub fn with_pseudo_bells(mut self, values: impl IntoIterator<Item = i32>) -> Self {
        self.pseudo_bells.extend(values);
        self
    }

    /// Queue outcomes returned by successive `chance` calls.
    #[must_use]
    pub fn with_chances(mut self, values: impl IntoIterator<Item = bool>) -> Self {
        self.chances.extend(values);
        self
    }

    /// Queue values returned by successive `bell` calls.
    #[must_use]
    pub fn with_bells(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.bells.extend(values);
        self
    }

    /// Number of `pseudo_bell` calls served so far.
    pub fn pseudo_bell_draws(&self) -> usize {
        self.pseudo_bell_draws
    }

    /// Number of `chance` calls served so far.
    pub fn chance_draws(&self) -> usize {
        self.chance_draws
    }

    /// Number of queued `pseudo_bell` values not yet consumed.
    pub fn remaining_pseudo_bells(&self) -> usize {
        self.pseudo_bells.len()
    }
}

impl DiceBag for ScriptedDiceBag {
    fn pseudo_bell(&mut self, min: i32, max: i32) -> i32 {
        self.pseudo_bell_draws += 1;
        self.pseudo_bells
            .pop_front()
            .unwrap_or_else(|| min.min(max))
    }

    fn chance(&mut self, _probability: f64, _precision: u32) -> bool {
        self.chance_draws += 1;
        self.chances.pop_front().unwrap_or(false)
    }

    fn bell(&mut self, min: f64, max: f64) -> f64 {
        self.bells
            .pop_front()
            .unwrap_or_else(|| (min + max) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_is_deterministic_per_seed() {
        let mut a = PcgDiceBag::from_seed(42);
        let mut b = PcgDiceBag::from_seed(42);
        let mut c = PcgDiceBag::from_seed(43);

        let seq_a: Vec<_> = (0..16).map(|_| a.pseudo_bell(0, 100)).collect();
        let seq_b: Vec<_> = (0..16).map(|_| b.pseudo_bell(0, 100)).collect();
        let seq_c: Vec<_> = (0..16).map(|_| c.pseudo_bell(0, 100)).collect();

        assert_eq!(seq_a, seq_b);
        assert_ne!(seq_a, seq_c);
    }

    #[test]
    fn pseudo_bell_stays_in_range_and_halves_extremes() {
        let mut dice = PcgDiceBag::from_seed(7);
        let mut counts = [0_u32; 5];
        for _ in 0..40_000 {
            let roll = dice.pseudo_bell(0, 4);
            assert!((0..=4).contains(&roll));
            counts[roll as usize] += 1;
        }

        // Interior values ~10k each, extremes ~5k each
        for interior in &counts[1..4] {
            assert!((9_000..11_000).contains(interior), "{counts:?}");
        }
        assert!((4_000..6_000).contains(&counts[0]), "{counts:?}");
        assert!((4_000..6_000).contains(&counts[4]), "{counts:?}");
    }

    #[test]
    fn pseudo_bell_accepts_reversed_and_degenerate_bounds() {
        let mut dice = PcgDiceBag::from_seed(1);
        assert_eq!(dice.pseudo_bell(5, 5), 5);
        for _ in 0..100 {
            let roll = dice.pseudo_bell(10, -10);
            assert!((-10..=10).contains(&roll));
        }
    }

    #[test]
    fn chance_respects_certain_bounds() {
        let mut dice = PcgDiceBag::from_seed(3);
        for _ in 0..100 {
            assert!(!dice.chance(0.0, 4));
            assert!(dice.chance(1.0, 4));
        }
    }

    #[test]
    fn chance_frequency_tracks_probability() {
        let mut dice = PcgDiceBag::from_seed(11);
        let hits = (0..100_000).filter(|_| dice.chance(0.0263, 4)).count();
        assert!((2_200..3_100).contains(&hits), "hits = {hits}");
    }

    #[test]
    fn bell_is_centered_and_supports_negative_min() {
        let mut dice = PcgDiceBag::from_seed(5);
        let draws: Vec<f64> = (0..10_000).map(|_| dice.bell(-10.0, 10.0)).collect();
        assert!(draws.iter().all(|d| (-10.0..=10.0).contains(d)));
        let mean = draws.iter().sum::<f64>() / draws.len() as f64;
        assert!(mean.abs() < 0.5, "mean = {mean}");
    }

    #[test]
    fn scripted_replays_then_falls_back() {
        let mut dice = ScriptedDiceBag::new()
            .with_pseudo_bells([80, 30])
            .with_chances([true]);

        assert_eq!(dice.pseudo_bell(0, 100), 80);
        assert_eq!(dice.pseudo_bell(0, 100), 30);
        assert_eq!(dice.pseudo_bell(3, 100), 3);
        assert!(dice.chance(0.5, 2));
        assert!(!dice.chance(0.5, 2));
        assert_eq!(dice.bell(-4.0, 8.0), 2.0);
        assert_eq!(dice.pseudo_bell_draws(), 3);
        assert_eq!(dice.chance_draws(), 2);
    }
}
