//! Bonus application for a single stat channel.
//!
//! Stacks apply in a fixed order:
//! Flat → %Inc → More → Less → Clamp
//!
//! `Increased` percentages are summed before multiplying (two "+20% damage"
//! passives give ×1.4, not ×1.44). `More`/`Less` are applied one at a time.

/// A single bonus that can be applied to a stat value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bonus {
    /// Flat additive bonus (applied first)
    Flat(i32),

    /// Percentage increase, summed with other %Inc then multiplied.
    /// Stored as integer percentage (e.g., 20 = +20%)
    Increased(i32),

    /// Multiplicative "more" modifier (e.g., 50 = ×1.5)
    More(i32),

    /// Multiplicative "less" modifier (e.g., 10 = ×0.9)
    Less(i32),
}

impl Bonus {
    pub fn flat(value: i32) -> Self {
        Bonus::Flat(value)
    }

    pub fn increased(percent: i32) -> Self {
        Bonus::Increased(percent)
    }

    pub fn more(percent: i32) -> Self {
        Bonus::More(percent)
    }

    pub fn less(percent: i32) -> Self {
        Bonus::Less(percent)
    }
}

/// A collection of bonuses that will be applied in the correct order.
///
/// # Example
/// ```
/// # use crawl_core::stats::{Bonus, BonusStack};
/// let mut stack = BonusStack::new();
/// stack.add(Bonus::flat(5));           // +5
/// stack.add(Bonus::increased(20));     // +20%
/// stack.add(Bonus::increased(15));     // +15% (summed)
/// stack.add(Bonus::more(50));          // ×1.5
/// stack.add(Bonus::less(10));          // ×0.9
///
/// // (10 + 5) × 1.35 = 20, × 1.5 = 30, × 0.9 = 27
/// assert_eq!(stack.apply(10, 5, 100), 27);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BonusStack {
    bonuses: Vec<Bonus>,
}

impl BonusStack {
    pub fn new() -> Self {
        Self {
            bonuses: Vec::new(),
        }
    }

    pub fn add(&mut self, bonus: Bonus) {
        self.bonuses.push(bonus);
    }

    pub fn extend(&mut self, bonuses: impl IntoIterator<Item = Bonus>) {
        self.bonuses.extend(bonuses);
    }

    /// Returns a new stack holding the bonuses of both stacks.
    pub fn chain(&self, other: &BonusStack) -> BonusStack {
        let mut merged = self.clone();
        merged.extend(other.bonuses.iter().copied());
        merged
    }

    /// Sum of flat bonuses.
    pub fn flat_total(&self) -> i32 {
        self.bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::Flat(v) => Some(*v),
                _ => None,
            })
            .sum()
    }

    /// Applies the multiplicative part of the stack (%Inc, More, Less) to `value`.
    ///
    /// Every step floors toward zero, as integer division does.
    pub fn scale(&self, value: i32) -> i32 {
        let inc_sum: i64 = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::Increased(p) => Some(i64::from(*p)),
                _ => None,
            })
            .sum();

        let after_inc = (i64::from(value) * (100 + inc_sum).max(0)) / 100;

        let after_more = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::More(p) => Some(i64::from(*p)),
                _ => None,
            })
            .fold(after_inc, |acc, more| (acc * (100 + more).max(0)) / 100);

        let after_less = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::Less(p) => Some(i64::from(*p)),
                _ => None,
            })
            .fold(after_more, |acc, less| (acc * (100 - less).max(0)) / 100);

        after_less.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }

    /// The stack's multiplier as a percentage (`100` = identity).
    pub fn multiplier_percent(&self) -> i32 {
        self.scale(100)
    }

    /// `clamp((base + flat) × (1 + inc/100) × more × less, min, max)`
    pub fn apply(&self, base: i32, min: i32, max: i32) -> i32 {
        self.scale(base.saturating_add(self.flat_total()))
            .clamp(min, max)
    }
}

/// Clamp bounds for the different stat families.
#[derive(Clone, Copy, Debug)]
pub struct StatBounds {
    pub min: i32,
    pub max: i32,
}

impl StatBounds {
    /// Primary attributes never go negative.
    pub const ATTRIBUTES: Self = Self { min: 0, max: 9_999 };

    /// Resource caps: at least 1 HP so a character is never born dead.
    pub const RESOURCE_MAXIMUMS: Self = Self { min: 1, max: 99_999 };

    pub const COMBAT: Self = Self { min: 0, max: 99_999 };

    pub const PERCENT: Self = Self { min: 0, max: 100 };
}

/// Applies a curse-style penalty after all positive stacking.
pub fn apply_penalty(value: i32, percent: i32) -> i32 {
    let keep = i64::from(100 - percent.clamp(0, 100));
    ((i64::from(value) * keep) / 100) as i32
}
