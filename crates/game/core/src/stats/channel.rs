//! Stat channels, boolean flags and keyed special values.
//!
//! These are the targets a [`Modifier`](super::Modifier) can address. Channels
//! carry a [`BonusStack`](super::BonusStack) in the aggregator; flags are OR-ed;
//! keyed specials are summed.

use bitflags::bitflags;
use strum::{EnumCount, EnumIter, IntoStaticStr};

/// A named stat channel that accumulates flat and percentage bonuses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumCount, EnumIter, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatChannel {
    Str,
    Vit,
    Int,
    Agi,
    Luck,
    /// Applies to all five primary attributes.
    AllStats,
    Hp,
    Mp,
    Atk,
    /// Flat DEF; percentages act as the armor multiplier.
    Def,
    /// Dodge chance in percentage points.
    Dodge,
    /// Crit chance in percentage points.
    Crit,
    /// Outgoing damage multiplier applied to ATK.
    Damage,
    /// Additional magical damage in percent.
    SpellDamage,
    /// Lifesteal in percent of damage dealt.
    Lifesteal,
    Gold,
    Exp,
    HealingReceived,
}

impl StatChannel {
    pub const PRIMARY: [StatChannel; 5] = [
        StatChannel::Str,
        StatChannel::Vit,
        StatChannel::Int,
        StatChannel::Agi,
        StatChannel::Luck,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        self.into()
    }
}

bitflags! {
    /// Boolean stat flags contributed by passives, relics, curses and run modifiers.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct StatFlags: u16 {
        /// Stun effects cannot be applied.
        const STUN_IMMUNE = 1 << 0;
        /// EXP gain is forced to zero.
        const NO_EXP      = 1 << 1;
        /// Auto-revive is forbidden for the run.
        const NO_REVIVE   = 1 << 2;
        /// One-shot revive on defeat.
        const AUTO_REVIVE = 1 << 3;
        /// Flat dodge roll before any other dodge source.
        const ETHEREAL    = 1 << 4;
        /// Flat dodge roll checked after ETHEREAL.
        const INTANGIBLE  = 1 << 5;
    }
}

/// Keyed special values. Contributions with the same key are summed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumCount, EnumIter, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpecialKey {
    /// Enemies at or below this percent of max HP after a basic attack die.
    ExecuteThreshold,
    /// Percent of mitigated damage reflected to the attacker.
    Thorns,
    /// Dodge chance granted by equipped sets.
    SetDodge,
    /// Dodge chance granted by unique item effects.
    UniqueDodge,
    /// Percent of max HP restored on kill.
    KillHeal,
    /// Flat damage added to basic attacks and skill bonuses.
    BonusDamage,
}

/// Summed keyed special values, indexed by [`SpecialKey`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecialValues([i32; SpecialKey::COUNT]);

impl SpecialValues {
    pub fn get(&self, key: SpecialKey) -> i32 {
        self.0[key as usize]
    }

    pub fn add(&mut self, key: SpecialKey, value: i32) {
        self.0[key as usize] = self.0[key as usize].saturating_add(value);
    }
}
