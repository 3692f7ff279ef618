//! Output of the stat aggregator.

use super::channel::{SpecialValues, StatFlags};

/// Complete derived stat block written onto the character by recompute.
///
/// Multipliers are percentages (`100` = identity). A missing field in an old
/// save falls back to [`Default`], which uses identity multipliers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DerivedStats {
    pub str: i32,
    pub vit: i32,
    pub int: i32,
    pub agi: i32,
    pub luck: i32,

    pub max_hp: i32,
    pub max_mp: i32,

    pub atk: i32,
    pub def: i32,
    /// Dodge chance in percent.
    pub dodge: i32,
    /// Crit chance in percent.
    pub crit: i32,

    /// Bonus magical damage in percent.
    pub spell_damage: i32,
    /// Lifesteal in percent of damage dealt.
    pub lifesteal: i32,
    pub gold_multiplier: i32,
    pub exp_multiplier: i32,
    pub healing_multiplier: i32,

    pub flags: StatFlags,
    pub specials: SpecialValues,
}

impl Default for DerivedStats {
    fn default() -> Self {
        Self {
            str: 0,
            vit: 0,
            int: 0,
            agi: 0,
            luck: 0,
            max_hp: 1,
            max_mp: 0,
            atk: 0,
            def: 0,
            dodge: 0,
            crit: 0,
            spell_damage: 0,
            lifesteal: 0,
            gold_multiplier: 100,
            exp_multiplier: 100,
            healing_multiplier: 100,
            flags: StatFlags::empty(),
            specials: SpecialValues::default(),
        }
    }
}
