//! Modifier contributions: the unifying data model the aggregator folds over.

use super::bonus::Bonus;
use super::channel::{SpecialKey, StatChannel, StatFlags};
use crate::ids::{EvolutionId, ItemId, MetaUpgradeId, PassiveId, RelicId, SetId};

/// A single typed contribution from a modifier source.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Modifier {
    /// Flat additive bonus on a channel (`+5 DEF`).
    Flat { channel: StatChannel, value: i32 },
    /// Percentage multiplier on a channel (`+20% damage`).
    Percent { channel: StatChannel, percent: i32 },
    /// Boolean flags (stun immunity, auto-revive, ...).
    Flag(StatFlags),
    /// Keyed special value (execute threshold, thorns, ...).
    Keyed { key: SpecialKey, value: i32 },
}

impl Modifier {
    pub fn flat(channel: StatChannel, value: i32) -> Self {
        Modifier::Flat { channel, value }
    }

    pub fn percent(channel: StatChannel, percent: i32) -> Self {
        Modifier::Percent { channel, percent }
    }

    pub fn keyed(key: SpecialKey, value: i32) -> Self {
        Modifier::Keyed { key, value }
    }

    /// Scales the numeric part by `rank` (used for ranked meta upgrades).
    pub fn scaled(&self, rank: u32) -> Self {
        let rank = rank.min(i32::MAX as u32) as i32;
        match self {
            Modifier::Flat { channel, value } => Modifier::flat(*channel, value.saturating_mul(rank)),
            Modifier::Percent { channel, percent } => {
                Modifier::percent(*channel, percent.saturating_mul(rank))
            }
            Modifier::Flag(flags) => Modifier::Flag(*flags),
            Modifier::Keyed { key, value } => Modifier::keyed(*key, value.saturating_mul(rank)),
        }
    }

    /// The bonus this modifier pushes onto its channel stack, if it targets one.
    pub fn channel_bonus(&self) -> Option<(StatChannel, Bonus)> {
        match self {
            Modifier::Flat { channel, value } => Some((*channel, Bonus::flat(*value))),
            Modifier::Percent { channel, percent } => Some((*channel, Bonus::increased(*percent))),
            Modifier::Flag(_) | Modifier::Keyed { .. } => None,
        }
    }
}

/// What a curse penalizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurseKind {
    HealingReceived,
    MaxHp,
    Atk,
    Def,
    AllStats,
    /// Blocks all EXP gain; the percent is ignored.
    NoExp,
}

/// A negative modifier carried by an item or relic.
///
/// Curses are penalties applied after positive stacking, so a large positive
/// bonus can never cancel them out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Curse {
    pub kind: CurseKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub percent: i32,
}

impl Curse {
    pub const fn new(kind: CurseKind, percent: i32) -> Self {
        Self { kind, percent }
    }
}

/// Identifies where a contribution came from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierSource {
    Equipment(ItemId),
    Gem(ItemId),
    UniqueEffect(ItemId),
    SetBonus { set: SetId, pieces: usize },
    Passive(PassiveId),
    Evolution(EvolutionId),
    Relic(RelicId),
    Curse(ItemId),
    RelicCurse(RelicId),
    Meta(MetaUpgradeId),
}
