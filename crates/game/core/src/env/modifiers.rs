//! Modifier Registry catalogs: passives, relics, evolutions, run modifiers
//! and meta-progression upgrades.

use crate::ids::{EvolutionId, MetaUpgradeId, PassiveId, RelicId, RunModifierId};
use crate::stats::{Curse, Modifier, StatFlags};

pub trait ModifierOracle: Send + Sync {
    fn passive(&self, id: &PassiveId) -> Option<PassiveDefinition>;

    fn relic(&self, id: &RelicId) -> Option<RelicDefinition>;

    fn evolution(&self, id: &EvolutionId) -> Option<EvolutionDefinition>;

    fn run_modifier(&self, id: &RunModifierId) -> Option<RunModifierDefinition>;

    fn meta_upgrade(&self, id: &MetaUpgradeId) -> Option<MetaUpgradeDefinition>;
}

/// Passive ability. Its `stats` table may mix multipliers, flat bonuses and flags.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassiveDefinition {
    pub id: PassiveId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: Vec<Modifier>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelicDefinition {
    pub id: RelicId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: Vec<Modifier>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub curse: Option<Curse>,
}

/// Evolutions behave like passives that are granted by progression.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolutionDefinition {
    pub id: EvolutionId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: Vec<Modifier>,
}

/// Challenge toggle selected at run start (e.g. "Glass Cannon").
///
/// Multipliers are percentages applied as the very last pipeline pass.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunModifierDefinition {
    pub id: RunModifierId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default = "identity_percent"))]
    pub max_hp: i32,
    #[cfg_attr(feature = "serde", serde(default = "identity_percent"))]
    pub atk: i32,
    #[cfg_attr(feature = "serde", serde(default = "identity_percent"))]
    pub def: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: StatFlags,
}

#[cfg(feature = "serde")]
fn identity_percent() -> i32 {
    100
}

/// Permanent upgrade bought with meta currency; contributes once per rank.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetaUpgradeDefinition {
    pub id: MetaUpgradeId,
    pub name: String,
    pub max_rank: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub per_rank: Vec<Modifier>,
}
