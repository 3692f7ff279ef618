use crate::ids::{EnemyId, ItemId, PassiveId, SkillId};

/// Read-only enemy and boss catalog.
pub trait EnemyOracle: Send + Sync {
    fn enemy(&self, id: &EnemyId) -> Option<EnemyTemplate>;

    /// Boss guarding the given floor, if the floor has one.
    fn boss_for_floor(&self, floor: u32) -> Option<EnemyTemplate>;

    /// Floor whose boss completes the run.
    fn milestone_floor(&self) -> u32;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyRank {
    #[default]
    Normal,
    Elite,
    Boss,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub id: EnemyId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rank: EnemyRank,
    pub hp: i32,
    pub atk: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub def: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub exp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gold: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<SkillId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub passives: Vec<PassiveId>,
    /// Loot table key handed to the [`LootOracle`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub drops: Vec<ItemId>,
}

/// External weighted loot-table collaborator.
pub trait LootOracle: Send + Sync {
    /// Picks a drop for `enemy` using a d100 `roll`, or nothing.
    fn roll_drop(&self, enemy: &EnemyTemplate, floor: u32, roll: u32) -> Option<ItemId>;
}
