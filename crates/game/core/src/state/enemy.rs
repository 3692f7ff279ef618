use crate::env::{EnemyRank, EnemyTemplate};
use crate::ids::{EnemyId, PassiveId, SkillId};
use crate::stats::{SpecialValues, StatFlags};

use super::StatusEffects;

/// Flags and keyed values resolved from an enemy's passives at spawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTraits {
    pub flags: StatFlags,
    pub specials: SpecialValues,
}

/// A live enemy, cloned from its template when the encounter starts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enemy {
    pub id: EnemyId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rank: EnemyRank,
    pub hp: i32,
    pub max_hp: i32,
    pub atk: i32,
    pub def: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub exp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gold: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<SkillId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub passives: Vec<PassiveId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: StatusEffects,
    #[cfg_attr(feature = "serde", serde(default))]
    pub invulnerable_turns: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub traits: EnemyTraits,
}

impl Enemy {
    pub fn spawn(template: &EnemyTemplate, traits: EnemyTraits) -> Self {
        let max_hp = template.hp.max(1);
        Self {
            id: template.id.clone(),
            name: template.name.clone(),
            rank: template.rank,
            hp: max_hp,
            max_hp,
            atk: template.atk.max(0),
            def: template.def.max(0),
            exp: template.exp,
            gold: template.gold,
            skills: template.skills.clone(),
            passives: template.passives.clone(),
            status: StatusEffects::new(),
            invulnerable_turns: 0,
            traits,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    pub fn is_boss(&self) -> bool {
        self.rank == EnemyRank::Boss
    }
}
