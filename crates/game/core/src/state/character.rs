use crate::ids::{EvolutionId, PassiveId, RelicId, SkillId};
use crate::stats::DerivedStats;

use super::{Equipment, Inventory, StatusEffects};

/// Base attributes a character is created with.
///
/// AGI and LUCK were added after the first save version and default to 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseAttributes {
    pub str: i32,
    pub vit: i32,
    pub int: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub agi: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub luck: i32,
}

impl BaseAttributes {
    pub const fn new(str: i32, vit: i32, int: i32, agi: i32, luck: i32) -> Self {
        Self {
            str,
            vit,
            int,
            agi,
            luck,
        }
    }
}

/// The player character.
///
/// `derived` is owned by the stat aggregator and is fully rebuilt from the
/// other fields on every recompute.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub name: String,
    pub base: BaseAttributes,
    pub level: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub exp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gold: u32,
    pub hp: i32,
    pub mp: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: Equipment,
    #[cfg_attr(feature = "serde", serde(default))]
    pub inventory: Inventory,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: StatusEffects,
    #[cfg_attr(feature = "serde", serde(default))]
    pub passives: Vec<PassiveId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub relics: Vec<RelicId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub evolutions: Vec<EvolutionId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<SkillId>,
    /// Remaining hits that are fully negated.
    #[cfg_attr(feature = "serde", serde(default))]
    pub invulnerable_turns: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub derived: DerivedStats,
}

impl Character {
    /// A level 1 character with nothing equipped.
    ///
    /// HP and MP start at zero; recompute and [`restore`](Self::restore) to fill them.
    pub fn new(name: impl Into<String>, base: BaseAttributes) -> Self {
        Self {
            name: name.into(),
            base,
            level: 1,
            exp: 0,
            gold: 0,
            hp: 0,
            mp: 0,
            equipment: Equipment::default(),
            inventory: Inventory::new(),
            status: StatusEffects::new(),
            passives: Vec::new(),
            relics: Vec::new(),
            evolutions: Vec::new(),
            skills: Vec::new(),
            invulnerable_turns: 0,
            derived: DerivedStats::default(),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    /// Fills HP and MP to the current caps.
    pub fn restore(&mut self) {
        self.hp = self.derived.max_hp;
        self.mp = self.derived.max_mp;
    }

    /// Down-clamps current HP/MP to the caps. Never heals.
    pub fn clamp_resources(&mut self) {
        self.hp = self.hp.clamp(0, self.derived.max_hp.max(0));
        self.mp = self.mp.clamp(0, self.derived.max_mp.max(0));
    }

    /// Heals by `amount` after the healing-received multiplier. Returns the HP gained.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let scaled = (i64::from(amount.max(0)) * i64::from(self.derived.healing_multiplier.max(0))
            / 100) as i32;
        let before = self.hp;
        self.hp = self.hp.saturating_add(scaled).min(self.derived.max_hp);
        (self.hp - before).max(0)
    }

    /// Restores MP up to the cap. Returns the MP gained.
    pub fn restore_mp(&mut self, amount: i32) -> i32 {
        let before = self.mp;
        self.mp = self.mp.saturating_add(amount.max(0)).min(self.derived.max_mp);
        (self.mp - before).max(0)
    }

    pub fn knows_skill(&self, id: &SkillId) -> bool {
        self.skills.contains(id)
    }
}
