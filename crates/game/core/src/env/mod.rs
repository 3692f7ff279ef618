//! Read-only configuration collaborators.
//!
//! Oracles expose the item, skill, modifier and enemy catalogs plus the RNG
//! and loot-table collaborators. [`Env`] bundles them so rules code can reach
//! everything it needs without hard coupling to concrete implementations.
//! Lookups go through typed accessors returning `Result<_, OracleError>`, so a
//! missing entry is an explicit error at every call site.
mod enemies;
mod error;
mod items;
mod modifiers;
mod rng;
mod skills;

pub use enemies::{EnemyOracle, EnemyRank, EnemyTemplate, LootOracle};
pub use error::OracleError;
pub use items::{ConsumableEffect, ItemKind, ItemOracle, ItemStats, ItemTemplate, SetBonusDefinition};
pub use modifiers::{
    EvolutionDefinition, MetaUpgradeDefinition, ModifierOracle, PassiveDefinition,
    RelicDefinition, RunModifierDefinition,
};
pub use rng::{Dice, FixedRng, PcgRng, RngOracle, RollKind, compute_seed};
pub use skills::{
    DamageType, SkillArchetype, SkillDefinition, SkillKind, SkillOracle, SkillRequirement,
};

use crate::config::GameConfig;
use crate::ids::{
    EnemyId, EvolutionId, ItemId, MetaUpgradeId, PassiveId, RelicId, RunModifierId, SetId,
    SkillId,
};

/// Aggregates the read-only collaborators required by the rules.
#[derive(Clone, Copy)]
pub struct Env<'a> {
    config: &'a GameConfig,
    items: Option<&'a dyn ItemOracle>,
    skills: Option<&'a dyn SkillOracle>,
    modifiers: Option<&'a dyn ModifierOracle>,
    enemies: Option<&'a dyn EnemyOracle>,
    loot: Option<&'a dyn LootOracle>,
    rng: Option<&'a dyn RngOracle>,
}

impl<'a> Env<'a> {
    /// Creates an environment with only the balance configuration.
    pub fn new(config: &'a GameConfig) -> Self {
        Self {
            config,
            items: None,
            skills: None,
            modifiers: None,
            enemies: None,
            loot: None,
            rng: None,
        }
    }

    pub fn with_items(mut self, items: &'a dyn ItemOracle) -> Self {
        self.items = Some(items);
        self
    }

    pub fn with_skills(mut self, skills: &'a dyn SkillOracle) -> Self {
        self.skills = Some(skills);
        self
    }

    pub fn with_modifiers(mut self, modifiers: &'a dyn ModifierOracle) -> Self {
        self.modifiers = Some(modifiers);
        self
    }

    pub fn with_enemies(mut self, enemies: &'a dyn EnemyOracle) -> Self {
        self.enemies = Some(enemies);
        self
    }

    pub fn with_loot(mut self, loot: &'a dyn LootOracle) -> Self {
        self.loot = Some(loot);
        self
    }

    pub fn with_rng(mut self, rng: &'a dyn RngOracle) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    pub fn items(&self) -> Result<&'a dyn ItemOracle, OracleError> {
        self.items.ok_or(OracleError::ItemsNotAvailable)
    }

    pub fn skills(&self) -> Result<&'a dyn SkillOracle, OracleError> {
        self.skills.ok_or(OracleError::SkillsNotAvailable)
    }

    pub fn modifiers(&self) -> Result<&'a dyn ModifierOracle, OracleError> {
        self.modifiers.ok_or(OracleError::ModifiersNotAvailable)
    }

    pub fn enemies(&self) -> Result<&'a dyn EnemyOracle, OracleError> {
        self.enemies.ok_or(OracleError::EnemiesNotAvailable)
    }

    pub fn rng(&self) -> Result<&'a dyn RngOracle, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }

    /// The loot collaborator is optional; encounters without one drop nothing.
    pub fn loot(&self) -> Option<&'a dyn LootOracle> {
        self.loot
    }

    // ===== typed lookups =====

    pub fn item(&self, id: &ItemId) -> Result<ItemTemplate, OracleError> {
        self.items()?
            .item(id)
            .ok_or_else(|| OracleError::ItemNotFound(id.clone()))
    }

    pub fn set_bonus(&self, id: &SetId) -> Result<SetBonusDefinition, OracleError> {
        self.items()?
            .set_bonus(id)
            .ok_or_else(|| OracleError::SetNotFound(id.clone()))
    }

    pub fn skill(&self, id: &SkillId) -> Result<SkillDefinition, OracleError> {
        self.skills()?
            .skill(id)
            .ok_or_else(|| OracleError::SkillNotFound(id.clone()))
    }

    pub fn passive(&self, id: &PassiveId) -> Result<PassiveDefinition, OracleError> {
        self.modifiers()?
            .passive(id)
            .ok_or_else(|| OracleError::PassiveNotFound(id.clone()))
    }

    pub fn relic(&self, id: &RelicId) -> Result<RelicDefinition, OracleError> {
        self.modifiers()?
            .relic(id)
            .ok_or_else(|| OracleError::RelicNotFound(id.clone()))
    }

    pub fn evolution(&self, id: &EvolutionId) -> Result<EvolutionDefinition, OracleError> {
        self.modifiers()?
            .evolution(id)
            .ok_or_else(|| OracleError::EvolutionNotFound(id.clone()))
    }

    pub fn run_modifier(&self, id: &RunModifierId) -> Result<RunModifierDefinition, OracleError> {
        self.modifiers()?
            .run_modifier(id)
            .ok_or_else(|| OracleError::RunModifierNotFound(id.clone()))
    }

    pub fn meta_upgrade(&self, id: &MetaUpgradeId) -> Result<MetaUpgradeDefinition, OracleError> {
        self.modifiers()?
            .meta_upgrade(id)
            .ok_or_else(|| OracleError::MetaUpgradeNotFound(id.clone()))
    }

    pub fn enemy(&self, id: &EnemyId) -> Result<EnemyTemplate, OracleError> {
        self.enemies()?
            .enemy(id)
            .ok_or_else(|| OracleError::EnemyNotFound(id.clone()))
    }

    pub fn boss_for_floor(&self, floor: u32) -> Result<EnemyTemplate, OracleError> {
        self.enemies()?
            .boss_for_floor(floor)
            .ok_or(OracleError::BossNotFound(floor))
    }
}

impl core::fmt::Debug for Env<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Env")
            .field("config", self.config)
            .field("items", &self.items.is_some())
            .field("skills", &self.skills.is_some())
            .field("modifiers", &self.modifiers.is_some())
            .field("enemies", &self.enemies.is_some())
            .field("loot", &self.loot.is_some())
            .field("rng", &self.rng.is_some())
            .finish()
    }
}
