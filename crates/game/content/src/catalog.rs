//! In-memory catalogs implementing the `crawl-core` oracle traits.

use std::collections::{BTreeMap, HashMap};

use crawl_core::env::{
    EnemyTemplate, EvolutionDefinition, ItemTemplate, MetaUpgradeDefinition, PassiveDefinition,
    RelicDefinition, RunModifierDefinition, SetBonusDefinition, SkillDefinition,
};
use crawl_core::{
    EnemyId, EnemyOracle, Env, EvolutionId, GameConfig, ItemId, ItemOracle, MetaUpgradeId,
    ModifierOracle, PassiveId, RelicId, RunModifierId, SetId, SkillId, SkillOracle,
};

/// A dangling reference found by [`ContentCatalog::validate`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogIssue {
    #[error("item '{item}' belongs to unknown set '{set}'")]
    UnknownSet { item: ItemId, set: SetId },

    #[error("enemy '{enemy}' uses unknown skill '{skill}'")]
    UnknownEnemySkill { enemy: EnemyId, skill: SkillId },

    #[error("enemy '{enemy}' has unknown passive '{passive}'")]
    UnknownEnemyPassive { enemy: EnemyId, passive: PassiveId },

    #[error("enemy '{enemy}' drops unknown item '{item}'")]
    UnknownDrop { enemy: EnemyId, item: ItemId },

    #[error("floor {floor} boss '{enemy}' is not in the enemy catalog")]
    UnknownBoss { floor: u32, enemy: EnemyId },

    #[error("milestone floor {0} has no boss")]
    MissingMilestoneBoss(u32),
}

/// Every static catalog in one place.
///
/// Data is immutable once loaded; the runtime shares it behind an `Arc`.
#[derive(Clone, Debug, Default)]
pub struct ContentCatalog {
    items: HashMap<ItemId, ItemTemplate>,
    sets: HashMap<SetId, SetBonusDefinition>,
    skills: HashMap<SkillId, SkillDefinition>,
    passives: HashMap<PassiveId, PassiveDefinition>,
    relics: HashMap<RelicId, RelicDefinition>,
    evolutions: HashMap<EvolutionId, EvolutionDefinition>,
    run_modifiers: HashMap<RunModifierId, RunModifierDefinition>,
    meta_upgrades: HashMap<MetaUpgradeId, MetaUpgradeDefinition>,
    enemies: HashMap<EnemyId, EnemyTemplate>,
    bosses: BTreeMap<u32, EnemyId>,
    milestone_floor: u32,
}

impl ContentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, item: ItemTemplate) {
        self.items.insert(item.id.clone(), item);
    }

    pub fn add_set(&mut self, set: SetBonusDefinition) {
        self.sets.insert(set.id.clone(), set);
    }

    pub fn add_skill(&mut self, skill: SkillDefinition) {
        self.skills.insert(skill.id.clone(), skill);
    }

    pub fn add_passive(&mut self, passive: PassiveDefinition) {
        self.passives.insert(passive.id.clone(), passive);
    }

    pub fn add_relic(&mut self, relic: RelicDefinition) {
        self.relics.insert(relic.id.clone(), relic);
    }

    pub fn add_evolution(&mut self, evolution: EvolutionDefinition) {
        self.evolutions.insert(evolution.id.clone(), evolution);
    }

    pub fn add_run_modifier(&mut self, modifier: RunModifierDefinition) {
        self.run_modifiers.insert(modifier.id.clone(), modifier);
    }

    pub fn add_meta_upgrade(&mut self, upgrade: MetaUpgradeDefinition) {
        self.meta_upgrades.insert(upgrade.id.clone(), upgrade);
    }

    pub fn add_enemy(&mut self, enemy: EnemyTemplate) {
        self.enemies.insert(enemy.id.clone(), enemy);
    }

    /// Registers `enemy` as the boss guarding `floor`.
    pub fn set_boss(&mut self, floor: u32, enemy: EnemyId) {
        self.bosses.insert(floor, enemy);
    }

    pub fn set_milestone_floor(&mut self, floor: u32) {
        self.milestone_floor = floor;
    }

    pub fn items(&self) -> impl Iterator<Item = &ItemTemplate> {
        self.items.values()
    }

    pub fn enemies(&self) -> impl Iterator<Item = &EnemyTemplate> {
        self.enemies.values()
    }

    pub fn run_modifiers(&self) -> impl Iterator<Item = &RunModifierDefinition> {
        self.run_modifiers.values()
    }

    /// Floors that have a boss, in ascending order.
    pub fn boss_floors(&self) -> impl Iterator<Item = u32> + '_ {
        self.bosses.keys().copied()
    }

    /// Environment wired to the catalogs. RNG and loot are added by the caller.
    pub fn env<'a>(&'a self, config: &'a GameConfig) -> Env<'a> {
        Env::new(config)
            .with_items(self)
            .with_skills(self)
            .with_modifiers(self)
            .with_enemies(self)
    }

    /// Cross-checks references between catalogs.
    pub fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();
        for item in self.items.values() {
            if let Some(set) = &item.set_bonus
                && !self.sets.contains_key(set)
            {
                issues.push(CatalogIssue::UnknownSet {
                    item: item.id.clone(),
                    set: set.clone(),
                });
            }
        }
        for enemy in self.enemies.values() {
            for skill in enemy.skills.iter().filter(|s| !self.skills.contains_key(*s)) {
                issues.push(CatalogIssue::UnknownEnemySkill {
                    enemy: enemy.id.clone(),
                    skill: skill.clone(),
                });
            }
            for passive in enemy.passives.iter().filter(|p| !self.passives.contains_key(*p)) {
                issues.push(CatalogIssue::UnknownEnemyPassive {
                    enemy: enemy.id.clone(),
                    passive: passive.clone(),
                });
            }
            for item in enemy.drops.iter().filter(|i| !self.items.contains_key(*i)) {
                issues.push(CatalogIssue::UnknownDrop {
                    enemy: enemy.id.clone(),
                    item: item.clone(),
                });
            }
        }
        for (floor, enemy) in &self.bosses {
            if !self.enemies.contains_key(enemy) {
                issues.push(CatalogIssue::UnknownBoss {
                    floor: *floor,
                    enemy: enemy.clone(),
                });
            }
        }
        if !self.bosses.contains_key(&self.milestone_floor) {
            issues.push(CatalogIssue::MissingMilestoneBoss(self.milestone_floor));
        }
        issues
    }
}

impl ItemOracle for ContentCatalog {
    fn item(&self, id: &ItemId) -> Option<ItemTemplate> {
        self.items.get(id).cloned()
    }

    fn set_bonus(&self, id: &SetId) -> Option<SetBonusDefinition> {
        self.sets.get(id).cloned()
    }
}

impl SkillOracle for ContentCatalog {
    fn skill(&self, id: &SkillId) -> Option<SkillDefinition> {
        self.skills.get(id).cloned()
    }
}

impl ModifierOracle for ContentCatalog {
    fn passive(&self, id: &PassiveId) -> Option<PassiveDefinition> {
        self.passives.get(id).cloned()
    }

    fn relic(&self, id: &RelicId) -> Option<RelicDefinition> {
        self.relics.get(id).cloned()
    }

    fn evolution(&self, id: &EvolutionId) -> Option<EvolutionDefinition> {
        self.evolutions.get(id).cloned()
    }

    fn run_modifier(&self, id: &RunModifierId) -> Option<RunModifierDefinition> {
        self.run_modifiers.get(id).cloned()
    }

    fn meta_upgrade(&self, id: &MetaUpgradeId) -> Option<MetaUpgradeDefinition> {
        self.meta_upgrades.get(id).cloned()
    }
}

impl EnemyOracle for ContentCatalog {
    fn enemy(&self, id: &EnemyId) -> Option<EnemyTemplate> {
        self.enemies.get(id).cloned()
    }

    fn boss_for_floor(&self, floor: u32) -> Option<EnemyTemplate> {
        self.bosses
            .get(&floor)
            .and_then(|id| self.enemies.get(id))
            .cloned()
    }

    fn milestone_floor(&self) -> u32 {
        self.milestone_floor
    }
}
