//! Content factory for building the catalog from data files.

use std::path::{Path, PathBuf};

use crawl_core::GameConfig;

use crate::catalog::ContentCatalog;
use crate::loaders::{
    ConfigLoader, EnemyLoader, ItemLoader, LoadResult, LootLoader, ModifierLoader, SkillLoader,
};
use crate::loot::WeightedLootTable;

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── items.ron
/// ├── skills.ron
/// ├── modifiers.ron
/// ├── enemies.ron
/// └── loot.ron      (optional)
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load balance configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load every catalog file into one [`ContentCatalog`].
    pub fn load_catalog(&self) -> LoadResult<ContentCatalog> {
        let mut catalog = ContentCatalog::new();

        let items = ItemLoader::load(&self.data_dir.join("items.ron"))?;
        items.items.into_iter().for_each(|item| catalog.add_item(item));
        items.sets.into_iter().for_each(|set| catalog.add_set(set));

        let skills = SkillLoader::load(&self.data_dir.join("skills.ron"))?;
        skills.into_iter().for_each(|skill| catalog.add_skill(skill));

        let modifiers = ModifierLoader::load(&self.data_dir.join("modifiers.ron"))?;
        modifiers.passives.into_iter().for_each(|p| catalog.add_passive(p));
        modifiers.relics.into_iter().for_each(|r| catalog.add_relic(r));
        modifiers.evolutions.into_iter().for_each(|e| catalog.add_evolution(e));
        modifiers.run_modifiers.into_iter().for_each(|m| catalog.add_run_modifier(m));
        modifiers.meta_upgrades.into_iter().for_each(|m| catalog.add_meta_upgrade(m));

        let enemies = EnemyLoader::load(&self.data_dir.join("enemies.ron"))?;
        enemies.enemies.into_iter().for_each(|enemy| catalog.add_enemy(enemy));
        for (floor, boss) in enemies.bosses {
            catalog.set_boss(floor, boss);
        }
        catalog.set_milestone_floor(enemies.milestone_floor);

        Ok(catalog)
    }

    /// Load the loot table from `loot.ron`, or the default table if the file
    /// does not exist.
    pub fn load_loot(&self) -> LoadResult<WeightedLootTable> {
        let path = self.data_dir.join("loot.ron");
        if !path.exists() {
            return Ok(WeightedLootTable::default());
        }
        LootLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
