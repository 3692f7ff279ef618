//! Modifier registry catalog loader: passives, relics, evolutions, run
//! modifiers and meta upgrades share one file.

use std::path::Path;

use crawl_core::env::{
    EvolutionDefinition, MetaUpgradeDefinition, PassiveDefinition, RelicDefinition,
    RunModifierDefinition,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifierCatalog {
    pub passives: Vec<PassiveDefinition>,
    pub relics: Vec<RelicDefinition>,
    pub evolutions: Vec<EvolutionDefinition>,
    pub run_modifiers: Vec<RunModifierDefinition>,
    pub meta_upgrades: Vec<MetaUpgradeDefinition>,
}

pub struct ModifierLoader;

impl ModifierLoader {
    pub fn load(path: &Path) -> LoadResult<ModifierCatalog> {
        let content = read_file(path)?;
        parse_ron(&content, "modifier catalog")
    }
}
