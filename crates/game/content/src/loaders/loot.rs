//! Loot table loader.

use std::path::Path;

use crate::loaders::{LoadResult, parse_ron, read_file};
use crate::loot::WeightedLootTable;

pub struct LootLoader;

impl LootLoader {
    pub fn load(path: &Path) -> LoadResult<WeightedLootTable> {
        let content = read_file(path)?;
        parse_ron(&content, "loot table")
    }
}
