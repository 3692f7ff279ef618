//! Item catalog loader.

use std::path::Path;

use crawl_core::env::{ItemTemplate, SetBonusDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemTemplate>,
    #[serde(default)]
    pub sets: Vec<SetBonusDefinition>,
}

/// Loader for the item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    pub fn load(path: &Path) -> LoadResult<ItemCatalog> {
        let content = read_file(path)?;
        parse_ron(&content, "item catalog")
    }
}
