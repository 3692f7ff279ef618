//! Enemy and boss catalog loader.

use std::path::Path;

use crawl_core::EnemyId;
use crawl_core::env::EnemyTemplate;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Enemy catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnemyCatalog {
    pub enemies: Vec<EnemyTemplate>,
    /// `(floor, enemy)` pairs.
    #[serde(default)]
    pub bosses: Vec<(u32, EnemyId)>,
    /// Floor whose boss completes the run.
    pub milestone_floor: u32,
}

pub struct EnemyLoader;

impl EnemyLoader {
    pub fn load(path: &Path) -> LoadResult<EnemyCatalog> {
        let content = read_file(path)?;
        parse_ron(&content, "enemy catalog")
    }
}
