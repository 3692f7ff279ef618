//! Skill catalog loader.

use std::path::Path;

use crawl_core::env::SkillDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<SkillDefinition>,
}

pub struct SkillLoader;

impl SkillLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<SkillDefinition>> {
        let content = read_file(path)?;
        let catalog: SkillCatalog = parse_ron(&content, "skill catalog")?;
        Ok(catalog.skills)
    }
}
