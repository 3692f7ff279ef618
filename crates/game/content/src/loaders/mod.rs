//! Content loaders for reading game data from files.
//!
//! Each loader turns one RON/TOML file into `crawl-core` catalog types;
//! [`ContentFactory`] assembles them into a [`ContentCatalog`].
//!
//! [`ContentCatalog`]: crate::ContentCatalog

pub mod config;
pub mod enemies;
pub mod factory;
pub mod items;
pub mod loot;
pub mod modifiers;
pub mod skills;

pub use config::ConfigLoader;
pub use enemies::{EnemyCatalog, EnemyLoader};
pub use factory::ContentFactory;
pub use items::{ItemCatalog, ItemLoader};
pub use loot::LootLoader;
pub use modifiers::{ModifierCatalog, ModifierLoader};
pub use skills::{SkillCatalog, SkillLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Parses a RON document, naming `what` in the error.
pub(crate) fn parse_ron<T: serde::de::DeserializeOwned>(content: &str, what: &str) -> LoadResult<T> {
    ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse {} RON: {}", what, e))
}
