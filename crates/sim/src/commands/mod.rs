//! Subcommand implementations.

mod inspect;
mod play;
mod slots;
mod validate;

pub use inspect::Inspect;
pub use play::Play;
pub use slots::Slots;
pub use validate::Validate;

use std::path::Path;

use anyhow::{Context, Result};
use crawl_content::ContentFactory;
use crawl_runtime::OracleBundle;

/// Bundled content, relative to the workspace root.
pub const DEFAULT_DATA_DIR: &str = "crates/game/content/data";

/// Loads every content file under `data_dir` into an oracle bundle.
pub fn load_oracles(data_dir: &Path) -> Result<OracleBundle> {
    let factory = ContentFactory::new(data_dir);
    let catalog = factory
        .load_catalog()
        .with_context(|| format!("loading catalog from {}", data_dir.display()))?;
    let loot = factory.load_loot().context("loading loot table")?;
    let config = factory.load_config().context("loading balance config")?;

    for issue in catalog.validate() {
        tracing::warn!("content issue: {}", issue);
    }

    Ok(OracleBundle::new(catalog, loot, config))
}
