//! Load content files and report cross-reference problems.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use crawl_content::ContentFactory;

use super::DEFAULT_DATA_DIR;

/// Load content files and report cross-reference problems
#[derive(Parser)]
pub struct Validate {
    /// Content directory holding config.toml and the RON catalogs
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,
}

impl Validate {
    pub fn execute(self) -> Result<()> {
        let factory = ContentFactory::new(&self.data_dir);
        factory.load_config().context("config.toml")?;
        factory.load_loot().context("loot.ron")?;
        let catalog = factory.load_catalog()?;

        let issues = catalog.validate();
        for issue in &issues {
            println!("{issue}");
        }
        if !issues.is_empty() {
            bail!("{} content issue(s) in {}", issues.len(), self.data_dir.display());
        }

        println!(
            "ok: {} items, {} enemies, {} boss floors",
            catalog.items().count(),
            catalog.enemies().count(),
            catalog.boss_floors().count()
        );
        Ok(())
    }
}
