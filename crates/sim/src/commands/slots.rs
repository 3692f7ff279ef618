//! List save slots.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use crawl_runtime::{FileSaveRepository, RuntimeConfig, SaveRepository};

/// List save slots
#[derive(Parser)]
pub struct Slots {
    /// Save directory (defaults to CRAWL_SAVE_DIR or the platform location)
    #[arg(long, value_name = "DIR")]
    save_dir: Option<PathBuf>,

    /// Delete this slot instead of listing
    #[arg(long, value_name = "SLOT")]
    delete: Option<String>,
}

impl Slots {
    pub fn execute(self) -> Result<()> {
        let save_dir = self
            .save_dir
            .unwrap_or_else(|| RuntimeConfig::from_env().save_dir);
        let repository = FileSaveRepository::new(&save_dir)?;

        if let Some(slot) = self.delete {
            repository.delete(&slot)?;
            println!("deleted {slot}");
            return Ok(());
        }

        let slots = repository.list_slots()?;
        if slots.is_empty() {
            println!("no saves under {}", save_dir.display());
        }
        for slot in slots {
            println!("{slot}");
        }
        Ok(())
    }
}
