//! Print the contents of a save slot.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use crawl_runtime::{FileSaveRepository, RuntimeConfig, SaveRepository};

/// Print the contents of a save slot
#[derive(Parser)]
pub struct Inspect {
    /// Save slot to read (defaults to CRAWL_SAVE_SLOT or "autosave")
    #[arg(value_name = "SLOT")]
    slot: Option<String>,

    /// Save directory (defaults to CRAWL_SAVE_DIR or the platform location)
    #[arg(long, value_name = "DIR")]
    save_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Character, run and session overview
    Summary,
    /// Full JSON state
    Json,
}

impl Inspect {
    pub fn execute(self) -> Result<()> {
        let config = RuntimeConfig::from_env();
        let save_dir = self.save_dir.unwrap_or(config.save_dir);
        let slot = self.slot.unwrap_or(config.save_slot);

        let repository = FileSaveRepository::new(&save_dir)?;
        let Some(state) = repository
            .load(&slot)
            .with_context(|| format!("reading slot '{slot}'"))?
        else {
            bail!("no save in slot '{}' under {}", slot, save_dir.display());
        };

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&state)?),
            OutputFormat::Summary => {
                let character = &state.character;
                println!("slot       {slot}");
                println!("mode       {:?}", state.mode);
                println!("seed       {}", state.run.seed);
                println!("floor      {}", state.run.floor);
                println!("kills      {}", state.run.kills);
                println!(
                    "character  {} lv{} exp {} gold {}",
                    character.name, character.level, character.exp, character.gold
                );
                println!(
                    "vitals     hp {}/{} mp {}/{}",
                    character.hp, character.derived.max_hp, character.mp, character.derived.max_mp
                );
                for (slot, item) in character.equipment.iter() {
                    println!("equipped   {slot}: {} +{}", item.name, item.plus);
                }
                println!("inventory  {} item(s)", character.inventory.len());
                if let Some(session) = &state.session {
                    println!(
                        "combat     #{} round {} {:?} vs {} ({}/{})",
                        session.id,
                        session.round,
                        session.phase,
                        session.enemy.name,
                        session.enemy.hp,
                        session.enemy.max_hp
                    );
                }
                println!("ascensions {}", state.meta.ascensions);
            }
        }
        Ok(())
    }
}
