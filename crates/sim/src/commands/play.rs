//! Auto-play a run with the scripted pilot.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use crawl_core::{
    ActionError, BaseAttributes, Character, CombatPhase, GameMode, PlayerAction, RunModifierId,
    SkillId,
};
use crawl_runtime::{
    FileSaveRepository, GameSession, LoadOutcome, RuntimeConfig, RuntimeError,
};
use tracing::{info, warn};

use super::{DEFAULT_DATA_DIR, load_oracles};
use crate::pilot::Pilot;

/// Rounds after which a stalled encounter is abandoned.
const MAX_ROUNDS: usize = 200;

/// Auto-play encounters until the run ends
#[derive(Parser)]
pub struct Play {
    /// Content directory holding config.toml and the RON catalogs
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Fixed run seed (overrides CRAWL_SEED)
    #[arg(long)]
    seed: Option<u64>,

    /// Regular encounters to clear before challenging a floor boss
    #[arg(long, default_value_t = 3)]
    encounters_per_floor: u32,

    /// Stop after this many encounters even if the run is still going
    #[arg(long, default_value_t = 50)]
    max_encounters: u32,

    /// Enemy turn pacing in milliseconds (overrides CRAWL_TURN_DELAY_MS)
    #[arg(long, value_name = "MS")]
    turn_delay: Option<u64>,

    /// Save directory (overrides CRAWL_SAVE_DIR)
    #[arg(long, value_name = "DIR")]
    save_dir: Option<PathBuf>,

    /// Save slot (overrides CRAWL_SAVE_SLOT)
    #[arg(long)]
    slot: Option<String>,

    /// Ignore any existing save and start a new run
    #[arg(long)]
    fresh: bool,

    /// Character name for new runs
    #[arg(long, default_value = "Wanderer")]
    name: String,

    /// Run modifier ids applied to new runs (repeatable)
    #[arg(long = "modifier", value_name = "ID")]
    modifiers: Vec<String>,
}

impl Play {
    pub async fn execute(self) -> Result<()> {
        let mut config = RuntimeConfig::from_env();
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(millis) = self.turn_delay {
            config.turn_delay = Duration::from_millis(millis);
        }
        if let Some(dir) = &self.save_dir {
            config.save_dir = dir.clone();
        }
        if let Some(slot) = &self.slot {
            config.save_slot = slot.clone();
        }

        let oracles = load_oracles(&self.data_dir)?;
        let mut pilot = Pilot::new(oracles.catalog(), self.encounters_per_floor);

        let repository = FileSaveRepository::new(&config.save_dir)
            .with_context(|| format!("opening save dir {}", config.save_dir.display()))?;
        let modifiers: Vec<RunModifierId> =
            self.modifiers.iter().map(|id| RunModifierId::from(id.as_str())).collect();

        let mut session = GameSession::builder()
            .config(config)
            .oracles(oracles)
            .character(self.hero())
            .run_modifiers(modifiers.clone())
            .repository(repository)
            .build()?;

        if !self.fresh {
            match session.load()? {
                LoadOutcome::Restored { repaired } => info!(repaired, "resuming saved run"),
                LoadOutcome::Fresh(reason) => info!(?reason, "starting a new run"),
            }
        }

        match session.state().mode {
            GameMode::RunComplete => {
                session.ascend(self.hero())?;
                info!(ascensions = session.state().meta.ascensions, "ascended");
            }
            GameMode::GameOver => {
                session.new_run(self.hero(), modifiers);
            }
            GameMode::Explore | GameMode::Combat => {}
        }

        for _ in 0..self.max_encounters {
            match session.state().mode {
                GameMode::GameOver | GameMode::RunComplete => break,
                GameMode::Combat => {}
                GameMode::Explore => {
                    let Some(kind) = pilot.next_encounter(session.state()) else {
                        bail!("content has no regular enemies to fight");
                    };
                    session.start_session(kind)?;
                }
            }

            let phase = fight(&mut session, &pilot).await?;
            pilot.record(phase);
            gear_up(&mut session, &pilot);
            session.save()?;
        }

        print_summary(&session);
        Ok(())
    }

    fn hero(&self) -> Character {
        let mut character = Character::new(self.name.clone(), BaseAttributes::new(5, 5, 4, 3, 3));
        character.skills = vec![SkillId::from("power_strike"), SkillId::from("mend")];
        character
    }
}

/// Plays the active encounter to its end.
async fn fight(session: &mut GameSession, pilot: &Pilot) -> Result<CombatPhase> {
    for _ in 0..MAX_ROUNDS {
        let action = pilot.choose(session.state(), &session.oracles().env());
        let outcome = match session.submit_player_action(action.clone()) {
            Ok(outcome) => outcome,
            Err(RuntimeError::Action(ActionError::NotPlayerTurn)) => {
                session.run_pending().await;
                continue;
            }
            Err(RuntimeError::Action(err)) if action != PlayerAction::Attack => {
                warn!(?action, "pilot fell back to attacking: {}", err);
                session.submit_player_action(PlayerAction::Attack)?
            }
            Err(err) => return Err(err.into()),
        };
        if let Some(phase) = outcome.ended_phase() {
            return Ok(phase);
        }

        for outcome in session.run_pending().await {
            if let Some(phase) = outcome.ended_phase() {
                return Ok(phase);
            }
        }
    }

    bail!("encounter did not end within {MAX_ROUNDS} rounds")
}

fn gear_up(session: &mut GameSession, pilot: &Pilot) {
    while let Some((index, slot)) = pilot.pick_equipment(session.state()) {
        if let Err(err) = session.equip(index, slot) {
            warn!(%slot, "could not equip loot: {}", err);
            break;
        }
    }
}

fn print_summary(session: &GameSession) {
    let state = session.state();
    let character = &state.character;
    println!("mode       {:?}", state.mode);
    println!("floor      {}", state.run.floor);
    println!("kills      {}", state.run.kills);
    println!(
        "character  {} lv{} hp {}/{} mp {}/{}",
        character.name,
        character.level,
        character.hp,
        character.derived.max_hp,
        character.mp,
        character.derived.max_mp
    );
    println!("gold       {}", character.gold);
    println!("ascensions {}", state.meta.ascensions);
}
