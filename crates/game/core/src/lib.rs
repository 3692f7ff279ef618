//! Deterministic rules for the dungeon crawler.
//!
//! `crawl-core` owns the character model, the modifier registry and stat
//! aggregator, and the combat session state machine. It performs no I/O:
//! catalogs, randomness and loot tables arrive through [`env::Env`], and every
//! rules function takes the [`GameState`] explicitly. Encounters are driven
//! through [`combat::CombatEngine`].
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod ids;
pub mod loadout;
pub mod progression;
pub mod state;
pub mod stats;

#[cfg(test)]
mod testing;

pub use combat::{
    ActionError, CombatEngine, CombatEvent, CombatPhase, CombatSession, Continuation,
    EncounterKind, Outcome, PlayerAction, Side,
};
pub use config::GameConfig;
pub use env::{
    EnemyOracle, Env, ItemOracle, LootOracle, ModifierOracle, OracleError, PcgRng, RngOracle,
    SkillOracle,
};
pub use error::{ErrorSeverity, GameError};
pub use ids::{
    EnemyId, EvolutionId, ItemId, MetaUpgradeId, PassiveId, RelicId, RunModifierId, SetId,
    SkillId, StatusId,
};
pub use state::{BaseAttributes, Character, GameMode, GameState, MetaProgress, RunState};
pub use stats::{DerivedStats, Modifier, StatChannel, StatFlags};
