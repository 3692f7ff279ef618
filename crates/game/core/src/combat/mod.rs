//! Combat session state machine and the rules it drives.
//!
//! - [`engine`]: the session reducer (start, player action, enemy turn)
//! - [`skill`]: skill archetype dispatch and damage formulas
//! - [`mitigation`]: negation chain, DEF, reflects and shields
//! - [`enemy_ai`]: what the enemy does on its turn

pub mod attack;
pub mod combatant;
pub mod context;
pub mod enemy_ai;
pub mod engine;
pub mod error;
pub mod events;
pub mod mitigation;
pub mod session;
pub mod skill;

pub use attack::{enemy_attack, player_attack, resolve_hit};
pub use combatant::Combatant;
pub use context::Resolution;
pub use enemy_ai::EnemyAction;
pub use engine::{CombatEngine, Outcome, enemy_traits, flee_chance};
pub use error::ActionError;
pub use events::{CombatEvent, CombatLogEntry, Negation, Side};
pub use mitigation::{Mitigation, Reflect, check_negation, mitigate};
pub use session::{CombatPhase, CombatSession, Continuation, EncounterKind, PlayerAction};
pub use skill::SkillOutcome;
