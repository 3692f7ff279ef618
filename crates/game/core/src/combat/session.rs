use crate::config::GameConfig;
use crate::ids::{EnemyId, SkillId};
use crate::state::Enemy;

use super::events::{CombatEvent, CombatLogEntry};

/// How the encounter was entered.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncounterKind {
    /// A regular encounter picked by the exploration layer.
    Explore(EnemyId),
    /// The boss guarding the current floor. Winning advances the floor.
    Boss,
    /// A boss-rush fight against the boss of the given floor.
    BossRush(u32),
}

/// Session state machine.
///
/// ```text
/// PlayerTurn -> Resolving -> Victory | RunComplete | Defeat | Fled | EnemyTurn
/// EnemyTurn  -> Resolving -> Victory | Defeat | PlayerTurn
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatPhase {
    #[default]
    PlayerTurn,
    Resolving,
    EnemyTurn,
    Victory,
    RunComplete,
    Defeat,
    Fled,
}

impl CombatPhase {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            CombatPhase::Victory | CombatPhase::RunComplete | CombatPhase::Defeat | CombatPhase::Fled
        )
    }
}

/// What the player can do on their turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerAction {
    Attack,
    Skill(SkillId),
    /// Use the consumable at this inventory index.
    Item(usize),
    Flee,
}

/// Work the controller must schedule after a resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Continuation {
    EnemyTurn { session_id: u64 },
}

impl Continuation {
    pub fn session_id(&self) -> u64 {
        match self {
            Continuation::EnemyTurn { session_id } => *session_id,
        }
    }
}

/// One encounter: player vs a single enemy.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatSession {
    pub id: u64,
    pub kind: EncounterKind,
    pub enemy: Enemy,
    pub phase: CombatPhase,
    /// Completed rounds.
    #[cfg_attr(feature = "serde", serde(default))]
    pub round: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub history: Vec<CombatLogEntry>,
}

impl CombatSession {
    pub fn new(id: u64, kind: EncounterKind, enemy: Enemy) -> Self {
        Self {
            id,
            kind,
            enemy,
            phase: CombatPhase::PlayerTurn,
            round: 0,
            history: Vec::new(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Appends events to the history, keeping the newest entries.
    pub fn record<'e>(&mut self, events: impl IntoIterator<Item = &'e CombatEvent>) {
        let round = self.round;
        self.history
            .extend(events.into_iter().map(|event| CombatLogEntry {
                round,
                text: event.describe(),
            }));
        let overflow = self.history.len().saturating_sub(GameConfig::MAX_HISTORY);
        if overflow > 0 {
            self.history.drain(..overflow);
        }
    }
}
