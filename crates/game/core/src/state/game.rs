use crate::combat::{CombatPhase, CombatSession};
use crate::env::{Env, OracleError};
use crate::ids::RunModifierId;
use crate::stats;

use super::{Character, GameMode, MetaProgress, RunState};

/// The whole simulation state, passed explicitly to every rules function.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub character: Character,
    pub run: RunState,
    #[cfg_attr(feature = "serde", serde(default))]
    pub meta: MetaProgress,
    #[cfg_attr(feature = "serde", serde(default))]
    pub session: Option<CombatSession>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mode: GameMode,
}

impl GameState {
    /// Starts a run for `character`, keeping `meta`.
    ///
    /// Stats are recomputed and HP/MP filled. Lookup failures are returned
    /// alongside the state; the affected sources contribute nothing.
    pub fn new_run(
        character: Character,
        meta: MetaProgress,
        seed: u64,
        modifiers: Vec<RunModifierId>,
        env: &Env<'_>,
    ) -> (Self, Vec<OracleError>) {
        let mut state = Self {
            character,
            run: RunState::new(seed, modifiers),
            meta,
            session: None,
            mode: GameMode::Explore,
        };
        let skipped = state.recompute(env);
        state.character.restore();
        (state, skipped)
    }

    /// Rebuilds the character's derived stats. See [`stats::recompute`].
    pub fn recompute(&mut self, env: &Env<'_>) -> Vec<OracleError> {
        stats::recompute(&mut self.character, &self.run, &self.meta, env)
    }

    /// Resets the run and character while keeping meta progression.
    pub fn ascend(&mut self, character: Character, seed: u64, env: &Env<'_>) -> Vec<OracleError> {
        let mut meta = core::mem::take(&mut self.meta);
        meta.ascensions += 1;
        let modifiers = core::mem::take(&mut self.run.modifiers);
        let (state, skipped) = Self::new_run(character, meta, seed, modifiers, env);
        *self = state;
        skipped
    }

    /// Repairs a freshly loaded snapshot.
    ///
    /// Scheduled continuations do not survive serialization, so a session
    /// saved mid enemy turn is handed back to the player. The mode is brought
    /// in line with the session and stats are re-derived. Returns whether
    /// anything had to be repaired.
    pub fn repair(&mut self, env: &Env<'_>) -> (bool, Vec<OracleError>) {
        let mut repaired = false;

        if self.session.as_ref().is_some_and(CombatSession::is_finished) {
            self.session = None;
            repaired = true;
        }

        match self.session.as_mut() {
            Some(session) => {
                if matches!(session.phase, CombatPhase::EnemyTurn | CombatPhase::Resolving) {
                    session.phase = CombatPhase::PlayerTurn;
                    repaired = true;
                }
                if self.mode != GameMode::Combat {
                    self.mode = GameMode::Combat;
                    repaired = true;
                }
            }
            None => {
                if self.mode == GameMode::Combat {
                    self.mode = GameMode::Explore;
                    repaired = true;
                }
            }
        }

        let skipped = self.recompute(env);
        (repaired, skipped)
    }
}
