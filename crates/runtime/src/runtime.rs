//! Session controller.
//!
//! [`GameSession`] owns the authoritative [`GameState`], drives the combat
//! state machine, defers enemy turns through the [`TurnScheduler`], publishes
//! what happened on the [`EventBus`], and persists runs through a
//! [`SaveRepository`]. It is the imperative shell around the pure rules in
//! `crawl-core`.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::{debug, error, info, warn};

use crawl_core::env::compute_seed;
use crawl_core::state::EquipSlot;
use crawl_core::{
    ActionError, Character, CombatEngine, CombatEvent, Continuation, EncounterKind, GameError,
    GameMode, GameState, MetaProgress, MetaUpgradeId, OracleError, Outcome, PlayerAction,
    RunModifierId, loadout,
};

use crate::api::{Result, RuntimeError};
use crate::config::RuntimeConfig;
use crate::events::{CharacterEvent, CombatNotice, Event, EventBus, FreshRunReason, SessionEvent, Topic};
use crate::oracle::OracleBundle;
use crate::repository::{InMemorySaveRepository, SaveRepository};
use crate::scheduler::TurnScheduler;

/// What [`GameSession::load`] ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The save was applied. `repaired` is set when an in-flight snapshot had
    /// to be brought back to a consistent phase.
    Restored { repaired: bool },
    /// The save was missing or unusable and a fresh run was started instead.
    Fresh(FreshRunReason),
}

/// Top-level controller for one player's game.
pub struct GameSession {
    state: GameState,
    oracles: OracleBundle,
    scheduler: TurnScheduler,
    events: EventBus,
    repository: Arc<dyn SaveRepository>,
    turn_delay: Duration,
    save_slot: String,
    /// Character a fresh run starts from.
    template: Character,
}

impl GameSession {
    /// Create a new session builder
    pub fn builder() -> GameSessionBuilder {
        GameSessionBuilder::new()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn oracles(&self) -> &OracleBundle {
        &self.oracles
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Subscribe to one event topic
    pub fn subscribe(&self, topic: Topic) -> tokio::sync::broadcast::Receiver<Event> {
        self.events.subscribe(topic)
    }

    pub fn scheduler(&self) -> &TurnScheduler {
        &self.scheduler
    }

    // ========================================================================
    // Stats
    // ========================================================================

    /// Rebuilds derived stats from every modifier source.
    pub fn recompute(&mut self) -> Vec<OracleError> {
        let skipped = self.state.recompute(&self.oracles.env());
        report_skipped(&skipped);
        skipped
    }

    // ========================================================================
    // Combat
    // ========================================================================

    pub fn start_session(&mut self, kind: EncounterKind) -> Result<Outcome> {
        let env = self.oracles.env();
        let outcome = CombatEngine::new(&mut self.state)
            .start_session(&env, kind)
            .map_err(rejected)?;

        if let Some(session) = &self.state.session {
            info!(
                session_id = session.id,
                enemy = %session.enemy.id,
                floor = self.state.run.floor,
                "encounter started"
            );
            self.events.publish(Event::Session(SessionEvent::EncounterStarted {
                session_id: session.id,
                enemy: session.enemy.name.clone(),
            }));
        }

        self.dispatch(&outcome);
        Ok(outcome)
    }

    /// Resolves a player action. The enemy's reply is scheduled, not run.
    pub fn submit_player_action(&mut self, action: PlayerAction) -> Result<Outcome> {
        let env = self.oracles.env();
        let outcome = CombatEngine::new(&mut self.state)
            .submit(&env, action.clone())
            .map_err(rejected)?;

        debug!(?action, "player action accepted");
        self.dispatch(&outcome);
        Ok(outcome)
    }

    /// Moves the scheduler clock forward and runs whatever came due.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Outcome> {
        let due = self.scheduler.advance(elapsed);
        self.run_continuations(due)
    }

    /// Runs every pending continuation immediately, ignoring pacing.
    pub fn flush(&mut self) -> Vec<Outcome> {
        let mut outcomes = Vec::new();
        loop {
            let due = self.scheduler.drain_all();
            if due.is_empty() {
                break;
            }
            outcomes.extend(self.run_continuations(due));
        }
        outcomes
    }

    /// Sleeps until each pending continuation is due and runs it.
    pub async fn run_pending(&mut self) -> Vec<Outcome> {
        let mut outcomes = Vec::new();
        while let Some(wait) = self.scheduler.next_due() {
            if !wait.is_zero() {
                tokio::time::sleep(wait).await;
            }
            outcomes.extend(self.advance(wait));
        }
        outcomes
    }

    fn run_continuations(&mut self, due: Vec<Continuation>) -> Vec<Outcome> {
        let mut outcomes = Vec::with_capacity(due.len());
        for continuation in due {
            let result = match continuation {
                Continuation::EnemyTurn { session_id } => {
                    let env = self.oracles.env();
                    CombatEngine::new(&mut self.state).enemy_turn(&env, session_id)
                }
            };
            match result {
                Ok(outcome) => {
                    if outcome == Outcome::default() {
                        debug!(?continuation, "stale continuation ignored");
                    }
                    self.dispatch(&outcome);
                    outcomes.push(outcome);
                }
                Err(err) => {
                    warn!(?continuation, code = err.error_code(), "continuation failed: {}", err);
                }
            }
        }
        outcomes
    }

    /// Publishes an outcome and keeps the scheduler in step with it.
    fn dispatch(&mut self, outcome: &Outcome) {
        report_skipped(&outcome.warnings);

        let session_id = outcome
            .ended
            .as_ref()
            .map(|session| session.id)
            .or_else(|| self.state.session.as_ref().map(|session| session.id))
            .unwrap_or_default();

        for event in &outcome.events {
            debug!(session_id, "{}", event.describe());
            match event {
                CombatEvent::LevelUp { level } => {
                    info!(level, "level up");
                    self.events
                        .publish(Event::Character(CharacterEvent::LevelUp { level: *level }));
                }
                CombatEvent::Revived { hp } => {
                    info!(hp, "auto-revive triggered");
                    self.events
                        .publish(Event::Character(CharacterEvent::Revived { hp: *hp }));
                }
                _ => {}
            }
            self.events.publish(Event::Combat(CombatNotice {
                session_id,
                event: event.clone(),
            }));
        }

        if let Some(next) = outcome.next {
            let task = self.scheduler.schedule(next, self.turn_delay);
            debug!(?task, session_id = next.session_id(), "enemy turn scheduled");
        }

        if let Some(ended) = &outcome.ended {
            let cancelled = self.scheduler.cancel_session(ended.id);
            info!(
                session_id = ended.id,
                phase = ?ended.phase,
                rounds = ended.round,
                cancelled,
                "encounter ended"
            );
            self.events.publish(Event::Session(SessionEvent::EncounterEnded {
                session_id: ended.id,
                phase: ended.phase,
            }));

            match self.state.mode {
                GameMode::GameOver => {
                    info!(floor = self.state.run.floor, kills = self.state.run.kills, "game over");
                    self.events.publish(Event::Session(SessionEvent::GameOver));
                }
                GameMode::RunComplete => {
                    info!(kills = self.state.run.kills, "run complete");
                    self.events.publish(Event::Session(SessionEvent::RunComplete));
                }
                GameMode::Explore | GameMode::Combat => {}
            }
        }
    }

    // ========================================================================
    // Loadout
    // ========================================================================

    pub fn equip(&mut self, index: usize, slot: EquipSlot) -> Result<()> {
        let item = self.state.character.inventory.get(index).map(|item| item.id.clone());
        let env = self.oracles.env();
        let skipped = loadout::equip(&mut self.state, &env, index, slot).map_err(rejected)?;
        report_skipped(&skipped);

        if let Some(item) = item {
            debug!(%item, %slot, "equipped");
            self.events
                .publish(Event::Character(CharacterEvent::Equipped { slot, item }));
        }
        Ok(())
    }

    pub fn unequip(&mut self, slot: EquipSlot) -> Result<()> {
        let item = self.state.character.equipment.get(slot).map(|item| item.id.clone());
        let env = self.oracles.env();
        let skipped = loadout::unequip(&mut self.state, &env, slot).map_err(rejected)?;
        report_skipped(&skipped);

        if let Some(item) = item {
            debug!(%item, %slot, "unequipped");
            self.events
                .publish(Event::Character(CharacterEvent::Unequipped { slot, item }));
        }
        Ok(())
    }

    /// Enhances the item in `slot`. Returns its new enhancement level.
    pub fn enhance(&mut self, slot: EquipSlot) -> Result<u8> {
        let env = self.oracles.env();
        let skipped = loadout::enhance(&mut self.state, &env, slot).map_err(rejected)?;
        report_skipped(&skipped);

        let plus = self
            .state
            .character
            .equipment
            .get(slot)
            .map(|item| item.plus)
            .unwrap_or_default();
        debug!(%slot, plus, gold = self.state.character.gold, "enhanced");
        self.events
            .publish(Event::Character(CharacterEvent::Enhanced { slot, plus }));
        Ok(plus)
    }

    /// Sockets the gem at `gem_index` into the item in `slot`.
    pub fn socket(&mut self, slot: EquipSlot, gem_index: usize) -> Result<()> {
        let env = self.oracles.env();
        let skipped = loadout::socket(&mut self.state, &env, slot, gem_index).map_err(rejected)?;
        report_skipped(&skipped);

        debug!(%slot, "gem socketed");
        self.events
            .publish(Event::Character(CharacterEvent::Socketed { slot }));
        Ok(())
    }

    /// Uses a consumable. Inside an encounter this costs the player's turn.
    pub fn use_item(&mut self, index: usize) -> Result<Outcome> {
        let item = self.state.character.inventory.get(index).map(|item| item.id.clone());
        let env = self.oracles.env();
        let outcome = loadout::use_item(&mut self.state, &env, index).map_err(rejected)?;

        if let Some(item) = item {
            self.events
                .publish(Event::Character(CharacterEvent::ItemUsed { item }));
        }
        self.dispatch(&outcome);
        Ok(outcome)
    }

    // ========================================================================
    // Runs and meta progression
    // ========================================================================

    /// Starts a new run for `character`, keeping meta progression.
    pub fn new_run(&mut self, character: Character, modifiers: Vec<RunModifierId>) -> Vec<OracleError> {
        self.scheduler.clear();
        let seed = self.next_seed();
        let meta = std::mem::take(&mut self.state.meta);
        let (state, skipped) =
            GameState::new_run(character, meta, seed, modifiers, &self.oracles.env());
        self.state = state;
        report_skipped(&skipped);

        info!(seed, modifiers = ?self.state.run.modifiers, "run started");
        self.events
            .publish(Event::Session(SessionEvent::RunStarted { seed }));
        skipped
    }

    /// Resets run and character for `character`, counting an ascension.
    pub fn ascend(&mut self, character: Character) -> Result<Vec<OracleError>> {
        if self.state.session.is_some() {
            return Err(rejected(ActionError::SessionAlreadyActive));
        }

        self.scheduler.clear();
        let seed = self.next_seed();
        let skipped = self.state.ascend(character, seed, &self.oracles.env());
        report_skipped(&skipped);

        info!(seed, ascensions = self.state.meta.ascensions, "ascended");
        self.events
            .publish(Event::Session(SessionEvent::RunStarted { seed }));
        Ok(skipped)
    }

    /// Buys one rank of a meta upgrade. Returns the new rank, or `None` when
    /// the upgrade is already at its maximum.
    pub fn purchase_upgrade(&mut self, upgrade: &MetaUpgradeId) -> Result<Option<u32>> {
        let definition = self
            .oracles
            .env()
            .meta_upgrade(upgrade)
            .map_err(|err| rejected(err.into()))?;

        if !self.state.meta.purchase(upgrade, definition.max_rank) {
            debug!(%upgrade, max_rank = definition.max_rank, "upgrade already at max rank");
            return Ok(None);
        }

        let rank = self.state.meta.rank(upgrade);
        self.recompute();
        info!(%upgrade, rank, "meta upgrade purchased");
        self.events
            .publish(Event::Character(CharacterEvent::UpgradePurchased {
                upgrade: upgrade.clone(),
                rank,
            }));
        Ok(Some(rank))
    }

    /// Seed for the next run, derived from the current one so a seeded
    /// session stays reproducible across runs.
    fn next_seed(&self) -> u64 {
        compute_seed(
            self.state.run.seed,
            self.state.run.nonce,
            self.state.meta.ascensions,
            self.state.run.kills,
        )
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    pub fn save(&self) -> Result<()> {
        self.repository.save(&self.save_slot, &self.state)?;
        info!(slot = %self.save_slot, "game saved");
        self.events.publish(Event::Session(SessionEvent::Saved {
            slot: self.save_slot.clone(),
        }));
        Ok(())
    }

    /// Replaces the current state with the saved one.
    ///
    /// Pending continuations are dropped and the snapshot is repaired (an
    /// enemy turn in flight is handed back to the player). A missing or
    /// corrupted save starts a fresh run from the template character instead;
    /// only storage failures are returned as errors.
    pub fn load(&mut self) -> Result<LoadOutcome> {
        match self.repository.load(&self.save_slot) {
            Ok(Some(mut state)) => {
                self.scheduler.clear();
                let (repaired, skipped) = state.repair(&self.oracles.env());
                report_skipped(&skipped);
                if repaired {
                    warn!(slot = %self.save_slot, "repaired in-flight snapshot");
                }
                self.state = state;

                info!(slot = %self.save_slot, repaired, "game loaded");
                self.events.publish(Event::Session(SessionEvent::Loaded {
                    slot: self.save_slot.clone(),
                    repaired,
                }));
                Ok(LoadOutcome::Restored { repaired })
            }
            Ok(None) => {
                info!(slot = %self.save_slot, "no save found, starting a fresh run");
                Ok(self.start_fresh(FreshRunReason::NoSave))
            }
            Err(err) if err.is_corruption() => {
                error!(
                    slot = %self.save_slot,
                    code = err.error_code(),
                    "save is unusable, starting a fresh run: {}",
                    err
                );
                Ok(self.start_fresh(FreshRunReason::Corrupted(err.to_string())))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn start_fresh(&mut self, reason: FreshRunReason) -> LoadOutcome {
        self.new_run(self.template.clone(), Vec::new());
        self.events.publish(Event::Session(SessionEvent::FreshRun {
            reason: reason.clone(),
        }));
        LoadOutcome::Fresh(reason)
    }
}

fn rejected(err: ActionError) -> RuntimeError {
    warn!(
        code = err.error_code(),
        severity = err.severity().as_str(),
        "action rejected: {}",
        err
    );
    err.into()
}

fn report_skipped(skipped: &[OracleError]) {
    for err in skipped {
        warn!(code = err.error_code(), "catalog lookup failed: {}", err);
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

/// Builder for [`GameSession`] with flexible configuration.
pub struct GameSessionBuilder {
    config: RuntimeConfig,
    oracles: Option<OracleBundle>,
    repository: Option<Arc<dyn SaveRepository>>,
    state: Option<GameState>,
    character: Option<Character>,
    modifiers: Vec<RunModifierId>,
    meta: MetaProgress,
}

impl GameSessionBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            oracles: None,
            repository: None,
            state: None,
            character: None,
            modifiers: Vec::new(),
            meta: MetaProgress::default(),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required oracle bundle
    pub fn oracles(mut self, oracles: OracleBundle) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Set the save repository. Defaults to an in-memory repository.
    pub fn repository(mut self, repository: impl SaveRepository + 'static) -> Self {
        self.repository = Some(Arc::new(repository));
        self
    }

    /// Share an existing save repository.
    pub fn shared_repository(mut self, repository: Arc<dyn SaveRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Provide initial game state
    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    /// Character fresh runs start from. Starts a run when no state is given.
    pub fn character(mut self, character: Character) -> Self {
        self.character = Some(character);
        self
    }

    /// Run modifiers for the first run.
    pub fn run_modifiers(mut self, modifiers: Vec<RunModifierId>) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Meta progression carried into the first run.
    pub fn meta(mut self, meta: MetaProgress) -> Self {
        self.meta = meta;
        self
    }

    /// Build the session
    pub fn build(self) -> Result<GameSession> {
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;

        let (state, template) = match (self.state, self.character) {
            (Some(state), Some(character)) => (state, character),
            (Some(state), None) => {
                let template = Character::new(state.character.name.clone(), state.character.base);
                (state, template)
            }
            (None, Some(character)) => {
                let seed = self.config.seed.unwrap_or_else(clock_seed);
                let (state, skipped) = GameState::new_run(
                    character.clone(),
                    self.meta,
                    seed,
                    self.modifiers,
                    &oracles.env(),
                );
                report_skipped(&skipped);
                info!(seed, "run started");
                (state, character)
            }
            (None, None) => return Err(RuntimeError::MissingInitialState),
        };

        let repository = self
            .repository
            .unwrap_or_else(|| Arc::new(InMemorySaveRepository::new()));

        Ok(GameSession {
            state,
            oracles,
            scheduler: TurnScheduler::new(),
            events: EventBus::with_capacity(self.config.event_buffer_size),
            repository,
            turn_delay: self.config.turn_delay,
            save_slot: self.config.save_slot,
            template,
        })
    }
}
