//! Combat session driver.
//!
//! [`CombatEngine`] is the authoritative reducer for an encounter. Every entry
//! point validates first and mutates second, so a rejected action leaves the
//! [`GameState`] untouched. The enemy half of a round is not run inline: a
//! resolved player action hands back a [`Continuation`] that the caller
//! schedules and later feeds to [`CombatEngine::enemy_turn`].

use crate::config::GameConfig;
use crate::env::{
    ConsumableEffect, Dice, EnemyRank, EnemyTemplate, Env, OracleError, RngOracle, RollKind,
    SkillDefinition,
};
use crate::loadout;
use crate::progression;
use crate::state::{Enemy, EnemyTraits, GameMode, GameState, Item, StatusTick};
use crate::stats::{Accumulator, SpecialKey, StatFlags};

use super::attack::player_attack;
use super::combatant::Combatant;
use super::context::Resolution;
use super::enemy_ai::{self, EnemyAction};
use super::error::ActionError;
use super::events::{CombatEvent, Side};
use super::session::{CombatPhase, CombatSession, Continuation, EncounterKind, PlayerAction};
use super::skill;

/// Everything a single engine call produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub events: Vec<CombatEvent>,
    /// Deferred work to schedule, if the encounter continues.
    pub next: Option<Continuation>,
    /// The session, when this call ended it.
    pub ended: Option<CombatSession>,
    /// Catalog lookups that failed and were skipped.
    pub warnings: Vec<OracleError>,
}

impl Outcome {
    /// Terminal phase of the ended session, if any.
    pub fn ended_phase(&self) -> Option<CombatPhase> {
        self.ended.as_ref().map(|session| session.phase)
    }
}

/// Player action checked against the current state and ready to resolve.
enum Plan {
    Attack,
    Skill(SkillDefinition),
    Item(usize, ConsumableEffect),
    Flee,
}

/// Probability in percent that a flee attempt succeeds.
///
/// `flee_base + flee_per_level * level - flee_per_floor * floor - rank penalty`,
/// clamped to `0..=100`.
pub fn flee_chance(config: &GameConfig, level: u32, floor: u32, rank: EnemyRank) -> u32 {
    let penalty = match rank {
        EnemyRank::Normal => 0,
        EnemyRank::Elite => config.flee_elite_penalty,
        EnemyRank::Boss => config.flee_boss_penalty,
    };
    let chance = i64::from(config.flee_base) + i64::from(config.flee_per_level) * i64::from(level)
        - i64::from(config.flee_per_floor) * i64::from(floor)
        - i64::from(penalty);
    chance.clamp(0, 100) as u32
}

/// Flags and keyed values an enemy gets from its passives.
pub fn enemy_traits(template: &EnemyTemplate, env: &Env<'_>) -> (EnemyTraits, Vec<OracleError>) {
    let mut acc = Accumulator::default();
    let mut skipped = Vec::new();
    for id in &template.passives {
        match env.passive(id) {
            Ok(passive) => acc.apply_all(&passive.stats),
            Err(err) => skipped.push(err),
        }
    }
    let traits = EnemyTraits {
        flags: acc.flags,
        specials: acc.specials,
    };
    (traits, skipped)
}

pub struct CombatEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> CombatEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Opens an encounter against the enemy selected by `kind`.
    pub fn start_session(&mut self, env: &Env<'_>, kind: EncounterKind) -> Result<Outcome, ActionError> {
        if self.state.session.is_some() {
            return Err(ActionError::SessionAlreadyActive);
        }
        if self.state.character.is_dead()
            || matches!(self.state.mode, GameMode::GameOver | GameMode::RunComplete)
        {
            return Err(ActionError::SessionOver);
        }

        let template = match &kind {
            EncounterKind::Explore(id) => env.enemy(id)?,
            EncounterKind::Boss => env.boss_for_floor(self.state.run.floor)?,
            EncounterKind::BossRush(floor) => env.boss_for_floor(*floor)?,
        };
        let (traits, warnings) = enemy_traits(&template, env);
        let enemy = Enemy::spawn(&template, traits);

        let id = self.state.run.allocate_session_id();
        let events = vec![CombatEvent::log(format!("{} appears", enemy.name))];
        let mut session = CombatSession::new(id, kind, enemy);
        session.record(&events);
        self.state.session = Some(session);
        self.state.mode = GameMode::Combat;

        Ok(Outcome {
            events,
            warnings,
            ..Outcome::default()
        })
    }

    /// Resolves the player's half of the round.
    pub fn submit(&mut self, env: &Env<'_>, action: PlayerAction) -> Result<Outcome, ActionError> {
        let plan = self.validate(env, action)?;
        let rng = env.rng()?;
        let Some(mut session) = self.state.session.take() else {
            return Err(ActionError::NoActiveSession);
        };

        let mut outcome = Outcome::default();
        session.phase = CombatPhase::Resolving;
        let fled = self.resolve_player(env, rng, &mut session, plan, &mut outcome.events);
        outcome.warnings.extend(self.state.recompute(env));

        if fled {
            outcome.events.push(CombatEvent::Fled);
            self.conclude(session, CombatPhase::Fled, GameMode::Explore, &mut outcome);
            return Ok(outcome);
        }
        let Some(mut session) = self.settle(env, rng, session, &mut outcome) else {
            return Ok(outcome);
        };

        session.phase = CombatPhase::EnemyTurn;
        session.record(&outcome.events);
        outcome.next = Some(Continuation::EnemyTurn {
            session_id: session.id,
        });
        self.state.session = Some(session);
        Ok(outcome)
    }

    /// Runs the enemy's half of the round plus the end-of-round status tick.
    ///
    /// A continuation for a session that has ended, or that is not waiting on
    /// the enemy, is stale and does nothing.
    pub fn enemy_turn(&mut self, env: &Env<'_>, session_id: u64) -> Result<Outcome, ActionError> {
        let live = self.state.session.as_ref().is_some_and(|session| {
            session.id == session_id
                && session.phase == CombatPhase::EnemyTurn
                && !session.enemy.is_dead()
        });
        if !live || self.state.character.is_dead() {
            return Ok(Outcome::default());
        }
        let rng = env.rng()?;
        let Some(mut session) = self.state.session.take() else {
            return Ok(Outcome::default());
        };

        let mut outcome = Outcome::default();
        session.phase = CombatPhase::Resolving;
        {
            let state = &mut *self.state;
            let dice = Dice::new(rng, state.run.seed, &mut state.run.nonce, session.round);
            let mut res = Resolution::new(env.config(), dice);
            if session.enemy.status.consume_stun() {
                res.log(format!("{} is stunned", session.enemy.name));
            } else if let EnemyAction::LookupFailed(err) =
                enemy_ai::take_turn(&mut session.enemy, &mut state.character, env, &mut res)
            {
                outcome.warnings.push(err);
            }
            outcome.events.append(&mut res.events);
        }
        outcome.warnings.extend(self.state.recompute(env));
        let Some(mut session) = self.settle(env, rng, session, &mut outcome) else {
            return Ok(outcome);
        };

        let enemy_tick = session.enemy.status.tick();
        apply_tick(&mut session.enemy, Side::Enemy, enemy_tick, &mut outcome.events);
        let player_tick = self.state.character.status.tick();
        apply_tick(
            &mut self.state.character,
            Side::Player,
            player_tick,
            &mut outcome.events,
        );
        outcome.warnings.extend(self.state.recompute(env));
        let Some(mut session) = self.settle(env, rng, session, &mut outcome) else {
            return Ok(outcome);
        };

        session.record(&outcome.events);
        session.round += 1;
        session.phase = CombatPhase::PlayerTurn;
        self.state.session = Some(session);
        Ok(outcome)
    }

    fn validate(&self, env: &Env<'_>, action: PlayerAction) -> Result<Plan, ActionError> {
        let session = self
            .state
            .session
            .as_ref()
            .ok_or(ActionError::NoActiveSession)?;
        if session.is_finished() {
            return Err(ActionError::SessionOver);
        }
        if session.phase != CombatPhase::PlayerTurn {
            return Err(ActionError::NotPlayerTurn);
        }
        let character = &self.state.character;
        if character.is_dead() || session.enemy.is_dead() {
            return Err(ActionError::SessionOver);
        }

        match action {
            PlayerAction::Attack => Ok(Plan::Attack),
            PlayerAction::Flee => Ok(Plan::Flee),
            PlayerAction::Item(index) => {
                let effect = loadout::consumable_at(character, index)?;
                Ok(Plan::Item(index, effect))
            }
            PlayerAction::Skill(id) => {
                if !character.knows_skill(&id) {
                    return Err(ActionError::SkillNotKnown(id));
                }
                let skill = env.skill(&id)?;
                let level = skill.required_level();
                if character.level < level {
                    return Err(ActionError::RequirementNotMet { level });
                }
                if character.mp < skill.cost {
                    return Err(ActionError::InsufficientMp {
                        required: skill.cost,
                        available: character.mp,
                    });
                }
                Ok(Plan::Skill(skill))
            }
        }
    }

    /// Applies a validated plan. Returns whether the player escaped.
    fn resolve_player(
        &mut self,
        env: &Env<'_>,
        rng: &dyn RngOracle,
        session: &mut CombatSession,
        plan: Plan,
        events: &mut Vec<CombatEvent>,
    ) -> bool {
        let state = &mut *self.state;
        let floor = state.run.floor;
        let dice = Dice::new(rng, state.run.seed, &mut state.run.nonce, session.round);
        let mut res = Resolution::new(env.config(), dice);
        let character = &mut state.character;
        let enemy = &mut session.enemy;

        let mut fled = false;
        if character.status.consume_stun() {
            res.log(format!("{} is stunned", character.name));
        } else {
            match plan {
                Plan::Attack => {
                    res.log(format!("{} attacks", character.name));
                    player_attack(character, enemy, &mut res);
                }
                Plan::Skill(definition) => {
                    character.mp -= definition.cost;
                    skill::execute(&definition, character, enemy, &mut res);
                }
                Plan::Item(index, effect) => {
                    character.inventory.remove(index);
                    let applied = loadout::apply_consumable(character, &effect);
                    res.events.extend(applied);
                }
                Plan::Flee => {
                    let chance = flee_chance(res.config, character.level, floor, enemy.rank);
                    fled = res.dice.chance(RollKind::Flee, chance);
                    if !fled {
                        res.log("failed to escape");
                    }
                }
            }
        }
        events.append(&mut res.events);
        fled
    }

    /// Resolves a death on either side. Returns the session when the
    /// encounter goes on.
    fn settle(
        &mut self,
        env: &Env<'_>,
        rng: &dyn RngOracle,
        mut session: CombatSession,
        outcome: &mut Outcome,
    ) -> Option<CombatSession> {
        if self.state.character.is_dead() && !self.try_revive(env.config(), &mut outcome.events) {
            outcome.events.push(CombatEvent::Defeat);
            self.conclude(session, CombatPhase::Defeat, GameMode::GameOver, outcome);
            return None;
        }
        if session.enemy.is_dead() {
            let (phase, mode) = self.victory(env, rng, &mut session, outcome);
            self.conclude(session, phase, mode, outcome);
            return None;
        }
        Some(session)
    }

    /// One-shot auto-revive, unless the run forbids resurrection.
    fn try_revive(&mut self, config: &GameConfig, events: &mut Vec<CombatEvent>) -> bool {
        let state = &mut *self.state;
        let flags = state.character.derived.flags;
        if !flags.contains(StatFlags::AUTO_REVIVE)
            || flags.contains(StatFlags::NO_REVIVE)
            || state.run.revive_consumed
        {
            return false;
        }

        state.run.revive_consumed = true;
        let max_hp = state.character.derived.max_hp;
        let hp = (i64::from(max_hp) * i64::from(config.revive_hp_percent) / 100).max(1) as i32;
        state.character.hp = hp;
        events.push(CombatEvent::Revived { hp });
        true
    }

    fn victory(
        &mut self,
        env: &Env<'_>,
        rng: &dyn RngOracle,
        session: &mut CombatSession,
        outcome: &mut Outcome,
    ) -> (CombatPhase, GameMode) {
        let state = &mut *self.state;
        let enemy = &session.enemy;

        let (exp, gold) = progression::rewards(&state.character.derived, enemy);
        state.character.gold = state.character.gold.saturating_add(gold);
        outcome.events.push(CombatEvent::Victory {
            enemy: enemy.id.clone(),
            exp,
            gold,
        });
        let (levels, skipped) =
            progression::grant_exp(&mut state.character, &state.run, &state.meta, env, exp);
        outcome
            .events
            .extend(levels.into_iter().map(|level| CombatEvent::LevelUp { level }));
        outcome.warnings.extend(skipped);

        if let Some(loot) = env.loot() {
            match env.enemy(&enemy.id) {
                Ok(template) => {
                    let roll = Dice::new(rng, state.run.seed, &mut state.run.nonce, session.round)
                        .d100(RollKind::Loot);
                    if let Some(id) = loot.roll_drop(&template, state.run.floor, roll) {
                        match env.item(&id) {
                            Ok(item) => {
                                let capacity = env.config().inventory_capacity;
                                match state.character.inventory.push(Item::from_template(&item), capacity) {
                                    Ok(()) => outcome.events.push(CombatEvent::LootDropped(id)),
                                    Err(item) => outcome
                                        .events
                                        .push(CombatEvent::log(format!("no room for {}", item.name))),
                                }
                            }
                            Err(err) => outcome.warnings.push(err),
                        }
                    }
                }
                Err(err) => outcome.warnings.push(err),
            }
        }

        let kill_heal = state.character.derived.specials.get(SpecialKey::KillHeal);
        if kill_heal > 0 {
            let amount = state.character.derived.max_hp * kill_heal / 100;
            let healed = state.character.heal(amount);
            if healed > 0 {
                outcome.events.push(CombatEvent::Heal {
                    target: Side::Player,
                    amount: healed,
                });
            }
        }
        state.run.kills += 1;

        let milestone = env
            .enemies()
            .ok()
            .and_then(|enemies| enemies.boss_for_floor(enemies.milestone_floor()));
        if enemy.is_boss() && milestone.is_some_and(|boss| boss.id == enemy.id) {
            outcome.events.push(CombatEvent::RunComplete);
            return (CombatPhase::RunComplete, GameMode::RunComplete);
        }
        if session.kind == EncounterKind::Boss {
            state.run.floor += 1;
            outcome
                .events
                .push(CombatEvent::log(format!("descending to floor {}", state.run.floor)));
        }
        (CombatPhase::Victory, GameMode::Explore)
    }

    /// Closes the session and hands it back through the outcome.
    fn conclude(
        &mut self,
        mut session: CombatSession,
        phase: CombatPhase,
        mode: GameMode,
        outcome: &mut Outcome,
    ) {
        session.phase = phase;
        session.record(&outcome.events);
        self.state.session = None;
        self.state.mode = mode;
        outcome.ended = Some(session);
    }
}

fn apply_tick(target: &mut impl Combatant, side: Side, tick: StatusTick, events: &mut Vec<CombatEvent>) {
    if tick.damage > 0 {
        target.take_damage(tick.damage);
        events.push(CombatEvent::Damage {
            target: side,
            amount: tick.damage,
            critical: false,
        });
        if side == Side::Player {
            events.push(CombatEvent::Shake);
        }
    }
    if tick.healing > 0 {
        let gained = target.restore_hp(tick.healing);
        if gained > 0 {
            events.push(CombatEvent::Heal {
                target: side,
                amount: gained,
            });
        }
    }
}
