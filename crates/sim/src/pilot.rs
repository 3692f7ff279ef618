//! Scripted player used by `play`.
//!
//! The pilot walks each floor's roster of regular enemies, challenges the
//! floor boss once enough encounters are cleared, and picks combat actions
//! with a fixed priority: heal when low, strike with a skill when affordable,
//! otherwise attack.

use std::collections::BTreeSet;

use crawl_content::ContentCatalog;
use crawl_core::env::{ConsumableEffect, EnemyRank, ItemKind, SkillKind};
use crawl_core::state::EquipSlot;
use crawl_core::{CombatPhase, EncounterKind, EnemyId, Env, GameState, PlayerAction, SkillId};

/// Below this share of max HP the pilot tries to heal.
const LOW_HP_PERCENT: i32 = 35;

pub struct Pilot {
    roster: Vec<EnemyId>,
    boss_floors: BTreeSet<u32>,
    per_floor: u32,
    floor: u32,
    cleared: u32,
}

impl Pilot {
    pub fn new(catalog: &ContentCatalog, per_floor: u32) -> Self {
        let mut enemies: Vec<_> = catalog
            .enemies()
            .filter(|enemy| enemy.rank != EnemyRank::Boss)
            .collect();
        enemies.sort_by(|a, b| a.exp.cmp(&b.exp).then_with(|| a.id.cmp(&b.id)));

        Self {
            roster: enemies.into_iter().map(|enemy| enemy.id.clone()).collect(),
            boss_floors: catalog.boss_floors().collect(),
            per_floor,
            floor: 0,
            cleared: 0,
        }
    }

    /// The next encounter for the current floor, or `None` with an empty roster.
    pub fn next_encounter(&mut self, state: &GameState) -> Option<EncounterKind> {
        if state.run.floor != self.floor {
            self.floor = state.run.floor;
            self.cleared = 0;
        }

        if self.cleared >= self.per_floor && self.boss_floors.contains(&self.floor) {
            return Some(EncounterKind::Boss);
        }

        let last = self.roster.len().checked_sub(1)?;
        let tier = self.floor.saturating_sub(1) as usize * 2;
        let index = (tier + self.cleared as usize).min(last);
        Some(EncounterKind::Explore(self.roster[index].clone()))
    }

    pub fn record(&mut self, phase: CombatPhase) {
        if matches!(phase, CombatPhase::Victory | CombatPhase::Fled) {
            self.cleared += 1;
        }
    }

    pub fn choose(&self, state: &GameState, env: &Env<'_>) -> PlayerAction {
        let character = &state.character;
        let max_hp = character.derived.max_hp.max(1);

        if character.hp * 100 < max_hp * LOW_HP_PERCENT {
            if let Some(index) = healing_item(state) {
                return PlayerAction::Item(index);
            }
            if let Some(skill) = usable_skill(state, env, SkillKind::Heal) {
                return PlayerAction::Skill(skill);
            }
        }

        match usable_skill(state, env, SkillKind::Strike) {
            Some(skill) => PlayerAction::Skill(skill),
            None => PlayerAction::Attack,
        }
    }

    /// First inventory item that fits an empty equipment slot.
    pub fn pick_equipment(&self, state: &GameState) -> Option<(usize, EquipSlot)> {
        let character = &state.character;
        character
            .inventory
            .iter()
            .enumerate()
            .find_map(|(index, item)| {
                let slot = item.kind.slot()?;
                character.equipment.get(slot).is_none().then_some((index, slot))
            })
    }
}

fn healing_item(state: &GameState) -> Option<usize> {
    state.character.inventory.iter().position(|item| {
        matches!(
            item.kind,
            ItemKind::Consumable(ConsumableEffect::Potion { hp, .. }) if hp > 0
        )
    })
}

/// The strongest known skill of `kind` the character can pay for right now.
fn usable_skill(state: &GameState, env: &Env<'_>, kind: SkillKind) -> Option<SkillId> {
    let character = &state.character;
    character
        .skills
        .iter()
        .filter_map(|id| env.skill(id).ok())
        .filter(|skill| skill.kind == kind && skill.cost <= character.mp)
        .filter(|skill| skill.req.as_ref().is_none_or(|req| character.level >= req.level))
        .max_by_key(|skill| skill.power * skill.hits as i32)
        .map(|skill| skill.id)
}
