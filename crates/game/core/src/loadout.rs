//! Equipment and inventory operations.
//!
//! Gear changes are rejected while an encounter is running. Using a
//! consumable during an encounter is a player action and costs the turn.

use crate::combat::{ActionError, CombatEngine, CombatEvent, Outcome, PlayerAction, Side};
use crate::env::{ConsumableEffect, Env, ItemKind, OracleError};
use crate::state::{Character, EquipSlot, GameMode, GameState};

use crate::combat::Combatant;

/// Moves the item at `index` from the inventory into `slot`.
///
/// A previous occupant goes back to the same inventory position.
pub fn equip(
    state: &mut GameState,
    env: &Env<'_>,
    index: usize,
    slot: EquipSlot,
) -> Result<Vec<OracleError>, ActionError> {
    ensure_idle(state)?;
    let item = state
        .character
        .inventory
        .get(index)
        .ok_or(ActionError::InventoryIndex(index))?;
    if item.slot() != Some(slot) {
        return Err(ActionError::SlotMismatch {
            item: item.id.clone(),
            slot,
        });
    }

    let character = &mut state.character;
    let item = character
        .inventory
        .remove(index)
        .ok_or(ActionError::InventoryIndex(index))?;
    if let Some(previous) = character.equipment.put(slot, item) {
        character.inventory.insert(index, previous);
    }
    Ok(state.recompute(env))
}

/// Moves the item in `slot` to the end of the inventory.
pub fn unequip(
    state: &mut GameState,
    env: &Env<'_>,
    slot: EquipSlot,
) -> Result<Vec<OracleError>, ActionError> {
    ensure_idle(state)?;
    let capacity = env.config().inventory_capacity;
    let character = &mut state.character;
    if character.equipment.get(slot).is_none() {
        return Err(ActionError::SlotEmpty(slot));
    }
    if character.inventory.is_full(capacity) {
        return Err(ActionError::InventoryFull);
    }

    let item = character
        .equipment
        .take(slot)
        .ok_or(ActionError::SlotEmpty(slot))?;
    if let Err(item) = character.inventory.push(item, capacity) {
        character.equipment.put(slot, item);
        return Err(ActionError::InventoryFull);
    }
    Ok(state.recompute(env))
}

/// Gold cost of raising an item from `plus` to `plus + 1`.
pub fn enhance_cost(env: &Env<'_>, plus: u8) -> u32 {
    env.config()
        .enhance_cost
        .saturating_mul(u32::from(plus) + 1)
}

/// Raises the enhancement level of the item in `slot`, paying gold.
pub fn enhance(
    state: &mut GameState,
    env: &Env<'_>,
    slot: EquipSlot,
) -> Result<Vec<OracleError>, ActionError> {
    ensure_idle(state)?;
    let character = &mut state.character;
    let plus = character
        .equipment
        .get(slot)
        .map(|item| item.plus)
        .ok_or(ActionError::SlotEmpty(slot))?;
    let cost = enhance_cost(env, plus);
    if character.gold < cost {
        return Err(ActionError::InsufficientGold {
            required: cost,
            available: character.gold,
        });
    }

    character.gold -= cost;
    if let Some(item) = character.equipment.get_mut(slot) {
        item.plus = item.plus.saturating_add(1);
    }
    Ok(state.recompute(env))
}

/// Sockets the gem at inventory `gem_index` into the item in `slot`.
pub fn socket(
    state: &mut GameState,
    env: &Env<'_>,
    slot: EquipSlot,
    gem_index: usize,
) -> Result<Vec<OracleError>, ActionError> {
    ensure_idle(state)?;
    let character = &mut state.character;
    let gem_item = character
        .inventory
        .get(gem_index)
        .ok_or(ActionError::InventoryIndex(gem_index))?;
    let ItemKind::Gem(gem) = gem_item.kind else {
        return Err(ActionError::NotUsable(gem_item.id.clone()));
    };
    let target = character
        .equipment
        .get(slot)
        .ok_or(ActionError::SlotEmpty(slot))?;
    if target.free_sockets() == 0 {
        return Err(ActionError::NotUsable(gem_item.id.clone()));
    }

    character.inventory.remove(gem_index);
    if let Some(item) = character.equipment.get_mut(slot) {
        item.socket(gem).map_err(|_| ActionError::SlotEmpty(slot))?;
    }
    Ok(state.recompute(env))
}

/// Uses the consumable at `index`.
///
/// Inside an encounter this is the player's action for the turn; outside it
/// takes effect immediately. A lost run cannot be healed back.
pub fn use_item(state: &mut GameState, env: &Env<'_>, index: usize) -> Result<Outcome, ActionError> {
    if state.session.is_some() {
        return CombatEngine::new(state).submit(env, PlayerAction::Item(index));
    }
    if state.mode == GameMode::GameOver || state.character.is_dead() {
        return Err(ActionError::RunOver);
    }

    let effect = consumable_at(&state.character, index)?;
    state.character.inventory.remove(index);
    let events = apply_consumable(&mut state.character, &effect);
    let warnings = state.recompute(env);
    Ok(Outcome {
        events,
        warnings,
        ..Outcome::default()
    })
}

/// The effect of the consumable at `index`, validated but not consumed.
pub fn consumable_at(character: &Character, index: usize) -> Result<ConsumableEffect, ActionError> {
    let item = character
        .inventory
        .get(index)
        .ok_or(ActionError::InventoryIndex(index))?;
    match &item.kind {
        ItemKind::Consumable(effect) => Ok(effect.clone()),
        _ => Err(ActionError::NotUsable(item.id.clone())),
    }
}

/// Applies a consumable's effect to the character.
pub fn apply_consumable(character: &mut Character, effect: &ConsumableEffect) -> Vec<CombatEvent> {
    let mut events = Vec::new();
    match effect {
        ConsumableEffect::Potion { hp, mp } => {
            if *hp > 0 {
                let healed = character.heal(*hp);
                events.push(CombatEvent::Heal {
                    target: Side::Player,
                    amount: healed,
                });
            }
            if *mp > 0 {
                let restored = character.restore_mp(*mp);
                events.push(CombatEvent::log(format!("recovered {restored} MP")));
            }
        }
        ConsumableEffect::Elixir(template) => {
            if character.apply_status(template.instantiate()) {
                events.push(CombatEvent::StatusApplied {
                    target: Side::Player,
                    status: template.id.clone(),
                });
            }
        }
        ConsumableEffect::Antidote => {
            let cured = character.status.cleanse_damage_over_time();
            events.push(CombatEvent::log(format!("cured {cured} ailment(s)")));
        }
    }
    events
}

fn ensure_idle(state: &GameState) -> Result<(), ActionError> {
    if state.session.is_some() {
        return Err(ActionError::SessionAlreadyActive);
    }
    Ok(())
}
