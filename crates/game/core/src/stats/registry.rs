//! Modifier Registry: resolves a character's sources into contributions.
//!
//! Catalog lookups happen once per recompute, here. A source whose id is
//! missing from its catalog is skipped and reported, never fatal, so a save
//! referencing content that was since removed still loads.

use std::collections::BTreeMap;

use crate::env::{Env, OracleError, RunModifierDefinition};
use crate::ids::SetId;
use crate::state::{Character, MetaProgress, RunState};

use super::modifier::{Curse, Modifier, ModifierSource};

/// One source and the modifiers it contributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contribution {
    pub source: ModifierSource,
    pub modifiers: Vec<Modifier>,
}

/// Resolved sources grouped by the pipeline stage that folds them.
///
/// Status effects are not listed; they live on the character and need no
/// lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceTable {
    /// Relics and ranked meta upgrades.
    pub permanent: Vec<Contribution>,
    /// Item attributes, socketed gems, unique effects and set tiers.
    pub equipment: Vec<Contribution>,
    /// Passives and evolutions.
    pub passives: Vec<Contribution>,
    pub curses: Vec<(ModifierSource, Curse)>,
    pub run_modifiers: Vec<RunModifierDefinition>,
}

/// Enumerates every modifier source of `character` for this run.
///
/// Returns the table plus the lookups that failed.
pub fn modifier_sources(
    character: &Character,
    run: &RunState,
    meta: &MetaProgress,
    env: &Env<'_>,
) -> (SourceTable, Vec<OracleError>) {
    let mut table = SourceTable::default();
    let mut skipped = Vec::new();

    for id in &character.relics {
        if let Some(relic) = found(env.relic(id), &mut skipped) {
            if let Some(curse) = relic.curse {
                table.curses.push((ModifierSource::RelicCurse(id.clone()), curse));
            }
            table.permanent.push(Contribution {
                source: ModifierSource::Relic(id.clone()),
                modifiers: relic.modifiers,
            });
        }
    }

    for (id, &rank) in &meta.upgrades {
        if rank == 0 {
            continue;
        }
        if let Some(upgrade) = found(env.meta_upgrade(id), &mut skipped) {
            let rank = rank.min(upgrade.max_rank);
            table.permanent.push(Contribution {
                source: ModifierSource::Meta(id.clone()),
                modifiers: upgrade.per_rank.iter().map(|m| m.scaled(rank)).collect(),
            });
        }
    }

    let mut set_pieces: BTreeMap<SetId, usize> = BTreeMap::new();
    for (_, item) in character.equipment.iter() {
        let attributes: Vec<Modifier> = item.attribute_modifiers().collect();
        if !attributes.is_empty() {
            table.equipment.push(Contribution {
                source: ModifierSource::Equipment(item.id.clone()),
                modifiers: attributes,
            });
        }
        if !item.gems.is_empty() {
            table.equipment.push(Contribution {
                source: ModifierSource::Gem(item.id.clone()),
                modifiers: item.gems.iter().map(|gem| gem.modifier()).collect(),
            });
        }
        if !item.unique_effect.is_empty() {
            table.equipment.push(Contribution {
                source: ModifierSource::UniqueEffect(item.id.clone()),
                modifiers: item.unique_effect.clone(),
            });
        }
        if let Some(curse) = item.curse {
            table.curses.push((ModifierSource::Curse(item.id.clone()), curse));
        }
        if let Some(set) = &item.set_bonus {
            *set_pieces.entry(set.clone()).or_default() += 1;
        }
    }

    for (set, pieces) in set_pieces.into_iter().filter(|(_, pieces)| *pieces >= 2) {
        if let Some(bonus) = found(env.set_bonus(&set), &mut skipped) {
            table.equipment.push(Contribution {
                modifiers: bonus.tier(pieces).to_vec(),
                source: ModifierSource::SetBonus { set, pieces },
            });
        }
    }

    for id in &character.passives {
        if let Some(passive) = found(env.passive(id), &mut skipped) {
            table.passives.push(Contribution {
                source: ModifierSource::Passive(id.clone()),
                modifiers: passive.stats,
            });
        }
    }

    for id in &character.evolutions {
        if let Some(evolution) = found(env.evolution(id), &mut skipped) {
            table.passives.push(Contribution {
                source: ModifierSource::Evolution(id.clone()),
                modifiers: evolution.stats,
            });
        }
    }

    for id in &run.modifiers {
        if let Some(modifier) = found(env.run_modifier(id), &mut skipped) {
            table.run_modifiers.push(modifier);
        }
    }

    (table, skipped)
}

fn found<T>(lookup: Result<T, OracleError>, skipped: &mut Vec<OracleError>) -> Option<T> {
    lookup.map_err(|err| skipped.push(err)).ok()
}
