//! The fixed-order stat pipeline.
//!
//! ```text
//! 1  reset           Accumulator::default()
//! 2  relics          relics, meta upgrades
//! 3  set bonuses     equipment, gems, unique effects, set tiers
//! 4  passives        passives, evolutions
//! 5  curses          item and relic curses
//! 6  status          active buffs and debuffs
//! 7  attributes      -> PrimaryAttributes
//! 8  resource caps   -> ResourceCaps
//! 9  combat numbers  -> CombatNumbers
//! 10 run modifiers   -> DerivedStats
//! ```
//!
//! Stages 2-6 share one signature and run from [`MODIFIER_STAGES`] in order.
//! Stages 7-10 each take the previous stage's output type, so they cannot be
//! reordered. Every recompute starts over from the reset stage; nothing is
//! patched incrementally.

use crate::config::GameConfig;
use crate::env::{Env, OracleError};
use crate::state::{Character, MetaProgress, RunState, StatusKind};

use super::accumulator::Accumulator;
use super::bonus::{Bonus, StatBounds, apply_penalty};
use super::channel::{StatChannel, StatFlags};
use super::derived::DerivedStats;
use super::modifier::{Modifier, ModifierSource};
use super::registry::{SourceTable, modifier_sources};

/// Read-only input shared by every stage.
#[derive(Clone, Copy, Debug)]
pub struct StageInput<'a> {
    pub character: &'a Character,
    pub sources: &'a SourceTable,
    pub config: &'a GameConfig,
}

/// A modifier-folding stage.
pub type Stage = fn(&StageInput<'_>, Accumulator) -> Accumulator;

pub const MODIFIER_STAGES: [(&str, Stage); 5] = [
    ("relics", relics),
    ("set_bonuses", set_bonuses),
    ("passives", passives),
    ("curses", curses),
    ("status", status_effects),
];

/// Rebuilds `character.derived` from scratch and down-clamps HP/MP.
///
/// Expired statuses are purged first. Returns the catalog lookups that failed;
/// those sources contributed nothing. Idempotent for unchanged inputs.
pub fn recompute(
    character: &mut Character,
    run: &RunState,
    meta: &MetaProgress,
    env: &Env<'_>,
) -> Vec<OracleError> {
    character.status.purge_expired();
    let (sources, skipped) = modifier_sources(character, run, meta, env);
    let derived = aggregate(&StageInput {
        character,
        sources: &sources,
        config: env.config(),
    });
    character.derived = derived;
    character.clamp_resources();
    skipped
}

/// Runs all ten stages. Pure.
pub fn aggregate(input: &StageInput<'_>) -> DerivedStats {
    let acc = MODIFIER_STAGES
        .iter()
        .fold(Accumulator::default(), |acc, (_, stage)| stage(input, acc));

    let attributes = PrimaryAttributes::resolve(input, &acc);
    let caps = ResourceCaps::resolve(input, &acc, &attributes);
    let numbers = CombatNumbers::resolve(input, &acc, &attributes);
    apply_run_modifiers(input, &acc, attributes, caps, numbers)
}

// ============================================================================
// Modifier stages (2-6)
// ============================================================================

fn relics(input: &StageInput<'_>, mut acc: Accumulator) -> Accumulator {
    for contribution in &input.sources.permanent {
        acc.apply_all(&contribution.modifiers);
    }
    acc
}

fn set_bonuses(input: &StageInput<'_>, mut acc: Accumulator) -> Accumulator {
    for (_, item) in input.character.equipment.iter() {
        let stats = item.effective_stats();
        acc.equipment.atk += stats.atk;
        acc.equipment.def += stats.def;
        acc.equipment.hp += stats.hp;
        acc.equipment.mp += stats.mp;
    }

    for contribution in &input.sources.equipment {
        for modifier in &contribution.modifiers {
            match (&contribution.source, modifier) {
                (
                    ModifierSource::Gem(_),
                    Modifier::Flat {
                        channel: StatChannel::Atk,
                        value,
                    },
                ) => acc.equipment.socket_atk += value,
                _ => acc.apply(modifier),
            }
        }
    }
    acc
}

fn passives(input: &StageInput<'_>, mut acc: Accumulator) -> Accumulator {
    for contribution in &input.sources.passives {
        acc.apply_all(&contribution.modifiers);
    }
    acc
}

fn curses(input: &StageInput<'_>, mut acc: Accumulator) -> Accumulator {
    for (_, curse) in &input.sources.curses {
        acc.curse(*curse);
    }
    acc
}

fn status_effects(input: &StageInput<'_>, mut acc: Accumulator) -> Accumulator {
    for effect in input.character.status.active() {
        let magnitude = effect.magnitude;
        match effect.kind {
            StatusKind::StatBoost(channel) => acc.push(channel, Bonus::flat(magnitude)),
            StatusKind::Multiplier(channel) => acc.push(channel, Bonus::increased(magnitude)),
            StatusKind::DamageDown => acc.push(StatChannel::Damage, Bonus::less(magnitude)),
            StatusKind::Frenzy => acc.push(StatChannel::Damage, Bonus::more(magnitude)),
            StatusKind::Shield
            | StatusKind::Poison
            | StatusKind::Regen
            | StatusKind::PlagueWard
            | StatusKind::Stun => {}
        }
    }
    acc
}

// ============================================================================
// Finalizing stages (7-10)
// ============================================================================

/// Stage 7 output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrimaryAttributes {
    pub str: i32,
    pub vit: i32,
    pub int: i32,
    pub agi: i32,
    pub luck: i32,
}

impl PrimaryAttributes {
    /// `floor((base + (level - 1) + bonus) * multiplier)`, then the all-stats
    /// curse. AGI and LUCK get no level term.
    fn resolve(input: &StageInput<'_>, acc: &Accumulator) -> Self {
        let base = input.character.base;
        let level_term = input.character.level.saturating_sub(1).min(i32::MAX as u32) as i32;

        let attribute = |channel: StatChannel, base: i32, level_term: i32| -> i32 {
            let stack = acc.attribute(channel);
            let raw = base
                .saturating_add(level_term)
                .saturating_add(stack.flat_total());
            let value = apply_penalty(stack.scale(raw), acc.curses.all_stats);
            value.clamp(StatBounds::ATTRIBUTES.min, StatBounds::ATTRIBUTES.max)
        };

        Self {
            str: attribute(StatChannel::Str, base.str, level_term),
            vit: attribute(StatChannel::Vit, base.vit, level_term),
            int: attribute(StatChannel::Int, base.int, level_term),
            agi: attribute(StatChannel::Agi, base.agi, 0),
            luck: attribute(StatChannel::Luck, base.luck, 0),
        }
    }
}

/// Stage 8 output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceCaps {
    pub max_hp: i32,
    pub max_mp: i32,
}

impl ResourceCaps {
    fn resolve(input: &StageInput<'_>, acc: &Accumulator, attributes: &PrimaryAttributes) -> Self {
        let config = input.config;

        let hp = acc.channel(StatChannel::Hp);
        let raw_hp = config.base_hp
            + attributes.vit * config.hp_per_vit
            + acc.equipment.hp
            + hp.flat_total();
        let max_hp = apply_penalty(hp.scale(raw_hp), acc.curses.max_hp).clamp(
            StatBounds::RESOURCE_MAXIMUMS.min,
            StatBounds::RESOURCE_MAXIMUMS.max,
        );

        let mp = acc.channel(StatChannel::Mp);
        let max_mp = mp.apply(
            config.base_mp + attributes.int * config.mp_per_int + acc.equipment.mp,
            0,
            StatBounds::RESOURCE_MAXIMUMS.max,
        );

        Self { max_hp, max_mp }
    }
}

/// Stage 9 output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CombatNumbers {
    pub atk: i32,
    pub def: i32,
    pub dodge: i32,
    pub crit: i32,
    pub spell_damage: i32,
    pub lifesteal: i32,
    pub gold_multiplier: i32,
    pub exp_multiplier: i32,
    pub healing_multiplier: i32,
}

impl CombatNumbers {
    fn resolve(input: &StageInput<'_>, acc: &Accumulator, attributes: &PrimaryAttributes) -> Self {
        let config = input.config;
        let combat = StatBounds::COMBAT;

        // floor(STR * strMultiplier * ATK_PER_STR)
        let str_multiplier = acc.attribute(StatChannel::Str).multiplier_percent();
        let from_str = i64::from(attributes.str)
            * i64::from(str_multiplier)
            * i64::from(config.atk_per_str)
            / 10_000;
        let atk_stack = acc.channel(StatChannel::Atk);
        let raw_atk = saturate(from_str)
            .saturating_add(acc.equipment.atk)
            .saturating_add(acc.equipment.socket_atk)
            .saturating_add(atk_stack.flat_total());
        let atk = apply_penalty(atk_stack.scale(raw_atk), acc.curses.atk);
        let damage = acc.channel(StatChannel::Damage);
        let atk = damage.scale(atk).clamp(combat.min, combat.max);

        let def_stack = acc.channel(StatChannel::Def);
        let raw_def = def_stack.flat_total().saturating_add(acc.equipment.def);
        let def = apply_penalty(def_stack.scale(raw_def), acc.curses.def).clamp(combat.min, combat.max);

        let dodge = (acc.percent_bonus(StatChannel::Dodge)
            + attributes.agi * config.dodge_per_agi / 100)
            .clamp(0, config.max_dodge);
        let crit = (acc.percent_bonus(StatChannel::Crit)
            + attributes.luck * config.crit_per_luck / 100)
            .clamp(StatBounds::PERCENT.min, StatBounds::PERCENT.max);

        let multiplier = |channel: StatChannel| (100 + acc.percent_bonus(channel)).max(0);

        Self {
            atk,
            def,
            dodge,
            crit,
            spell_damage: acc.percent_bonus(StatChannel::SpellDamage),
            lifesteal: acc.percent_bonus(StatChannel::Lifesteal).max(0),
            gold_multiplier: multiplier(StatChannel::Gold),
            exp_multiplier: multiplier(StatChannel::Exp),
            healing_multiplier: apply_penalty(
                multiplier(StatChannel::HealingReceived),
                acc.curses.healing_received,
            ),
        }
    }
}

/// Stage 10: run modifiers scale the fully resolved numbers, then NO_EXP
/// overrides the EXP multiplier.
fn apply_run_modifiers(
    input: &StageInput<'_>,
    acc: &Accumulator,
    attributes: PrimaryAttributes,
    caps: ResourceCaps,
    numbers: CombatNumbers,
) -> DerivedStats {
    let mut max_hp = caps.max_hp;
    let mut atk = numbers.atk;
    let mut def = numbers.def;
    let mut flags = acc.flags;

    for modifier in &input.sources.run_modifiers {
        max_hp = scale_percent(max_hp, modifier.max_hp).max(StatBounds::RESOURCE_MAXIMUMS.min);
        atk = scale_percent(atk, modifier.atk).max(0);
        def = scale_percent(def, modifier.def).max(0);
        flags |= modifier.flags;
    }

    let exp_multiplier = if flags.contains(StatFlags::NO_EXP) {
        0
    } else {
        numbers.exp_multiplier
    };

    DerivedStats {
        str: attributes.str,
        vit: attributes.vit,
        int: attributes.int,
        agi: attributes.agi,
        luck: attributes.luck,
        max_hp,
        max_mp: caps.max_mp,
        atk,
        def,
        dodge: numbers.dodge,
        crit: numbers.crit,
        spell_damage: numbers.spell_damage,
        lifesteal: numbers.lifesteal,
        gold_multiplier: numbers.gold_multiplier,
        exp_multiplier,
        healing_multiplier: numbers.healing_multiplier,
        flags,
        specials: acc.specials,
    }
}

fn scale_percent(value: i32, percent: i32) -> i32 {
    saturate(i64::from(value) * i64::from(percent) / 100)
}

fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
