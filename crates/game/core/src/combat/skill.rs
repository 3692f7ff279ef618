//! Skill Resolver.
//!
//! Dispatches on [`SkillArchetype`]. Damage formulas are integer percent
//! arithmetic; every step floors.

use crate::env::{DamageType, SkillArchetype, SkillDefinition, SkillKind};
use crate::ids::StatusId;
use crate::state::{Character, Enemy};
use crate::stats::SpecialKey;

use super::attack::resolve_hit;
use super::combatant::Combatant;
use super::context::Resolution;
use super::events::{CombatEvent, Side};

/// Totals produced by one skill.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkillOutcome {
    pub damage_dealt: i32,
    pub healing_done: i32,
    pub statuses_applied: Vec<StatusId>,
}

/// `floor((ATK + bonus) * power)`; DEF is handled by mitigation.
pub fn physical_damage(atk: i32, bonus: i32, power: i32) -> i32 {
    scale(atk.saturating_add(bonus), power)
}

/// `floor(floor((INT * 2 + bonus) * power) * (1 + spellDamage))`.
pub fn magical_damage(int: i32, bonus: i32, power: i32, spell_damage: i32) -> i32 {
    let base = scale(int.saturating_mul(2).saturating_add(bonus), power);
    scale(base, 100 + spell_damage)
}

/// `floor(VIT * 4 * power)`.
pub fn heal_amount(vit: i32, power: i32) -> i32 {
    scale(vit.saturating_mul(4), power)
}

/// Lifesteal floors each hit separately, then sums.
pub fn lifesteal(hits: &[i32], percent: i32) -> i32 {
    if percent <= 0 {
        return 0;
    }
    hits.iter().map(|damage| scale(*damage, percent)).sum()
}

/// Resolves a player skill against the current enemy.
///
/// MP cost and requirements are checked and paid by the caller.
pub fn execute(
    skill: &SkillDefinition,
    caster: &mut Character,
    target: &mut Enemy,
    res: &mut Resolution<'_>,
) -> SkillOutcome {
    res.log(format!("{} uses {}", caster.name, skill.name));
    match skill.archetype() {
        SkillArchetype::SingleHit => strike(skill, 1, caster, target, res),
        SkillArchetype::MultiHit(hits) => strike(skill, hits, caster, target, res),
        SkillArchetype::Heal => heal(skill, caster, res),
        SkillArchetype::BuffDebuff => buff_debuff(skill, caster, target, res),
        SkillArchetype::Special => {
            res.log(format!("{} has no effect", skill.name));
            SkillOutcome::default()
        }
    }
}

fn strike(
    skill: &SkillDefinition,
    hits: u32,
    caster: &mut Character,
    target: &mut Enemy,
    res: &mut Resolution<'_>,
) -> SkillOutcome {
    let derived = caster.derived;
    let bonus = skill
        .bonus
        .saturating_add(derived.specials.get(SpecialKey::BonusDamage));
    let raw = match skill.damage_type {
        DamageType::Physical => physical_damage(derived.atk, bonus, skill.power),
        DamageType::Magical => {
            magical_damage(derived.int, bonus, skill.power, derived.spell_damage)
        }
    };
    let ignore_def = skill.ignore_def || skill.damage_type == DamageType::Magical;

    let mut dealt = Vec::new();
    for _ in 0..hits {
        if target.is_dead() || caster.is_dead() {
            break;
        }
        let Some(hit) = resolve_hit(raw, ignore_def, false, target, Side::Enemy, caster, res)
        else {
            continue;
        };
        if hit.attacker_killed {
            break;
        }
        dealt.push(hit.mitigated);
    }

    let mut outcome = SkillOutcome {
        damage_dealt: dealt.iter().sum(),
        ..SkillOutcome::default()
    };
    let steal = lifesteal(&dealt, skill.lifesteal + derived.lifesteal);
    if steal > 0 && !caster.is_dead() {
        outcome.healing_done = caster.heal(steal);
        res.emit(CombatEvent::Heal {
            target: Side::Player,
            amount: outcome.healing_done,
        });
    }
    outcome
}

fn heal(skill: &SkillDefinition, caster: &mut Character, res: &mut Resolution<'_>) -> SkillOutcome {
    let healed = caster.heal(heal_amount(caster.derived.vit, skill.power));
    res.emit(CombatEvent::Heal {
        target: Side::Player,
        amount: healed,
    });
    if skill.invulnerable_turns > 0 {
        caster.invulnerable_turns += skill.invulnerable_turns;
        res.log(format!(
            "{} is invulnerable for {} hit(s)",
            caster.name, skill.invulnerable_turns
        ));
    }
    SkillOutcome {
        healing_done: healed,
        ..SkillOutcome::default()
    }
}

fn buff_debuff(
    skill: &SkillDefinition,
    caster: &mut Character,
    target: &mut Enemy,
    res: &mut Resolution<'_>,
) -> SkillOutcome {
    let mut outcome = SkillOutcome::default();
    let Some(template) = &skill.status else {
        res.log(format!("{} has no effect", skill.name));
        return outcome;
    };

    let effect = template.instantiate();
    let (applied, side) = if skill.kind == SkillKind::Buff {
        (caster.apply_status(effect), Side::Player)
    } else {
        (target.apply_status(effect), Side::Enemy)
    };

    if applied {
        outcome.statuses_applied.push(template.id.clone());
        res.emit(CombatEvent::StatusApplied {
            target: side,
            status: template.id.clone(),
        });
    } else {
        res.log(format!("{} resists {}", target_name(side, caster, target), template.id));
    }
    outcome
}

fn target_name<'a>(side: Side, caster: &'a Character, target: &'a Enemy) -> &'a str {
    match side {
        Side::Player => &caster.name,
        Side::Enemy => &target.name,
    }
}

fn scale(value: i32, percent: i32) -> i32 {
    (i64::from(value) * i64::from(percent) / 100).clamp(0, i64::from(i32::MAX)) as i32
}
