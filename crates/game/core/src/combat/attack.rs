//! Landing hits and plain attacks for both sides.

use crate::env::RollKind;
use crate::state::{Character, Enemy, StatusKind};
use crate::stats::{SpecialKey, apply_penalty};

use super::combatant::Combatant;
use super::context::Resolution;
use super::events::{CombatEvent, Side};
use super::mitigation::{Mitigation, Reflect, check_negation, mitigate};

/// Runs one hit through negation and mitigation, emitting events.
///
/// Returns `None` when the hit was negated.
pub fn resolve_hit(
    raw: i32,
    ignore_def: bool,
    critical: bool,
    target: &mut impl Combatant,
    target_side: Side,
    attacker: &mut impl Combatant,
    res: &mut Resolution<'_>,
) -> Option<Mitigation> {
    if let Some(source) = check_negation(target, res.config, &mut res.dice) {
        res.emit(CombatEvent::Dodged {
            target: target_side,
            source,
        });
        return None;
    }

    let hit = mitigate(raw, ignore_def, target, attacker, res.config);
    let attacker_side = opposite(target_side);
    for reflect in &hit.reflects {
        let (name, amount) = match reflect {
            Reflect::Thorns(amount) => ("thorns", *amount),
            Reflect::PlagueWard(amount) => ("plague ward", *amount),
        };
        res.log(format!("{name} reflects {amount} damage"));
        res.emit(CombatEvent::Damage {
            target: attacker_side,
            amount,
            critical: false,
        });
        if attacker_side == Side::Player && amount > 0 {
            res.emit(CombatEvent::Shake);
        }
    }
    if hit.attacker_killed {
        return Some(hit);
    }

    if hit.absorbed > 0 {
        res.log(format!("a shield absorbs {}", hit.absorbed));
    }
    res.emit(CombatEvent::Damage {
        target: target_side,
        amount: hit.hp_damage,
        critical,
    });
    if target_side == Side::Player && hit.hp_damage > 0 {
        res.emit(CombatEvent::Shake);
    }
    Some(hit)
}

/// The player's basic attack.
///
/// ATK plus bonus damage, a crit roll, lifesteal on the mitigated damage, and
/// the execute-threshold hook. Returns the damage dealt.
pub fn player_attack(character: &mut Character, enemy: &mut Enemy, res: &mut Resolution<'_>) -> i32 {
    let derived = character.derived;
    let mut raw = derived
        .atk
        .saturating_add(derived.specials.get(SpecialKey::BonusDamage));
    let critical = res.dice.chance(RollKind::Crit, derived.crit.clamp(0, 100) as u32);
    if critical {
        raw = raw * res.config.crit_multiplier / 100;
    }

    let Some(hit) = resolve_hit(raw, false, critical, enemy, Side::Enemy, character, res) else {
        return 0;
    };
    if hit.attacker_killed {
        return 0;
    }

    let steal = hit.mitigated * derived.lifesteal / 100;
    if steal > 0 {
        let healed = character.heal(steal);
        res.emit(CombatEvent::Heal {
            target: Side::Player,
            amount: healed,
        });
    }

    let threshold = derived.specials.get(SpecialKey::ExecuteThreshold);
    if threshold > 0
        && !enemy.is_dead()
        && i64::from(enemy.hp) * 100 <= i64::from(enemy.max_hp) * i64::from(threshold)
    {
        res.log(format!("{} is executed", enemy.name));
        enemy.hp = 0;
    }
    hit.mitigated
}

/// The enemy's plain attack, weakened by damage-down debuffs.
pub fn enemy_attack(enemy: &mut Enemy, character: &mut Character, res: &mut Resolution<'_>) -> i32 {
    let mut raw = apply_penalty(enemy.atk, enemy.status.total(StatusKind::DamageDown));
    let frenzy = enemy.status.total(StatusKind::Frenzy);
    if frenzy > 0 {
        raw = raw * (100 + frenzy) / 100;
    }
    res.log(format!("{} attacks", enemy.name));
    resolve_hit(raw, false, false, character, Side::Player, enemy, res)
        .filter(|hit| !hit.attacker_killed)
        .map(|hit| hit.mitigated)
        .unwrap_or(0)
}

fn opposite(side: Side) -> Side {
    match side {
        Side::Player => Side::Enemy,
        Side::Enemy => Side::Player,
    }
}
