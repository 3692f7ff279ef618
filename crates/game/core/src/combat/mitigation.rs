//! Damage Mitigation Pipeline.
//!
//! ```text
//! incoming hit
//!   -> negation chain (first present source only)
//!      invulnerability -> ethereal -> intangible -> set dodge -> unique dodge -> dodge
//!   -> DEF subtraction (min 1, frenzy lowers DEF, skipped when ignoring DEF)
//!   -> reflects: thorns, then plague ward (stop if the attacker dies)
//!   -> shields (oldest first) -> HP
//! ```

use crate::config::GameConfig;
use crate::env::{Dice, RollKind};
use crate::state::StatusKind;
use crate::stats::{SpecialKey, StatFlags};

use super::combatant::Combatant;
use super::events::Negation;

/// Runs the defensive negation chain against `target`.
///
/// Sources are mutually exclusive branches: only the first one present is
/// evaluated, and its roll alone decides the hit. An invulnerability charge
/// always negates and is consumed.
pub fn check_negation(
    target: &mut impl Combatant,
    config: &GameConfig,
    dice: &mut Dice<'_>,
) -> Option<Negation> {
    let charges = target.invulnerable_turns_mut();
    if *charges > 0 {
        *charges -= 1;
        return Some(Negation::Invulnerable);
    }

    let flags = target.flags();
    let specials = target.specials();
    let (source, chance) = if flags.contains(StatFlags::ETHEREAL) {
        (Negation::Ethereal, config.ethereal_dodge)
    } else if flags.contains(StatFlags::INTANGIBLE) {
        (Negation::Intangible, config.intangible_dodge)
    } else if specials.get(SpecialKey::SetDodge) > 0 {
        (Negation::SetDodge, percent(specials.get(SpecialKey::SetDodge)))
    } else if specials.get(SpecialKey::UniqueDodge) > 0 {
        (Negation::UniqueDodge, percent(specials.get(SpecialKey::UniqueDodge)))
    } else if target.dodge() > 0 {
        (Negation::Dodge, percent(target.dodge()))
    } else {
        return None;
    };

    dice.chance(RollKind::Dodge, chance).then_some(source)
}

/// Damage reflected back at the attacker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reflect {
    Thorns(i32),
    PlagueWard(i32),
}

/// What happened to one hit after negation was ruled out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Mitigation {
    /// Damage after DEF; the basis for reflects and lifesteal.
    pub mitigated: i32,
    pub reflects: Vec<Reflect>,
    /// A reflect killed the attacker; nothing reached the target.
    pub attacker_killed: bool,
    pub absorbed: i32,
    pub hp_damage: i32,
}

/// DEF after the frenzy penalty, never negative.
pub fn effective_def(target: &impl Combatant, config: &GameConfig) -> i32 {
    let def = target.def();
    if target.status().has(StatusKind::Frenzy) {
        (def - config.frenzy_def_penalty).max(0)
    } else {
        def.max(0)
    }
}

/// Applies `raw` damage to `target`, reflecting onto `attacker`.
pub fn mitigate(
    raw: i32,
    ignore_def: bool,
    target: &mut impl Combatant,
    attacker: &mut impl Combatant,
    config: &GameConfig,
) -> Mitigation {
    let mitigated = if ignore_def {
        raw.max(0)
    } else {
        (raw - effective_def(target, config)).max(1)
    };

    let mut result = Mitigation {
        mitigated,
        ..Mitigation::default()
    };

    let reflects: [(i32, fn(i32) -> Reflect); 2] = [
        (target.specials().get(SpecialKey::Thorns), Reflect::Thorns),
        (target.status().total(StatusKind::PlagueWard), Reflect::PlagueWard),
    ];
    for (percent, reflect) in reflects {
        if percent <= 0 {
            continue;
        }
        let amount = mitigated * percent / 100;
        attacker.take_damage(amount);
        result.reflects.push(reflect(amount));
        if attacker.is_dead() {
            result.attacker_killed = true;
            return result;
        }
    }

    let residual = target.status_mut().absorb(mitigated);
    result.absorbed = mitigated - residual;
    result.hp_damage = residual;
    target.take_damage(residual);
    result
}

fn percent(value: i32) -> u32 {
    value.clamp(0, 100) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{EnemyRank, EnemyTemplate, FixedRng};
    use crate::ids::{EnemyId, StatusId};
    use crate::state::{BaseAttributes, Character, Enemy, EnemyTraits, StatusEffect};

    fn target() -> Character {
        let mut character = Character::new("hero", BaseAttributes::default());
        character.derived.max_hp = 100;
        character.hp = 100;
        character
    }

    fn attacker(hp: i32) -> Enemy {
        let template = EnemyTemplate {
            id: EnemyId::from("brute"),
            name: "Brute".into(),
            rank: EnemyRank::Normal,
            hp,
            atk: 20,
            def: 0,
            exp: 0,
            gold: 0,
            skills: Vec::new(),
            passives: Vec::new(),
            drops: Vec::new(),
        };
        Enemy::spawn(&template, EnemyTraits::default())
    }

    fn status(kind: StatusKind, magnitude: i32) -> StatusEffect {
        StatusEffect {
            id: StatusId::from("test"),
            kind,
            remaining_turns: 3,
            magnitude,
        }
    }

    #[test]
    fn invulnerability_negates_once() {
        let config = GameConfig::default();
        let rng = FixedRng(0);
        let mut nonce = 0;
        let mut dice = Dice::new(&rng, 0, &mut nonce, 0);

        let mut hero = target();
        hero.invulnerable_turns = 1;
        assert_eq!(
            check_negation(&mut hero, &config, &mut dice),
            Some(Negation::Invulnerable)
        );
        assert_eq!(hero.invulnerable_turns, 0);
        assert_eq!(check_negation(&mut hero, &config, &mut dice), None);
    }

    #[test]
    fn only_first_dodge_source_is_rolled() {
        let config = GameConfig::default();
        // d100 = 20: fails ethereal (15) but would pass set dodge (50).
        let rng = FixedRng(19);
        let mut nonce = 0;

        let mut hero = target();
        hero.derived.flags = StatFlags::ETHEREAL;
        hero.derived.specials.add(SpecialKey::SetDodge, 50);
        {
            let mut dice = Dice::new(&rng, 0, &mut nonce, 0);
            assert_eq!(check_negation(&mut hero, &config, &mut dice), None);
        }
        assert_eq!(nonce, 1);

        hero.derived.flags = StatFlags::empty();
        let mut dice = Dice::new(&rng, 0, &mut nonce, 0);
        assert_eq!(
            check_negation(&mut hero, &config, &mut dice),
            Some(Negation::SetDodge)
        );
    }

    #[test]
    fn def_subtraction_keeps_minimum_one() {
        let config = GameConfig::default();
        let mut hero = target();
        hero.derived.def = 50;
        let mut enemy = attacker(30);

        let hit = mitigate(20, false, &mut hero, &mut enemy, &config);
        assert_eq!(hit.mitigated, 1);
        assert_eq!(hero.hp, 99);

        let pierce = mitigate(20, true, &mut hero, &mut enemy, &config);
        assert_eq!(pierce.mitigated, 20);
    }

    #[test]
    fn frenzy_lowers_def_but_not_below_zero() {
        let config = GameConfig::default();
        let mut hero = target();
        hero.derived.def = 3;
        hero.status.apply(status(StatusKind::Frenzy, 20));
        assert_eq!(effective_def(&hero, &config), 0);

        hero.derived.def = 12;
        assert_eq!(effective_def(&hero, &config), 12 - config.frenzy_def_penalty);
    }

    #[test]
    fn shield_absorbs_before_hp() {
        let config = GameConfig::default();
        let mut hero = target();
        hero.status.apply(status(StatusKind::Shield, 15));
        let mut enemy = attacker(30);

        let hit = mitigate(20, true, &mut hero, &mut enemy, &config);
        assert_eq!(hit.absorbed, 15);
        assert_eq!(hit.hp_damage, 5);
        assert_eq!(hero.hp, 95);
        assert!(!hero.status.has(StatusKind::Shield));
    }

    #[test]
    fn thorns_reflect_mitigated_damage() {
        let config = GameConfig::default();
        let mut hero = target();
        hero.derived.specials.add(SpecialKey::Thorns, 15);
        let mut enemy = attacker(30);

        let hit = mitigate(20, true, &mut hero, &mut enemy, &config);
        assert_eq!(hit.reflects, vec![Reflect::Thorns(3)]);
        assert_eq!(enemy.hp, 27);
        assert_eq!(hero.hp, 80);
    }

    #[test]
    fn lethal_reflect_stops_processing() {
        let config = GameConfig::default();
        let mut hero = target();
        hero.derived.specials.add(SpecialKey::Thorns, 15);
        hero.status.apply(status(StatusKind::PlagueWard, 50));
        let mut enemy = attacker(3);

        let hit = mitigate(20, true, &mut hero, &mut enemy, &config);
        assert!(hit.attacker_killed);
        assert_eq!(hit.reflects, vec![Reflect::Thorns(3)]);
        assert_eq!(hero.hp, 100);
    }

    #[test]
    fn plague_ward_reflects_after_thorns() {
        let config = GameConfig::default();
        let mut hero = target();
        hero.derived.specials.add(SpecialKey::Thorns, 10);
        hero.status.apply(status(StatusKind::PlagueWard, 50));
        let mut enemy = attacker(100);

        let hit = mitigate(20, true, &mut hero, &mut enemy, &config);
        assert_eq!(hit.reflects, vec![Reflect::Thorns(2), Reflect::PlagueWard(10)]);
        assert_eq!(enemy.hp, 88);
    }
}
