//! Enemy turn behavior.
//!
//! With `enemy_skill_chance` the enemy picks a uniformly random skill from its
//! list; otherwise it attacks. Only damage-down debuffs have an effect when an
//! enemy casts them. Every other skill is announced and does nothing.

use crate::env::{Env, OracleError, RollKind, SkillKind};
use crate::state::{Character, Enemy, StatusKind};

use super::attack::enemy_attack;
use super::combatant::Combatant;
use super::context::Resolution;
use super::events::{CombatEvent, Side};

/// What the enemy ended up doing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnemyAction {
    Attacked { damage: i32 },
    Debuffed,
    /// A skill that has no enemy-side effect.
    UsedInert,
    /// The chosen skill is not in the catalog; the turn is lost.
    LookupFailed(OracleError),
}

pub fn take_turn(
    enemy: &mut Enemy,
    character: &mut Character,
    env: &Env<'_>,
    res: &mut Resolution<'_>,
) -> EnemyAction {
    let uses_skill = !enemy.skills.is_empty()
        && res
            .dice
            .chance(RollKind::EnemyAction, res.config.enemy_skill_chance);
    if !uses_skill {
        let damage = enemy_attack(enemy, character, res);
        return EnemyAction::Attacked { damage };
    }

    let index = res.dice.index(RollKind::EnemySkill, enemy.skills.len());
    let Some(id) = enemy.skills.get(index).cloned() else {
        let damage = enemy_attack(enemy, character, res);
        return EnemyAction::Attacked { damage };
    };

    let skill = match env.skill(&id) {
        Ok(skill) => skill,
        Err(err) => {
            res.log(format!("{} hesitates", enemy.name));
            return EnemyAction::LookupFailed(err);
        }
    };

    res.log(format!("{} uses {}", enemy.name, skill.name));
    match (&skill.kind, &skill.status) {
        (SkillKind::Debuff, Some(template)) if template.kind == StatusKind::DamageDown => {
            if character.apply_status(template.instantiate()) {
                res.emit(CombatEvent::StatusApplied {
                    target: Side::Player,
                    status: template.id.clone(),
                });
            }
            EnemyAction::Debuffed
        }
        _ => EnemyAction::UsedInert,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{Dice, EnemyOracle, FixedRng};
    use crate::ids::{EnemyId, SkillId};
    use crate::state::{BaseAttributes, EnemyTraits};
    use crate::testing::TestCatalog;

    fn setup(catalog: &TestCatalog, id: &str) -> (Character, Enemy) {
        let template = catalog.enemy(&EnemyId::from(id)).expect("test enemy");
        let mut hero = Character::new("hero", BaseAttributes::default());
        hero.derived.max_hp = 100;
        hero.hp = 100;
        (hero, Enemy::spawn(&template, EnemyTraits::default()))
    }

    #[test]
    fn enemy_without_skill_roll_attacks() {
        let catalog = TestCatalog::standard();
        let config = GameConfig::default();
        let env = catalog.env(&config);
        let (mut hero, mut hexer) = setup(&catalog, "hexer");

        let rng = FixedRng(99);
        let mut nonce = 0;
        let mut res = Resolution::new(&config, Dice::new(&rng, 0, &mut nonce, 0));
        let action = take_turn(&mut hexer, &mut hero, &env, &mut res);

        assert_eq!(action, EnemyAction::Attacked { damage: 10 });
        assert_eq!(hero.hp, 90);
    }

    #[test]
    fn damage_down_debuff_lands_on_player() {
        let catalog = TestCatalog::standard();
        let config = GameConfig::default();
        let env = catalog.env(&config);
        let (mut hero, mut hexer) = setup(&catalog, "hexer");

        let rng = FixedRng(0);
        let mut nonce = 0;
        let mut res = Resolution::new(&config, Dice::new(&rng, 0, &mut nonce, 0));
        let action = take_turn(&mut hexer, &mut hero, &env, &mut res);

        assert_eq!(action, EnemyAction::Debuffed);
        assert!(hero.status.has(StatusKind::DamageDown));
        assert_eq!(hero.hp, 100);
    }

    #[test]
    fn other_enemy_skills_are_inert() {
        let catalog = TestCatalog::standard();
        let config = GameConfig::default();
        let env = catalog.env(&config);
        let (mut hero, mut brute) = setup(&catalog, "brute");

        let rng = FixedRng(0);
        let mut nonce = 0;
        let mut res = Resolution::new(&config, Dice::new(&rng, 0, &mut nonce, 0));
        let action = take_turn(&mut brute, &mut hero, &env, &mut res);

        assert_eq!(action, EnemyAction::UsedInert);
        assert!(hero.status.is_empty());
        assert!(brute.status.is_empty());
    }

    #[test]
    fn unknown_skill_loses_the_turn() {
        let catalog = TestCatalog::standard();
        let config = GameConfig::default();
        let env = catalog.env(&config);
        let (mut hero, mut brute) = setup(&catalog, "brute");
        brute.skills = vec![SkillId::from("forgotten")];

        let rng = FixedRng(0);
        let mut nonce = 0;
        let mut res = Resolution::new(&config, Dice::new(&rng, 0, &mut nonce, 0));
        let action = take_turn(&mut brute, &mut hero, &env, &mut res);

        assert_eq!(
            action,
            EnemyAction::LookupFailed(OracleError::SkillNotFound(SkillId::from("forgotten")))
        );
        assert_eq!(hero.hp, 100);
    }
}
