//! Universal properties of the aggregator and the encounter loop.

use std::collections::HashMap;

use crawl_core::combat::flee_chance;
use crawl_core::env::{
    EnemyRank, EnemyTemplate, EvolutionDefinition, ItemKind, ItemStats, ItemTemplate,
    MetaUpgradeDefinition, PassiveDefinition, RelicDefinition, RunModifierDefinition,
    SetBonusDefinition,
};
use crawl_core::state::{EquipSlot, Item};
use crawl_core::stats::{self, Curse, CurseKind};
use crawl_core::{
    BaseAttributes, Character, CombatEngine, EncounterKind, EnemyId, EnemyOracle, Env, GameConfig,
    GameState, ItemId, ItemOracle, MetaProgress, Modifier, ModifierOracle, PcgRng, PlayerAction,
    RelicId, RunState, StatChannel, StatFlags,
};
use crawl_core::combat::CombatPhase;
use crawl_core::{EvolutionId, MetaUpgradeId, PassiveId, RunModifierId, SetId, SkillId};
use proptest::prelude::*;

#[derive(Default)]
struct Catalog {
    items: HashMap<ItemId, ItemTemplate>,
    relics: HashMap<RelicId, RelicDefinition>,
    enemies: HashMap<EnemyId, EnemyTemplate>,
}

impl Catalog {
    fn new() -> Self {
        let mut catalog = Self::default();
        for (id, kind, stats) in [
            (
                "axe",
                ItemKind::Weapon,
                ItemStats {
                    atk: 15,
                    str: 2,
                    ..ItemStats::default()
                },
            ),
            (
                "plate",
                ItemKind::Armor,
                ItemStats {
                    def: 8,
                    hp: 20,
                    ..ItemStats::default()
                },
            ),
            (
                "charm",
                ItemKind::Accessory,
                ItemStats {
                    agi: 4,
                    luck: 4,
                    ..ItemStats::default()
                },
            ),
        ] {
            catalog.items.insert(
                ItemId::from(id),
                ItemTemplate {
                    id: ItemId::from(id),
                    name: id.to_owned(),
                    kind,
                    stats,
                    sockets: 0,
                    curse: None,
                    unique_effect: Vec::new(),
                    set_bonus: None,
                },
            );
        }
        catalog.relics.insert(
            RelicId::from("blood_pact"),
            RelicDefinition {
                id: RelicId::from("blood_pact"),
                name: "Blood Pact".into(),
                modifiers: vec![
                    Modifier::percent(StatChannel::Damage, 30),
                    Modifier::Flag(StatFlags::AUTO_REVIVE),
                ],
                curse: Some(Curse {
                    kind: CurseKind::MaxHp,
                    percent: 20,
                }),
            },
        );
        catalog.enemies.insert(
            EnemyId::from("goblin"),
            EnemyTemplate {
                id: EnemyId::from("goblin"),
                name: "Goblin".into(),
                rank: EnemyRank::Normal,
                hp: 40,
                atk: 9,
                def: 2,
                exp: 15,
                gold: 5,
                skills: Vec::new(),
                passives: Vec::new(),
                drops: Vec::new(),
            },
        );
        catalog
    }

    fn env<'a>(&'a self, config: &'a GameConfig, rng: &'a PcgRng) -> Env<'a> {
        Env::new(config)
            .with_items(self)
            .with_modifiers(self)
            .with_enemies(self)
            .with_rng(rng)
    }

    fn item(&self, id: &str) -> Item {
        Item::from_template(&self.items[&ItemId::from(id)])
    }
}

impl ItemOracle for Catalog {
    fn item(&self, id: &ItemId) -> Option<ItemTemplate> {
        self.items.get(id).cloned()
    }

    fn set_bonus(&self, _id: &SetId) -> Option<SetBonusDefinition> {
        None
    }
}

impl ModifierOracle for Catalog {
    fn passive(&self, _id: &PassiveId) -> Option<PassiveDefinition> {
        None
    }

    fn relic(&self, id: &RelicId) -> Option<RelicDefinition> {
        self.relics.get(id).cloned()
    }

    fn evolution(&self, _id: &EvolutionId) -> Option<EvolutionDefinition> {
        None
    }

    fn run_modifier(&self, _id: &RunModifierId) -> Option<RunModifierDefinition> {
        None
    }

    fn meta_upgrade(&self, _id: &MetaUpgradeId) -> Option<MetaUpgradeDefinition> {
        None
    }
}

impl EnemyOracle for Catalog {
    fn enemy(&self, id: &EnemyId) -> Option<EnemyTemplate> {
        self.enemies.get(id).cloned()
    }

    fn boss_for_floor(&self, _floor: u32) -> Option<EnemyTemplate> {
        None
    }

    fn milestone_floor(&self) -> u32 {
        10
    }
}

fn character(catalog: &Catalog, attrs: [i32; 5], level: u32, gear: [bool; 3], relic: bool) -> Character {
    let [str, vit, int, agi, luck] = attrs;
    let mut hero = Character::new("hero", BaseAttributes::new(str, vit, int, agi, luck));
    hero.level = level;
    for (equip, (slot, id)) in gear.into_iter().zip([
        (EquipSlot::Weapon, "axe"),
        (EquipSlot::Armor, "plate"),
        (EquipSlot::Accessory, "charm"),
    ]) {
        if equip {
            hero.equipment.put(slot, catalog.item(id));
        }
    }
    if relic {
        hero.relics.push(RelicId::from("blood_pact"));
    }
    hero
}

fn arb_attrs() -> impl Strategy<Value = [i32; 5]> {
    prop::array::uniform5(0i32..60)
}

/// Player inputs per encounter. Rejected inputs still count.
const MAX_STEPS: usize = 300;

fn arb_action() -> impl Strategy<Value = PlayerAction> {
    prop_oneof![
        Just(PlayerAction::Attack),
        Just(PlayerAction::Flee),
        Just(PlayerAction::Item(0)),
        Just(PlayerAction::Skill(SkillId::from("unknown"))),
    ]
}

proptest! {
    #[test]
    fn recompute_is_idempotent(
        attrs in arb_attrs(),
        level in 1u32..40,
        gear in prop::array::uniform3(any::<bool>()),
        relic in any::<bool>(),
    ) {
        let catalog = Catalog::new();
        let config = GameConfig::default();
        let rng = PcgRng;
        let env = catalog.env(&config, &rng);
        let (run, meta) = (RunState::new(1, Vec::new()), MetaProgress::default());

        let mut hero = character(&catalog, attrs, level, gear, relic);
        stats::recompute(&mut hero, &run, &meta, &env);
        hero.restore();
        let once = hero.clone();
        stats::recompute(&mut hero, &run, &meta, &env);
        prop_assert_eq!(hero, once);
    }

    #[test]
    fn derived_numbers_stay_in_bounds(
        attrs in arb_attrs(),
        level in 1u32..40,
        gear in prop::array::uniform3(any::<bool>()),
        relic in any::<bool>(),
        hp in -50i32..5000,
        mp in -50i32..5000,
    ) {
        let catalog = Catalog::new();
        let config = GameConfig::default();
        let rng = PcgRng;
        let env = catalog.env(&config, &rng);
        let (run, meta) = (RunState::new(1, Vec::new()), MetaProgress::default());

        let mut hero = character(&catalog, attrs, level, gear, relic);
        hero.hp = hp;
        hero.mp = mp;
        stats::recompute(&mut hero, &run, &meta, &env);

        let derived = hero.derived;
        prop_assert!(derived.max_hp >= 1);
        prop_assert!((0..=derived.max_hp).contains(&hero.hp));
        prop_assert!((0..=derived.max_mp).contains(&hero.mp));
        prop_assert!(hero.hp <= hp.max(0));
        prop_assert!((0..=config.max_dodge).contains(&derived.dodge));
        prop_assert!((0..=100).contains(&derived.crit));
    }

    #[test]
    fn flee_chance_is_a_probability(level in 0u32..10_000, floor in 0u32..10_000, rank in 0usize..3) {
        let rank = [EnemyRank::Normal, EnemyRank::Elite, EnemyRank::Boss][rank];
        let chance = flee_chance(&GameConfig::default(), level, floor, rank);
        prop_assert!(chance <= 100);
    }

    #[test]
    fn same_seed_replays_the_same_encounter(seed in any::<u64>()) {
        let catalog = Catalog::new();
        let config = GameConfig::default();
        let rng = PcgRng;
        let env = catalog.env(&config, &rng);

        let play = || {
            let hero = character(&catalog, [8, 8, 4, 6, 6], 1, [true, true, false], false);
            let (mut state, _) = GameState::new_run(hero, MetaProgress::default(), seed, Vec::new(), &env);
            CombatEngine::new(&mut state)
                .start_session(&env, EncounterKind::Explore(EnemyId::from("goblin")))
                .expect("start");
            let mut log = Vec::new();
            for _ in 0..60 {
                let outcome = CombatEngine::new(&mut state)
                    .submit(&env, PlayerAction::Attack)
                    .expect("attack");
                log.extend(outcome.events);
                let Some(next) = outcome.next else { break };
                let outcome = CombatEngine::new(&mut state)
                    .enemy_turn(&env, next.session_id())
                    .expect("enemy turn");
                log.extend(outcome.events);
                if outcome.ended.is_some() {
                    break;
                }
            }
            (state, log)
        };

        let (first_state, first_log) = play();
        let (second_state, second_log) = play();
        prop_assert_eq!(first_log, second_log);
        prop_assert_eq!(first_state, second_state);
    }

    #[test]
    fn every_encounter_reaches_a_terminal_phase(
        seed in any::<u64>(),
        attrs in arb_attrs(),
        actions in prop::collection::vec(arb_action(), MAX_STEPS),
    ) {
        let catalog = Catalog::new();
        let config = GameConfig::default();
        let rng = PcgRng;
        let env = catalog.env(&config, &rng);

        let hero = character(&catalog, attrs, 1, [false; 3], false);
        let (mut state, _) = GameState::new_run(hero, MetaProgress::default(), seed, Vec::new(), &env);
        CombatEngine::new(&mut state)
            .start_session(&env, EncounterKind::Explore(EnemyId::from("goblin")))
            .expect("start");

        let mut ended = None;
        for action in actions {
            let Ok(outcome) = CombatEngine::new(&mut state).submit(&env, action) else {
                continue;
            };
            ended = outcome.ended_phase();
            if ended.is_some() {
                break;
            }
            let Some(next) = outcome.next else { continue };
            let outcome = CombatEngine::new(&mut state)
                .enemy_turn(&env, next.session_id())
                .expect("enemy turn");
            ended = outcome.ended_phase();
            if ended.is_some() {
                break;
            }
        }

        prop_assert!(matches!(
            ended,
            Some(CombatPhase::Victory | CombatPhase::Defeat | CombatPhase::Fled)
        ));
        prop_assert!(state.session.is_none());
    }
}
