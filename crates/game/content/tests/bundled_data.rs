use crawl_content::{ContentCatalog, ContentFactory, WeightedLootTable};
use crawl_core::env::EnemyRank;
use crawl_core::state::{EquipSlot, Item};
use crawl_core::stats::SpecialKey;
use crawl_core::{
    BaseAttributes, CombatEngine, CombatPhase, Character, EncounterKind, EnemyId, Env, GameConfig,
    GameState, ItemId, MetaProgress, PcgRng, PlayerAction, RunModifierId, loadout,
};

fn factory() -> ContentFactory {
    ContentFactory::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
}

fn load() -> (GameConfig, ContentCatalog, WeightedLootTable) {
    let factory = factory();
    (
        factory.load_config().expect("config.toml"),
        factory.load_catalog().expect("catalog"),
        factory.load_loot().expect("loot.ron"),
    )
}

fn hero() -> Character {
    let mut character = Character::new("Hero", BaseAttributes::new(5, 5, 5, 2, 2));
    character.skills.push("power_strike".into());
    character
}

#[test]
fn bundled_data_loads_and_cross_checks() {
    let (config, catalog, loot) = load();

    assert_eq!(config, GameConfig::default());
    assert_eq!(catalog.validate(), Vec::new());
    assert_eq!(catalog.boss_floors().count(), 5);
    assert_eq!(loot.drop_chance(EnemyRank::Boss, 1), 100);
    assert_eq!(loot.drop_chance(EnemyRank::Normal, 1), 32);
}

#[test]
fn shadow_set_tiers_replace_each_other() {
    let (config, catalog, _) = load();
    let env = catalog.env(&config);
    let (mut state, skipped) = GameState::new_run(hero(), MetaProgress::default(), 7, Vec::new(), &env);
    assert!(skipped.is_empty());

    let pieces = [
        ("shadow_blade", EquipSlot::Weapon),
        ("shadow_cloak", EquipSlot::Armor),
        ("shadow_charm", EquipSlot::Accessory),
    ];
    let mut set_dodge = Vec::new();
    for (id, slot) in pieces {
        let template = env.item(&ItemId::from(id)).expect("set piece");
        state
            .character
            .inventory
            .push(Item::from_template(&template), config.inventory_capacity)
            .expect("inventory space");
        let skipped = loadout::equip(&mut state, &env, 0, slot).expect("equip");
        assert!(skipped.is_empty());
        set_dodge.push(state.character.derived.specials.get(SpecialKey::SetDodge));
    }

    assert_eq!(set_dodge, vec![0, 10, 20]);
}

#[test]
fn glass_cannon_halves_max_hp() {
    let (config, catalog, _) = load();
    let env = catalog.env(&config);

    let (plain, _) = GameState::new_run(hero(), MetaProgress::default(), 1, Vec::new(), &env);
    let (glass, skipped) = GameState::new_run(
        hero(),
        MetaProgress::default(),
        1,
        vec![RunModifierId::from("glass_cannon")],
        &env,
    );

    assert!(skipped.is_empty());
    assert_eq!(glass.character.derived.max_hp, plain.character.derived.max_hp / 2);
    assert!(glass.character.derived.atk > plain.character.derived.atk);
}

#[test]
fn slime_encounter_plays_to_victory() {
    let (config, catalog, loot) = load();
    let rng = PcgRng;
    let env: Env<'_> = catalog.env(&config).with_loot(&loot).with_rng(&rng);
    let (mut state, _) = GameState::new_run(hero(), MetaProgress::default(), 42, Vec::new(), &env);

    let mut engine = CombatEngine::new(&mut state);
    engine
        .start_session(&env, EncounterKind::Explore(EnemyId::from("slime")))
        .expect("start");

    let mut ended = None;
    for _ in 0..50 {
        let outcome = engine.submit(&env, PlayerAction::Attack).expect("attack");
        if let Some(phase) = outcome.ended_phase() {
            ended = Some(phase);
            break;
        }
        let next = outcome.next.expect("enemy turn scheduled");
        let outcome = engine
            .enemy_turn(&env, next.session_id())
            .expect("enemy turn");
        if let Some(phase) = outcome.ended_phase() {
            ended = Some(phase);
            break;
        }
    }

    assert_eq!(ended, Some(CombatPhase::Victory));
    assert!(state.session.is_none());
    assert_eq!(state.run.kills, 1);
    assert_eq!(state.character.exp, 20);
    assert_eq!(state.character.gold, 10);
}
