mod common;

use std::time::Duration;

use crawl_core::env::ItemTemplate;
use crawl_core::state::Item;
use crawl_core::{
    ActionError, CombatEvent, CombatPhase, EncounterKind, EnemyId, GameMode, ItemId,
    MetaUpgradeId, PlayerAction,
};
use crawl_runtime::{
    CharacterEvent, Event, GameSession, RuntimeError, SessionEvent, Topic,
};

use common::{config, drain, fight, hero, oracles, session};

fn slime() -> EncounterKind {
    EncounterKind::Explore(EnemyId::from("slime"))
}

fn potion(session: &GameSession) -> ItemTemplate {
    session
        .oracles()
        .env()
        .item(&ItemId::from("potion"))
        .expect("potion template")
}

#[test]
fn enemy_turn_waits_for_the_pacing_delay() {
    let mut session = session();
    session.start_session(slime()).expect("start");

    let outcome = session
        .submit_player_action(PlayerAction::Attack)
        .expect("attack");
    assert!(outcome.ended.is_none());
    assert_eq!(session.scheduler().len(), 1);

    // The enemy has not replied yet, so the player cannot act again.
    let err = session
        .submit_player_action(PlayerAction::Attack)
        .unwrap_err();
    assert!(matches!(err, RuntimeError::Action(ActionError::NotPlayerTurn)));

    assert!(session.advance(Duration::from_millis(499)).is_empty());
    let replies = session.advance(Duration::from_millis(1));
    assert_eq!(replies.len(), 1);

    let phase = session.state().session.as_ref().map(|s| s.phase);
    assert_eq!(phase, Some(CombatPhase::PlayerTurn));
    assert!(session.scheduler().is_empty());
}

#[test]
fn victory_is_published_on_every_topic() {
    let mut session = session();
    let mut combat = session.subscribe(Topic::Combat);
    let mut lifecycle = session.subscribe(Topic::Session);

    session.start_session(slime()).expect("start");
    assert_eq!(fight(&mut session), CombatPhase::Victory);

    assert!(session.state().session.is_none());
    assert_eq!(session.state().mode, GameMode::Explore);
    assert!(session.scheduler().is_empty());

    let combat = drain(&mut combat);
    assert!(combat.iter().any(|event| matches!(
        event,
        Event::Combat(notice) if matches!(notice.event, CombatEvent::Victory { .. })
    )));

    let lifecycle = drain(&mut lifecycle);
    assert!(matches!(
        lifecycle.first(),
        Some(Event::Session(SessionEvent::EncounterStarted { .. }))
    ));
    assert!(matches!(
        lifecycle.last(),
        Some(Event::Session(SessionEvent::EncounterEnded {
            phase: CombatPhase::Victory,
            ..
        }))
    ));
}

#[test]
fn rejected_actions_leave_state_untouched() {
    let mut session = session();
    let before = session.state().clone();

    let err = session
        .submit_player_action(PlayerAction::Attack)
        .unwrap_err();
    assert!(matches!(err, RuntimeError::Action(ActionError::NoActiveSession)));

    let err = session
        .submit_player_action(PlayerAction::Skill("meteor".into()))
        .unwrap_err();
    assert!(matches!(err, RuntimeError::Action(ActionError::NoActiveSession)));

    assert_eq!(session.state(), &before);
}

#[test]
fn new_run_drops_pending_enemy_turns() {
    let mut session = session();
    session.start_session(slime()).expect("start");
    session
        .submit_player_action(PlayerAction::Attack)
        .expect("attack");
    assert_eq!(session.scheduler().len(), 1);

    session.new_run(hero(), Vec::new());

    assert!(session.scheduler().is_empty());
    assert!(session.state().session.is_none());
    assert!(session.flush().is_empty());
}

#[test]
fn items_outside_combat_do_not_cost_a_turn() {
    let base = session();
    let template = potion(&base);
    let mut state = base.state().clone();
    state.character.hp = 10;
    state
        .character
        .inventory
        .push(Item::from_template(&template), 20)
        .expect("room");

    let mut session = GameSession::builder()
        .config(config())
        .oracles(oracles())
        .initial_state(state)
        .build()
        .expect("session");
    let mut character = session.subscribe(Topic::Character);

    let outcome = session.use_item(0).expect("potion");

    assert!(outcome.next.is_none());
    assert!(session.scheduler().is_empty());
    assert_eq!(session.state().character.hp, 40);
    assert!(session.state().character.inventory.is_empty());
    assert_eq!(
        drain(&mut character),
        vec![Event::Character(CharacterEvent::ItemUsed {
            item: ItemId::from("potion"),
        })]
    );
}

#[test]
fn items_inside_combat_hand_the_turn_to_the_enemy() {
    let mut session = session();
    let template = potion(&session);
    let mut state = session.state().clone();
    state
        .character
        .inventory
        .push(Item::from_template(&template), 20)
        .expect("room");
    session = GameSession::builder()
        .config(config())
        .oracles(oracles())
        .initial_state(state)
        .build()
        .expect("session");

    session.start_session(slime()).expect("start");
    let outcome = session.use_item(0).expect("potion");

    assert!(outcome.next.is_some());
    assert_eq!(session.scheduler().len(), 1);
}

#[tokio::test]
async fn run_pending_sleeps_until_the_enemy_acts() {
    let mut session = GameSession::builder()
        .config(crawl_runtime::RuntimeConfig {
            turn_delay: Duration::from_millis(10),
            ..config()
        })
        .oracles(oracles())
        .character(hero())
        .build()
        .expect("session");

    session.start_session(slime()).expect("start");
    session
        .submit_player_action(PlayerAction::Attack)
        .expect("attack");

    let replies = session.run_pending().await;

    assert_eq!(replies.len(), 1);
    assert!(session.scheduler().is_empty());
}

#[test]
fn meta_upgrades_raise_stats_up_to_their_max_rank() {
    let mut session = session();
    let vitality = MetaUpgradeId::from("vitality");
    let base_hp = session.state().character.derived.max_hp;

    assert_eq!(session.purchase_upgrade(&vitality).expect("buy"), Some(1));
    assert_eq!(session.state().character.derived.max_hp, base_hp + 10);

    for rank in 2..=5 {
        assert_eq!(session.purchase_upgrade(&vitality).expect("buy"), Some(rank));
    }
    assert_eq!(session.purchase_upgrade(&vitality).expect("buy"), None);
    assert_eq!(session.state().character.derived.max_hp, base_hp + 50);

    let err = session
        .purchase_upgrade(&MetaUpgradeId::from("omniscience"))
        .unwrap_err();
    assert!(matches!(err, RuntimeError::Action(ActionError::Lookup(_))));
}

#[test]
fn ascension_keeps_meta_and_resets_the_run() {
    let mut session = session();
    session
        .purchase_upgrade(&MetaUpgradeId::from("might"))
        .expect("buy");
    session.start_session(slime()).expect("start");

    let err = session.ascend(hero()).unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Action(ActionError::SessionAlreadyActive)
    ));

    assert_eq!(fight(&mut session), CombatPhase::Victory);
    let previous_seed = session.state().run.seed;
    session.ascend(hero()).expect("ascend");

    let state = session.state();
    assert_eq!(state.meta.ascensions, 1);
    assert_eq!(state.meta.rank(&MetaUpgradeId::from("might")), 1);
    assert_eq!(state.run.kills, 0);
    assert_eq!(state.character.exp, 0);
    assert_ne!(state.run.seed, previous_seed);
}
