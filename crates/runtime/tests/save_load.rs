mod common;

use std::fs;

use crawl_core::{CombatPhase, EncounterKind, EnemyId, GameMode, PlayerAction};
use crawl_runtime::{
    FileSaveRepository, FreshRunReason, GameSession, InMemorySaveRepository, LoadOutcome,
    SaveEnvelope, SaveRepository,
};

use common::{config, hero, oracles};

fn session_with(repository: impl SaveRepository + 'static) -> GameSession {
    GameSession::builder()
        .config(config())
        .oracles(oracles())
        .character(hero())
        .repository(repository)
        .build()
        .expect("session")
}

#[test]
fn snapshot_taken_mid_enemy_turn_is_handed_back_to_the_player() {
    let dir = tempfile::tempdir().expect("tempdir");

    let mut session = session_with(FileSaveRepository::new(dir.path()).expect("repo"));
    session
        .start_session(EncounterKind::Explore(EnemyId::from("slime")))
        .expect("start");
    session
        .submit_player_action(PlayerAction::Attack)
        .expect("attack");
    assert_eq!(
        session.state().session.as_ref().map(|s| s.phase),
        Some(CombatPhase::EnemyTurn)
    );
    session.save().expect("save");
    let saved_enemy_hp = session.state().session.as_ref().map(|s| s.enemy.hp);

    let mut restored = session_with(FileSaveRepository::new(dir.path()).expect("repo"));
    let outcome = restored.load().expect("load");

    assert_eq!(outcome, LoadOutcome::Restored { repaired: true });
    let state = restored.state();
    assert_eq!(state.mode, GameMode::Combat);
    assert_eq!(state.session.as_ref().map(|s| s.phase), Some(CombatPhase::PlayerTurn));
    assert_eq!(state.session.as_ref().map(|s| s.enemy.hp), saved_enemy_hp);
    assert!(restored.scheduler().is_empty());

    // The repaired session accepts input again.
    restored
        .submit_player_action(PlayerAction::Attack)
        .expect("attack after load");
}

#[test]
fn clean_save_round_trips_without_repair() {
    let repository = std::sync::Arc::new(InMemorySaveRepository::new());
    let mut session = GameSession::builder()
        .config(config())
        .oracles(oracles())
        .character(hero())
        .shared_repository(repository.clone())
        .build()
        .expect("session");
    let before = session.state().clone();

    session.save().expect("save");
    assert!(repository.exists("autosave"));

    assert_eq!(session.load().expect("load"), LoadOutcome::Restored { repaired: false });
    assert_eq!(session.state(), &before);
}

#[test]
fn tampered_save_falls_back_to_a_fresh_run() {
    let dir = tempfile::tempdir().expect("tempdir");
    let repository = FileSaveRepository::new(dir.path()).expect("repo");
    let path = repository.save_path("autosave").expect("slot path");

    let mut session = session_with(repository);
    session
        .start_session(EncounterKind::Explore(EnemyId::from("slime")))
        .expect("start");
    session.save().expect("save");

    let bytes = fs::read(&path).expect("read save");
    let mut envelope = SaveEnvelope::from_bytes(&bytes).expect("envelope");
    envelope.payload = envelope.payload.replace("Hero", "Cheater");
    fs::write(&path, envelope.to_bytes().expect("bytes")).expect("write save");

    let outcome = session.load().expect("load");

    assert!(matches!(
        outcome,
        LoadOutcome::Fresh(FreshRunReason::Corrupted(_))
    ));
    let state = session.state();
    assert!(state.session.is_none());
    assert_eq!(state.mode, GameMode::Explore);
    assert_eq!(state.character.gold, 0);
    assert_eq!(state.character.name, "Hero");
    assert_eq!(state.character.hp, state.character.derived.max_hp);
}

#[test]
fn garbage_and_unknown_versions_are_treated_as_corruption() {
    let repository = std::sync::Arc::new(InMemorySaveRepository::new());
    let mut session = GameSession::builder()
        .config(config())
        .oracles(oracles())
        .character(hero())
        .shared_repository(repository.clone())
        .build()
        .expect("session");

    repository
        .insert_raw("autosave", b"{not json".to_vec())
        .expect("insert");
    assert!(matches!(
        session.load().expect("load"),
        LoadOutcome::Fresh(FreshRunReason::Corrupted(_))
    ));

    let mut envelope = SaveEnvelope::seal(session.state()).expect("seal");
    envelope.version = 99;
    repository
        .insert_raw("autosave", envelope.to_bytes().expect("bytes"))
        .expect("insert");
    assert!(matches!(
        session.load().expect("load"),
        LoadOutcome::Fresh(FreshRunReason::Corrupted(_))
    ));
}

#[test]
fn missing_save_starts_fresh() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = session_with(FileSaveRepository::new(dir.path()).expect("repo"));

    assert_eq!(
        session.load().expect("load"),
        LoadOutcome::Fresh(FreshRunReason::NoSave)
    );
}

#[test]
fn file_repository_lists_and_deletes_slots() {
    let dir = tempfile::tempdir().expect("tempdir");
    let repository = FileSaveRepository::new(dir.path()).expect("repo");
    let session = session_with(InMemorySaveRepository::new());

    repository.save("beta", session.state()).expect("save");
    repository.save("alpha", session.state()).expect("save");
    assert_eq!(repository.list_slots().expect("list"), vec!["alpha", "beta"]);

    repository.delete("alpha").expect("delete");
    repository.delete("alpha").expect("idempotent delete");
    assert_eq!(repository.list_slots().expect("list"), vec!["beta"]);
    assert_eq!(
        repository.load("beta").expect("load").as_ref(),
        Some(session.state())
    );
}
