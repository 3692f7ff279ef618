#![allow(dead_code)]

use std::path::PathBuf;
use std::time::Duration;

use crawl_content::ContentFactory;
use crawl_core::{BaseAttributes, Character, CombatPhase, PlayerAction};
use crawl_runtime::{Event, GameSession, OracleBundle, RuntimeConfig};
use tokio::sync::broadcast;

pub fn data_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../game/content/data"))
}

pub fn oracles() -> OracleBundle {
    let factory = ContentFactory::new(data_dir());
    OracleBundle::new(
        factory.load_catalog().expect("catalog"),
        factory.load_loot().expect("loot"),
        factory.load_config().expect("config"),
    )
}

pub fn hero() -> Character {
    let mut character = Character::new("Hero", BaseAttributes::new(5, 5, 5, 2, 2));
    character.skills.push("power_strike".into());
    character
}

pub fn config() -> RuntimeConfig {
    RuntimeConfig {
        turn_delay: Duration::from_millis(500),
        event_buffer_size: 1024,
        seed: Some(42),
        ..RuntimeConfig::default()
    }
}

pub fn session() -> GameSession {
    GameSession::builder()
        .config(config())
        .oracles(oracles())
        .character(hero())
        .build()
        .expect("session")
}

/// Attacks and flushes enemy turns until the encounter ends.
pub fn fight(session: &mut GameSession) -> CombatPhase {
    for _ in 0..100 {
        let outcome = session
            .submit_player_action(PlayerAction::Attack)
            .expect("attack accepted");
        if let Some(phase) = outcome.ended_phase() {
            return phase;
        }
        for outcome in session.flush() {
            if let Some(phase) = outcome.ended_phase() {
                return phase;
            }
        }
    }
    panic!("encounter did not end");
}

pub fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
