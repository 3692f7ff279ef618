//! Event payloads published on the runtime bus.

use crawl_core::state::EquipSlot;
use crawl_core::{CombatEvent, CombatPhase, ItemId, MetaUpgradeId};
use serde::{Deserialize, Serialize};

/// A combat event tagged with the session that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatNotice {
    pub session_id: u64,
    pub event: CombatEvent,
}

/// Character sheet changes outside the combat log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterEvent {
    LevelUp { level: u32 },
    Revived { hp: i32 },
    Equipped { slot: EquipSlot, item: ItemId },
    Unequipped { slot: EquipSlot, item: ItemId },
    Enhanced { slot: EquipSlot, plus: u8 },
    Socketed { slot: EquipSlot },
    ItemUsed { item: ItemId },
    UpgradePurchased { upgrade: MetaUpgradeId, rank: u32 },
}

/// Why a fresh run replaced a requested load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FreshRunReason {
    NoSave,
    Corrupted(String),
}

/// Session lifecycle, from encounter start to run end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    EncounterStarted { session_id: u64, enemy: String },
    EncounterEnded { session_id: u64, phase: CombatPhase },
    RunStarted { seed: u64 },
    GameOver,
    RunComplete,
    Saved { slot: String },
    Loaded { slot: String, repaired: bool },
    FreshRun { reason: FreshRunReason },
}
