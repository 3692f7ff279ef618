use std::collections::BTreeMap;

use crate::ids::{MetaUpgradeId, RunModifierId};

/// Per-run progress. Reset by a new run or an ascension.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunState {
    pub floor: u32,
    pub seed: u64,
    /// Roll counter mixed into every deterministic roll.
    #[cfg_attr(feature = "serde", serde(default))]
    pub nonce: u64,
    /// Challenge modifiers selected at run start.
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: Vec<RunModifierId>,
    /// The one-shot auto-revive has fired this run.
    #[cfg_attr(feature = "serde", serde(default))]
    pub revive_consumed: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub next_session_id: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kills: u32,
}

impl RunState {
    pub fn new(seed: u64, modifiers: Vec<RunModifierId>) -> Self {
        Self {
            floor: 1,
            seed,
            modifiers,
            ..Self::default()
        }
    }

    pub fn allocate_session_id(&mut self) -> u64 {
        self.next_session_id += 1;
        self.next_session_id
    }
}

/// Permanent progression that survives ascension.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MetaProgress {
    pub upgrades: BTreeMap<MetaUpgradeId, u32>,
    pub ascensions: u32,
}

impl MetaProgress {
    pub fn rank(&self, id: &MetaUpgradeId) -> u32 {
        self.upgrades.get(id).copied().unwrap_or(0)
    }

    /// Raises an upgrade by one rank. Returns `false` at `max_rank`.
    pub fn purchase(&mut self, id: &MetaUpgradeId, max_rank: u32) -> bool {
        let rank = self.upgrades.entry(id.clone()).or_insert(0);
        if *rank >= max_rank {
            return false;
        }
        *rank += 1;
        true
    }
}

/// What the surrounding game loop is doing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameMode {
    #[default]
    Explore,
    Combat,
    GameOver,
    RunComplete,
}
