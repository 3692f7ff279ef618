//! Semantic events emitted for presentation layers.

use crate::ids::{EnemyId, ItemId, StatusId};

/// Which side of the encounter an event concerns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Enemy,
}

/// The defensive source that negated a hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Negation {
    Invulnerable,
    Ethereal,
    Intangible,
    SetDodge,
    UniqueDodge,
    Dodge,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    Log(String),
    Damage {
        target: Side,
        amount: i32,
        critical: bool,
    },
    Heal {
        target: Side,
        amount: i32,
    },
    /// The player took HP damage.
    Shake,
    Dodged {
        target: Side,
        source: Negation,
    },
    StatusApplied {
        target: Side,
        status: StatusId,
    },
    Victory {
        enemy: EnemyId,
        exp: u32,
        gold: u32,
    },
    Defeat,
    Revived {
        hp: i32,
    },
    Fled,
    LevelUp {
        level: u32,
    },
    LootDropped(ItemId),
    RunComplete,
}

impl CombatEvent {
    pub fn log(message: impl Into<String>) -> Self {
        CombatEvent::Log(message.into())
    }

    /// One-line description for the session history.
    pub fn describe(&self) -> String {
        match self {
            CombatEvent::Log(message) => message.clone(),
            CombatEvent::Damage {
                target,
                amount,
                critical,
            } => {
                let crit = if *critical { " (critical)" } else { "" };
                format!("{target:?} takes {amount} damage{crit}")
            }
            CombatEvent::Heal { target, amount } => format!("{target:?} recovers {amount} HP"),
            CombatEvent::Shake => "the blow lands".to_owned(),
            CombatEvent::Dodged { target, source } => format!("{target:?} avoids the hit ({source:?})"),
            CombatEvent::StatusApplied { target, status } => format!("{target:?} is affected by {status}"),
            CombatEvent::Victory { enemy, exp, gold } => {
                format!("{enemy} defeated: +{exp} EXP, +{gold} gold")
            }
            CombatEvent::Defeat => "you have fallen".to_owned(),
            CombatEvent::Revived { hp } => format!("revived with {hp} HP"),
            CombatEvent::Fled => "escaped".to_owned(),
            CombatEvent::LevelUp { level } => format!("reached level {level}"),
            CombatEvent::LootDropped(item) => format!("found {item}"),
            CombatEvent::RunComplete => "the dungeon is conquered".to_owned(),
        }
    }
}

/// One line of session history.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatLogEntry {
    pub round: u32,
    pub text: String,
}
