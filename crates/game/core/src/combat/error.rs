//! Invalid actions. A rejected action leaves the game state untouched.

use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::ids::{ItemId, SkillId};
use crate::state::EquipSlot;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("no active combat session")]
    NoActiveSession,

    #[error("a combat session is already active")]
    SessionAlreadyActive,

    #[error("it is not the player's turn")]
    NotPlayerTurn,

    #[error("the encounter is already decided")]
    SessionOver,

    #[error("the run is over")]
    RunOver,

    #[error("not enough MP: need {required}, have {available}")]
    InsufficientMp { required: i32, available: i32 },

    #[error("skill '{0}' is not known")]
    SkillNotKnown(SkillId),

    #[error("requires level {level}")]
    RequirementNotMet { level: u32 },

    #[error("no item at inventory index {0}")]
    InventoryIndex(usize),

    #[error("inventory is full")]
    InventoryFull,

    #[error("'{item}' cannot be equipped in the {slot} slot")]
    SlotMismatch { item: ItemId, slot: EquipSlot },

    #[error("nothing equipped in the {0} slot")]
    SlotEmpty(EquipSlot),

    #[error("'{0}' cannot be used this way")]
    NotUsable(ItemId),

    #[error("not enough gold: need {required}, have {available}")]
    InsufficientGold { required: u32, available: u32 },

    #[error(transparent)]
    Lookup(#[from] OracleError),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ActionError::InsufficientMp { .. }
            | ActionError::InsufficientGold { .. }
            | ActionError::NotPlayerTurn
            | ActionError::InventoryFull => ErrorSeverity::Recoverable,
            ActionError::Lookup(err) => err.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ActionError::NoActiveSession => "ACTION_NO_ACTIVE_SESSION",
            ActionError::SessionAlreadyActive => "ACTION_SESSION_ALREADY_ACTIVE",
            ActionError::NotPlayerTurn => "ACTION_NOT_PLAYER_TURN",
            ActionError::SessionOver => "ACTION_SESSION_OVER",
            ActionError::RunOver => "ACTION_RUN_OVER",
            ActionError::InsufficientMp { .. } => "ACTION_INSUFFICIENT_MP",
            ActionError::SkillNotKnown(_) => "ACTION_SKILL_NOT_KNOWN",
            ActionError::RequirementNotMet { .. } => "ACTION_REQUIREMENT_NOT_MET",
            ActionError::InventoryIndex(_) => "ACTION_INVENTORY_INDEX",
            ActionError::InventoryFull => "ACTION_INVENTORY_FULL",
            ActionError::SlotMismatch { .. } => "ACTION_SLOT_MISMATCH",
            ActionError::SlotEmpty(_) => "ACTION_SLOT_EMPTY",
            ActionError::NotUsable(_) => "ACTION_NOT_USABLE",
            ActionError::InsufficientGold { .. } => "ACTION_INSUFFICIENT_GOLD",
            ActionError::Lookup(err) => err.error_code(),
        }
    }
}
