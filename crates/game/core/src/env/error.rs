//! Catalog lookup errors (ConfigLookupFailure).

use crate::error::{ErrorSeverity, GameError};
use crate::ids::{EnemyId, EvolutionId, ItemId, MetaUpgradeId, PassiveId, RelicId, RunModifierId, SetId, SkillId};

/// A required catalog was not wired, or an id was missing from it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("ItemOracle not available")]
    ItemsNotAvailable,

    #[error("SkillOracle not available")]
    SkillsNotAvailable,

    #[error("ModifierOracle not available")]
    ModifiersNotAvailable,

    #[error("EnemyOracle not available")]
    EnemiesNotAvailable,

    #[error("RngOracle not available")]
    RngNotAvailable,

    #[error("item '{0}' not found")]
    ItemNotFound(ItemId),

    #[error("set '{0}' not found")]
    SetNotFound(SetId),

    #[error("skill '{0}' not found")]
    SkillNotFound(SkillId),

    #[error("passive '{0}' not found")]
    PassiveNotFound(PassiveId),

    #[error("relic '{0}' not found")]
    RelicNotFound(RelicId),

    #[error("evolution '{0}' not found")]
    EvolutionNotFound(EvolutionId),

    #[error("run modifier '{0}' not found")]
    RunModifierNotFound(RunModifierId),

    #[error("meta upgrade '{0}' not found")]
    MetaUpgradeNotFound(MetaUpgradeId),

    #[error("enemy '{0}' not found")]
    EnemyNotFound(EnemyId),

    #[error("no boss defined for floor {0}")]
    BossNotFound(u32),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            ItemsNotAvailable | SkillsNotAvailable | ModifiersNotAvailable
            | EnemiesNotAvailable | RngNotAvailable => ErrorSeverity::Fatal,

            ItemNotFound(_)
            | SetNotFound(_)
            | SkillNotFound(_)
            | PassiveNotFound(_)
            | RelicNotFound(_)
            | EvolutionNotFound(_)
            | RunModifierNotFound(_)
            | MetaUpgradeNotFound(_)
            | EnemyNotFound(_)
            | BossNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            ItemsNotAvailable => "ORACLE_ITEMS_NOT_AVAILABLE",
            SkillsNotAvailable => "ORACLE_SKILLS_NOT_AVAILABLE",
            ModifiersNotAvailable => "ORACLE_MODIFIERS_NOT_AVAILABLE",
            EnemiesNotAvailable => "ORACLE_ENEMIES_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
            ItemNotFound(_) => "ORACLE_ITEM_NOT_FOUND",
            SetNotFound(_) => "ORACLE_SET_NOT_FOUND",
            SkillNotFound(_) => "ORACLE_SKILL_NOT_FOUND",
            PassiveNotFound(_) => "ORACLE_PASSIVE_NOT_FOUND",
            RelicNotFound(_) => "ORACLE_RELIC_NOT_FOUND",
            EvolutionNotFound(_) => "ORACLE_EVOLUTION_NOT_FOUND",
            RunModifierNotFound(_) => "ORACLE_RUN_MODIFIER_NOT_FOUND",
            MetaUpgradeNotFound(_) => "ORACLE_META_UPGRADE_NOT_FOUND",
            EnemyNotFound(_) => "ORACLE_ENEMY_NOT_FOUND",
            BossNotFound(_) => "ORACLE_BOSS_NOT_FOUND",
        }
    }
}
