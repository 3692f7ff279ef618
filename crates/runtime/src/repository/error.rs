//! Error types raised by repository implementations.

use crawl_core::{ErrorSeverity, GameError};
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("save repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("checksum mismatch: expected {expected}, found {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("unsupported save version {found} (current is {current})")]
    UnsupportedVersion { found: u32, current: u32 },

    #[error("corrupted data: {0}")]
    CorruptedData(String),

    #[error("invalid save slot name: {0:?}")]
    InvalidSlot(String),
}

impl RepositoryError {
    /// The stored bytes are unusable, as opposed to the storage being unreachable.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            RepositoryError::Json(_)
                | RepositoryError::ChecksumMismatch { .. }
                | RepositoryError::UnsupportedVersion { .. }
                | RepositoryError::CorruptedData(_)
        )
    }
}

impl GameError for RepositoryError {
    fn severity(&self) -> ErrorSeverity {
        if self.is_corruption() {
            ErrorSeverity::Fatal
        } else if matches!(self, RepositoryError::InvalidSlot(_)) {
            ErrorSeverity::Validation
        } else {
            ErrorSeverity::Internal
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RepositoryError::LockPoisoned => "REPOSITORY_LOCK_POISONED",
            RepositoryError::Io(_) => "REPOSITORY_IO",
            RepositoryError::Json(_) => "REPOSITORY_JSON",
            RepositoryError::ChecksumMismatch { .. } => "REPOSITORY_CHECKSUM_MISMATCH",
            RepositoryError::UnsupportedVersion { .. } => "REPOSITORY_UNSUPPORTED_VERSION",
            RepositoryError::CorruptedData(_) => "REPOSITORY_CORRUPTED_DATA",
            RepositoryError::InvalidSlot(_) => "REPOSITORY_INVALID_SLOT",
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
