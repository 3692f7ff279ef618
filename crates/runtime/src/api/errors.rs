//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the rules core and repositories so clients can bubble
//! them up with consistent context.

use crawl_core::{ActionError, ErrorSeverity, GameError};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("session requires oracles to be configured before building")]
    MissingOracles,

    #[error("session requires an initial state or a character to start a run with")]
    MissingInitialState,
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Action(err) => err.severity(),
            RuntimeError::Repository(err) => err.severity(),
            RuntimeError::MissingOracles | RuntimeError::MissingInitialState => {
                ErrorSeverity::Internal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::Action(err) => err.error_code(),
            RuntimeError::Repository(err) => err.error_code(),
            RuntimeError::MissingOracles => "RUNTIME_MISSING_ORACLES",
            RuntimeError::MissingInitialState => "RUNTIME_MISSING_INITIAL_STATE",
        }
    }
}
