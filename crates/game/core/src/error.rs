//! Common error infrastructure for crawl-core.
//!
//! Domain errors live next to the code that raises them ([`OracleError`] in
//! `env`, [`ActionError`] in `combat`). They share [`GameError`] so the runtime
//! can pick a logging level and a stable code without matching on every enum.
//!
//! [`OracleError`]: crate::env::OracleError
//! [`ActionError`]: crate::combat::ActionError

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The action may succeed later (e.g. not enough MP yet).
    Recoverable,

    /// Invalid input; reject without retrying.
    ///
    /// Examples: unknown skill id, equipping into the wrong slot
    Validation,

    /// Unexpected state inconsistency. Indicates a bug.
    Internal,

    /// Game state is unusable; the caller should start fresh.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all crawl-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for metrics, logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
