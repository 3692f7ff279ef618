//! Runtime orchestration for the dungeon crawler.
//!
//! This crate wraps the pure rules in `crawl-core` with everything a running
//! game needs: a session controller that owns the state, a cancellable turn
//! scheduler, a topic event bus, save repositories and structured logging.
//! Consumers embed [`GameSession`] and react to [`Event`]s.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the session controller and its builder
//! - [`scheduler`] defers enemy turns on a logical clock
//! - [`events`] provides the topic-based event bus
//! - [`oracle`] and [`repository`] provide data adapters
pub mod api;
pub mod config;
pub mod events;
pub mod oracle;
pub mod repository;
pub mod runtime;
pub mod scheduler;

pub use api::{Result, RuntimeError};
pub use config::{RuntimeConfig, default_save_dir};
pub use events::{
    CharacterEvent, CombatNotice, Event, EventBus, FreshRunReason, SessionEvent, Topic,
};
pub use oracle::OracleBundle;
pub use repository::{
    FileSaveRepository, InMemorySaveRepository, RepositoryError, SAVE_VERSION, SaveEnvelope,
    SaveRepository,
};
pub use runtime::{GameSession, GameSessionBuilder, LoadOutcome};
pub use scheduler::{ScheduledTask, TaskId, TurnScheduler};
