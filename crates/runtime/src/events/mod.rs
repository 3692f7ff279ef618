//! Topic-based event bus for runtime events.
//!
//! Events are published to specific topics, and consumers subscribe only to
//! the topics they need. The presentation layer never reads game state
//! directly; it reacts to these events.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CharacterEvent, CombatNotice, FreshRunReason, SessionEvent};
