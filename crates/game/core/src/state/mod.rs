//! Mutable simulation state.
//!
//! [`GameState`] is the single aggregate the runtime owns; the rules borrow
//! it explicitly. Everything here is plain data plus small invariant-keeping
//! helpers, and all of it round-trips through serde for saves.
mod character;
mod enemy;
mod equipment;
mod game;
mod inventory;
mod item;
mod run;
mod status;

pub use character::{BaseAttributes, Character};
pub use enemy::{Enemy, EnemyTraits};
pub use equipment::{EquipSlot, Equipment};
pub use game::GameState;
pub use inventory::Inventory;
pub use item::{Gem, Item};
pub use run::{GameMode, MetaProgress, RunState};
pub use status::{StatusEffect, StatusEffects, StatusKind, StatusTemplate, StatusTick};
