//! Data-driven content definitions and loaders.
//!
//! This crate houses the static catalogs and provides loaders for RON/TOML data files:
//! - Items and set bonuses
//! - Skills
//! - Passives, relics, evolutions, run modifiers and meta upgrades
//! - Enemies, floor bosses and loot tables
//! - Balance configuration
//!
//! Content is consumed through the `crawl-core` oracle traits and never appears
//! in game state.

pub mod catalog;
pub mod loot;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{CatalogIssue, ContentCatalog};
pub use loot::{LootEntry, WeightedLootTable};

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, EnemyLoader, ItemLoader, LoadResult, LootLoader, ModifierLoader,
    SkillLoader,
};
