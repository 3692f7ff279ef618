//! Runtime wrapper around static game content.
//!
//! [`OracleBundle`] owns the loaded catalogs and hands out [`crawl_core::Env`]
//! views on demand. The data is immutable at runtime; dynamic state lives in
//! repositories or [`crawl_core::GameState`].

use std::sync::Arc;

use crawl_content::{ContentCatalog, WeightedLootTable};
use crawl_core::{Env, GameConfig, PcgRng};

/// Shares all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleBundle {
    catalog: Arc<ContentCatalog>,
    loot: Arc<WeightedLootTable>,
    config: Arc<GameConfig>,
    rng: PcgRng,
}

impl OracleBundle {
    /// Creates a new oracle bundle
    pub fn new(catalog: ContentCatalog, loot: WeightedLootTable, config: GameConfig) -> Self {
        Self {
            catalog: Arc::new(catalog),
            loot: Arc::new(loot),
            config: Arc::new(config),
            rng: PcgRng, // PcgRng is stateless
        }
    }

    /// Converts the bundle into an Env for crawl-core with every oracle wired.
    pub fn env(&self) -> Env<'_> {
        self.catalog
            .env(&self.config)
            .with_loot(self.loot.as_ref())
            .with_rng(&self.rng)
    }

    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
