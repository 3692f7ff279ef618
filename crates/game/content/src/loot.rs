//! Weighted loot tables.
//!
//! A drop happens when the d100 roll is at or below the drop chance for the
//! enemy's rank and floor. The same roll then picks an entry by weight, so one
//! roll fully decides the drop.

use std::collections::HashMap;

use crawl_core::env::{EnemyRank, EnemyTemplate};
use crawl_core::{EnemyId, ItemId, LootOracle};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootEntry {
    pub item: ItemId,
    #[cfg_attr(feature = "serde", serde(default = "default_weight"))]
    pub weight: u32,
}

#[cfg(feature = "serde")]
fn default_weight() -> u32 {
    1
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WeightedLootTable {
    /// Drop chance in percent for a normal enemy on floor 0.
    pub base_chance: u32,
    pub per_floor: u32,
    pub elite_bonus: u32,
    pub boss_bonus: u32,
    /// Per-enemy tables. Enemies without one fall back to their own drop
    /// list with equal weights.
    pub tables: HashMap<EnemyId, Vec<LootEntry>>,
}

impl Default for WeightedLootTable {
    fn default() -> Self {
        Self {
            base_chance: 30,
            per_floor: 2,
            elite_bonus: 20,
            boss_bonus: 70,
            tables: HashMap::new(),
        }
    }
}

impl WeightedLootTable {
    /// Drop chance in percent, capped at 100.
    pub fn drop_chance(&self, rank: EnemyRank, floor: u32) -> u32 {
        let bonus = match rank {
            EnemyRank::Normal => 0,
            EnemyRank::Elite => self.elite_bonus,
            EnemyRank::Boss => self.boss_bonus,
        };
        self.base_chance
            .saturating_add(self.per_floor.saturating_mul(floor))
            .saturating_add(bonus)
            .min(100)
    }

    fn entries(&self, enemy: &EnemyTemplate) -> Vec<LootEntry> {
        match self.tables.get(&enemy.id) {
            Some(entries) => entries.clone(),
            None => enemy
                .drops
                .iter()
                .map(|item| LootEntry {
                    item: item.clone(),
                    weight: 1,
                })
                .collect(),
        }
    }
}

impl LootOracle for WeightedLootTable {
    fn roll_drop(&self, enemy: &EnemyTemplate, floor: u32, roll: u32) -> Option<ItemId> {
        let chance = self.drop_chance(enemy.rank, floor);
        if roll == 0 || roll > chance {
            return None;
        }
        let entries = self.entries(enemy);
        let total: u64 = entries.iter().map(|entry| u64::from(entry.weight)).sum();
        if total == 0 {
            return None;
        }

        // Spread the successful rolls 1..=chance over the weight range.
        let mut ticket = u64::from(roll - 1) * total / u64::from(chance);
        for entry in entries {
            let weight = u64::from(entry.weight);
            if ticket < weight {
                return Some(entry.item);
            }
            ticket -= weight;
        }
        None
    }
}
