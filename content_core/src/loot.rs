//! Loot tables keyed by enemy category

use crate::types::{EnemyCategory, Rarity};
use serde::{Deserialize, Serialize};

/// Reward ranges and possible drops for one enemy category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LootTable {
    pub category: EnemyCategory,
    #[serde(default)]
    pub gold_range: RangeConfig,
    #[serde(default)]
    pub xp_range: RangeConfig,
    #[serde(default)]
    pub drops: Vec<DropDef>,
}

/// One possible item drop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropDef {
    pub item_id: String,
    /// Base drop chance in percent, before the luck bonus
    pub chance: f64,
    #[serde(default)]
    pub rarity: Rarity,
}

/// Inclusive range that can be written as a single value or `[min, max]`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeConfig {
    Single(u32),
    Range([u32; 2]),
}

impl Default for RangeConfig {
    fn default() -> Self {
        RangeConfig::Single(0)
    }
}

impl RangeConfig {
    pub fn min(&self) -> u32 {
        match self {
            RangeConfig::Single(v) => *v,
            RangeConfig::Range([min, _]) => *min,
        }
    }

    pub fn max(&self) -> u32 {
        match self {
            RangeConfig::Single(v) => *v,
            RangeConfig::Range([_, max]) => *max,
        }
    }
}
