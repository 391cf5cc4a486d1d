//! Item definitions

use crate::types::{EffectKind, Rarity, StatKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An item. Equippable items carry stat bonuses; consumables carry a heal
/// amount or an effect grant (effect grants land on the opponent).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub rarity: Rarity,
    /// Equipment slot this item fits, None for consumables
    #[serde(default)]
    pub slot: Option<String>,
    #[serde(default)]
    pub stats: BTreeMap<StatKind, i32>,
    #[serde(default)]
    pub heal_amount: Option<u32>,
    #[serde(default)]
    pub applies: Option<EffectKind>,
}

impl ItemDef {
    /// Whether using this item in combat does anything
    pub fn is_consumable(&self) -> bool {
        self.heal_amount.is_some() || self.applies.is_some()
    }
}
