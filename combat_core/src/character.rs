//! The player character, as persisted by the character store

use crate::stats;
use crate::stats::Stats;
use content_core::ContentCatalog;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A player character. Owned by the repository; the combat engine mutates an
/// in-memory copy and hands it back for persistence at terminal states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub user_id: i64,
    pub name: String,
    #[serde(default)]
    pub race: String,
    #[serde(default)]
    pub character_class: String,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub exp: u64,
    #[serde(default = "default_exp_to_next")]
    pub exp_to_next: u64,
    #[serde(default)]
    pub stat_points: u32,
    #[serde(default)]
    pub gold: u64,
    #[serde(default = "default_mana")]
    pub current_mana: u32,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub inventory: Vec<String>,
    /// slot name -> item id
    #[serde(default)]
    pub equipment: BTreeMap<String, String>,
}

fn default_level() -> u32 {
    1
}
fn default_exp_to_next() -> u64 {
    100
}
fn default_mana() -> u32 {
    50
}

impl Character {
    /// A fresh level-1 character with default stats
    pub fn new(user_id: i64, name: impl Into<String>) -> Self {
        Character {
            user_id,
            name: name.into(),
            race: String::new(),
            character_class: String::new(),
            level: 1,
            exp: 0,
            exp_to_next: 100,
            stat_points: 0,
            gold: 0,
            current_mana: 50,
            stats: Stats::default(),
            inventory: Vec::new(),
            equipment: BTreeMap::new(),
        }
    }

    /// Create a character with race and class modifiers folded into its base
    /// stats. Unknown race or class ids contribute no modifiers.
    pub fn create(
        user_id: i64,
        name: impl Into<String>,
        race_id: &str,
        class_id: &str,
        catalog: &ContentCatalog,
    ) -> Self {
        let mut character = Self::new(user_id, name);
        character.race = race_id.to_string();
        character.character_class = class_id.to_string();

        let empty = content_core::ModifierSet {
            id: String::new(),
            name: None,
            modifiers: BTreeMap::new(),
        };
        let race = match catalog.race(race_id) {
            Some(set) => set,
            None => {
                tracing::warn!("unknown race '{race_id}'");
                &empty
            }
        };
        let class = match catalog.class(class_id) {
            Some(set) => set,
            None => {
                tracing::warn!("unknown class '{class_id}'");
                &empty
            }
        };

        character.stats = stats::apply_modifiers(&character.stats, race, class);
        character.stats.hp = character.stats.max_hp;
        character.current_mana = character.stats.max_mana;
        character
    }

    /// Remove one instance of an item from the inventory. Returns whether an
    /// instance was found.
    pub fn remove_item(&mut self, item_id: &str) -> bool {
        if let Some(pos) = self.inventory.iter().position(|id| id == item_id) {
            self.inventory.remove(pos);
            true
        } else {
            false
        }
    }
}
