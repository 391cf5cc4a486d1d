//! Ability definitions, shared by the player and the enemy AI

use crate::types::{AbilityKind, AbilityTarget, EffectKind};
use serde::{Deserialize, Serialize};

/// A combat ability. The payload fields (damage, heal_amount, applies) are
/// fixed amounts; the priority/threshold fields only matter when an enemy's
/// AI scores the ability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityDef {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub kind: AbilityKind,
    #[serde(default)]
    pub mana_cost: u32,
    #[serde(default)]
    pub cooldown: u32,
    #[serde(default)]
    pub max_uses: Option<u32>,
    /// Independent gate roll when the AI considers this ability
    #[serde(default = "default_chance")]
    pub chance: f64,
    #[serde(default = "default_base_priority")]
    pub base_priority: f64,
    /// Self-hp fraction at or under which threshold_bonus is added
    #[serde(default)]
    pub hp_threshold: f64,
    #[serde(default = "default_threshold_bonus")]
    pub threshold_bonus: f64,
    #[serde(default)]
    pub prefer_early: bool,
    #[serde(default)]
    pub prefer_late: bool,
    #[serde(default)]
    pub damage: Option<u32>,
    #[serde(default)]
    pub heal_amount: Option<u32>,
    #[serde(default)]
    pub applies: Option<EffectKind>,
    #[serde(default)]
    pub target: AbilityTarget,
}

fn default_chance() -> f64 {
    1.0
}
fn default_base_priority() -> f64 {
    1.0
}
fn default_threshold_bonus() -> f64 {
    2.0
}

impl AbilityDef {
    /// Name shown in the event log
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}
