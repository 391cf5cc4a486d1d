//! Per-combat session state and the snapshot handed to the presentation layer

use crate::ai::AiState;
use crate::character::Character;
use crate::effect::ActiveEffect;
use crate::stats::Stats;
use content_core::EnemyDef;
use serde::{Deserialize, Serialize};

/// Which input the session currently accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuPhase {
    InCombat,
    AbilityChoice,
    InventoryChoice,
}

/// All mutable state of one running combat. Owned exclusively by the
/// resolver and dropped at any terminal transition.
#[derive(Debug, Clone)]
pub struct CombatSession {
    pub user_id: i64,
    pub enemy_id: String,
    /// In-memory working copy, persisted only at terminal states
    pub character: Character,
    /// Effective stats for this combat (base + equipment)
    pub player_stats: Stats,
    pub player_hp: u32,
    pub player_mana: u32,
    pub enemy_hp: u32,
    pub enemy_mana: u32,
    pub round: u32,
    pub player_effects: Vec<ActiveEffect>,
    pub enemy_effects: Vec<ActiveEffect>,
    /// Consumed by the enemy attack of the same round only
    pub player_defending: bool,
    pub phase: MenuPhase,
    pub ai: AiState,
}

impl CombatSession {
    pub fn new(character: Character, player_stats: Stats, enemy: &EnemyDef) -> Self {
        CombatSession {
            user_id: character.user_id,
            enemy_id: enemy.id.clone(),
            player_hp: character.stats.hp.min(player_stats.max_hp),
            player_mana: character.current_mana.min(player_stats.max_mana),
            character,
            player_stats,
            enemy_hp: enemy.hp,
            enemy_mana: enemy.mana,
            round: 1,
            player_effects: Vec::new(),
            enemy_effects: Vec::new(),
            player_defending: false,
            phase: MenuPhase::InCombat,
            ai: AiState::new(),
        }
    }

    /// Everything the presentation layer needs to render the combat screen
    pub fn snapshot(&self, enemy: &EnemyDef) -> StatusSnapshot {
        StatusSnapshot {
            player_name: self.character.name.clone(),
            player_hp: self.player_hp,
            player_max_hp: self.player_stats.max_hp,
            player_mana: self.player_mana,
            player_max_mana: self.player_stats.max_mana,
            enemy_name: enemy.name.clone(),
            enemy_hp: self.enemy_hp,
            enemy_max_hp: enemy.hp,
            enemy_mana: self.enemy_mana,
            enemy_max_mana: enemy.mana,
            player_effects: self.player_effects.clone(),
            enemy_effects: self.enemy_effects.clone(),
            round: self.round,
            phase: self.phase,
        }
    }
}

/// Read-only view of a combat, sufficient to render without internal access
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub player_name: String,
    pub player_hp: u32,
    pub player_max_hp: u32,
    pub player_mana: u32,
    pub player_max_mana: u32,
    pub enemy_name: String,
    pub enemy_hp: u32,
    pub enemy_max_hp: u32,
    pub enemy_mana: u32,
    pub enemy_max_mana: u32,
    pub player_effects: Vec<ActiveEffect>,
    pub enemy_effects: Vec<ActiveEffect>,
    pub round: u32,
    pub phase: MenuPhase,
}
