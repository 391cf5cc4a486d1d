//! Shared closed enums used across content definitions and the combat engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// The nine combatant stat fields, used as keys for item bonuses and
/// race/class modifier maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Hp,
    MaxHp,
    Attack,
    Defense,
    Magic,
    Agility,
    Mana,
    MaxMana,
    Luck,
}

impl StatKind {
    /// Get all stat kinds
    pub fn all() -> &'static [StatKind] {
        &[
            StatKind::Hp,
            StatKind::MaxHp,
            StatKind::Attack,
            StatKind::Defense,
            StatKind::Magic,
            StatKind::Agility,
            StatKind::Mana,
            StatKind::MaxMana,
            StatKind::Luck,
        ]
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatKind::Hp => write!(f, "HP"),
            StatKind::MaxHp => write!(f, "Max HP"),
            StatKind::Attack => write!(f, "Attack"),
            StatKind::Defense => write!(f, "Defense"),
            StatKind::Magic => write!(f, "Magic"),
            StatKind::Agility => write!(f, "Agility"),
            StatKind::Mana => write!(f, "Mana"),
            StatKind::MaxMana => write!(f, "Max Mana"),
            StatKind::Luck => write!(f, "Luck"),
        }
    }
}

/// Timed status effects a combatant can carry during one combat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Poison,
    Burn,
    Freeze,
    Stun,
    Regen,
    Shield,
    Curse,
}

impl EffectKind {
    /// Get all effect kinds
    pub fn all() -> &'static [EffectKind] {
        &[
            EffectKind::Poison,
            EffectKind::Burn,
            EffectKind::Freeze,
            EffectKind::Stun,
            EffectKind::Regen,
            EffectKind::Shield,
            EffectKind::Curse,
        ]
    }

    /// Whether this effect damages its carrier each round
    pub fn is_damaging(&self) -> bool {
        matches!(self, EffectKind::Poison | EffectKind::Burn)
    }

    /// Whether this effect can force the carrier to skip its turn
    pub fn is_control(&self) -> bool {
        matches!(self, EffectKind::Freeze | EffectKind::Stun)
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectKind::Poison => write!(f, "Poison"),
            EffectKind::Burn => write!(f, "Burn"),
            EffectKind::Freeze => write!(f, "Freeze"),
            EffectKind::Stun => write!(f, "Stun"),
            EffectKind::Regen => write!(f, "Regen"),
            EffectKind::Shield => write!(f, "Shield"),
            EffectKind::Curse => write!(f, "Curse"),
        }
    }
}

/// Enemy strength tier, keys the loot tables and the flee table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyCategory {
    Weak,
    Normal,
    Elite,
    Boss,
}

impl fmt::Display for EnemyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnemyCategory::Weak => write!(f, "weak"),
            EnemyCategory::Normal => write!(f, "normal"),
            EnemyCategory::Elite => write!(f, "elite"),
            EnemyCategory::Boss => write!(f, "boss"),
        }
    }
}

/// Item drop rarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rarity::Common => write!(f, "common"),
            Rarity::Uncommon => write!(f, "uncommon"),
            Rarity::Rare => write!(f, "rare"),
            Rarity::Epic => write!(f, "epic"),
            Rarity::Legendary => write!(f, "legendary"),
        }
    }
}

/// Broad ability role, used by the AI's situational scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityKind {
    Offensive,
    Heal,
    Defensive,
    Buff,
}

/// Which combatant an ability's effect grant lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AbilityTarget {
    #[default]
    Opponent,
    #[serde(rename = "self")]
    Caster,
}
