//! Enemy definitions

use crate::types::EnemyCategory;
use serde::{Deserialize, Serialize};

/// A read-only enemy template. Session-local hp/mana/effect state is copied
/// out of this at combat start, the definition itself is never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyDef {
    pub id: String,
    pub name: String,
    pub category: EnemyCategory,
    pub hp: u32,
    pub attack: u32,
    #[serde(default)]
    pub defense: u32,
    #[serde(default)]
    pub luck: u32,
    #[serde(default)]
    pub mana: u32,
    /// Ability ids into the shared ability catalog
    #[serde(default)]
    pub abilities: Vec<String>,
    #[serde(default)]
    pub can_flee: bool,
    #[serde(default = "default_flee_threshold")]
    pub flee_threshold: f64,
    #[serde(default = "default_flee_chance")]
    pub flee_chance: f64,
    #[serde(default = "default_can_defend")]
    pub can_defend: bool,
    #[serde(default = "default_defend_threshold")]
    pub defend_threshold: f64,
    #[serde(default = "default_defend_chance")]
    pub defend_chance: f64,
    #[serde(default = "default_crit_chance")]
    pub crit_chance: f64,
    #[serde(default = "default_attack_variance")]
    pub attack_variance: f64,
}

fn default_flee_threshold() -> f64 {
    0.1
}
fn default_flee_chance() -> f64 {
    0.3
}
fn default_can_defend() -> bool {
    true
}
fn default_defend_threshold() -> f64 {
    0.2
}
fn default_defend_chance() -> f64 {
    0.4
}
fn default_crit_chance() -> f64 {
    0.05
}
fn default_attack_variance() -> f64 {
    0.1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_enemy() {
        let toml = r#"
id = "slime"
name = "Slime"
category = "weak"
hp = 20
attack = 4
"#;
        let enemy: EnemyDef = toml::from_str(toml).unwrap();
        assert_eq!(enemy.id, "slime");
        assert_eq!(enemy.category, EnemyCategory::Weak);
        assert_eq!(enemy.defense, 0);
        assert!(!enemy.can_flee);
        assert!(enemy.can_defend);
        assert!((enemy.defend_threshold - 0.2).abs() < f64::EPSILON);
        assert!((enemy.crit_chance - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_full_enemy() {
        let toml = r#"
id = "dire_wolf"
name = "Dire Wolf"
category = "elite"
hp = 120
attack = 18
defense = 6
luck = 5
mana = 30
abilities = ["savage_bite", "howl"]
can_flee = true
flee_threshold = 0.15
flee_chance = 0.25
crit_chance = 0.08
attack_variance = 0.15
"#;
        let enemy: EnemyDef = toml::from_str(toml).unwrap();
        assert_eq!(enemy.abilities, vec!["savage_bite", "howl"]);
        assert!(enemy.can_flee);
        assert!((enemy.flee_threshold - 0.15).abs() < f64::EPSILON);
    }
}
