//! The content catalog: all static game data, loaded once at startup

use crate::ability::AbilityDef;
use crate::enemy::EnemyDef;
use crate::item::ItemDef;
use crate::loot::LootTable;
use crate::types::{EnemyCategory, StatKind};
use crate::ContentError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// A named set of stat deltas (a race or a class)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierSet {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub modifiers: BTreeMap<StatKind, i32>,
}

#[derive(Debug, Deserialize)]
struct EnemiesFile {
    #[serde(default)]
    enemies: Vec<EnemyDef>,
}

#[derive(Debug, Deserialize)]
struct AbilitiesFile {
    #[serde(default)]
    abilities: Vec<AbilityDef>,
}

#[derive(Debug, Deserialize)]
struct ItemsFile {
    #[serde(default)]
    items: Vec<ItemDef>,
}

#[derive(Debug, Deserialize)]
struct LootFile {
    #[serde(default)]
    tables: Vec<LootTable>,
}

#[derive(Debug, Deserialize)]
struct ModifiersFile {
    #[serde(default)]
    sets: Vec<ModifierSet>,
}

/// Registry of all static content, read-only after load
#[derive(Debug, Default)]
pub struct ContentCatalog {
    enemies: HashMap<String, EnemyDef>,
    abilities: HashMap<String, AbilityDef>,
    items: HashMap<String, ItemDef>,
    loot_tables: HashMap<EnemyCategory, LootTable>,
    races: HashMap<String, ModifierSet>,
    classes: HashMap<String, ModifierSet>,
}

impl ContentCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load all content files from a directory and validate cross-references.
    ///
    /// A missing file leaves its section empty; a malformed or inconsistent
    /// file fails the whole load.
    pub fn load(dir: &Path) -> Result<Self, ContentError> {
        let mut catalog = Self::new();

        if let Some(file) = load_toml_opt::<EnemiesFile>(&dir.join("enemies.toml"))? {
            for enemy in file.enemies {
                catalog.add_enemy(enemy);
            }
        }
        if let Some(file) = load_toml_opt::<AbilitiesFile>(&dir.join("abilities.toml"))? {
            for ability in file.abilities {
                catalog.add_ability(ability);
            }
        }
        if let Some(file) = load_toml_opt::<ItemsFile>(&dir.join("items.toml"))? {
            for item in file.items {
                catalog.add_item(item);
            }
        }
        if let Some(file) = load_toml_opt::<LootFile>(&dir.join("loot_tables.toml"))? {
            for table in file.tables {
                catalog.add_loot_table(table);
            }
        }
        if let Some(file) = load_toml_opt::<ModifiersFile>(&dir.join("races.toml"))? {
            for set in file.sets {
                catalog.add_race(set);
            }
        }
        if let Some(file) = load_toml_opt::<ModifiersFile>(&dir.join("classes.toml"))? {
            for set in file.sets {
                catalog.add_class(set);
            }
        }

        catalog.validate(dir)?;
        Ok(catalog)
    }

    /// Register an enemy definition
    pub fn add_enemy(&mut self, enemy: EnemyDef) {
        self.enemies.insert(enemy.id.clone(), enemy);
    }

    /// Register an ability definition
    pub fn add_ability(&mut self, ability: AbilityDef) {
        self.abilities.insert(ability.name.clone(), ability);
    }

    /// Register an item definition
    pub fn add_item(&mut self, item: ItemDef) {
        self.items.insert(item.id.clone(), item);
    }

    /// Register a loot table for its category
    pub fn add_loot_table(&mut self, table: LootTable) {
        self.loot_tables.insert(table.category, table);
    }

    /// Register a race modifier set
    pub fn add_race(&mut self, set: ModifierSet) {
        self.races.insert(set.id.clone(), set);
    }

    /// Register a class modifier set
    pub fn add_class(&mut self, set: ModifierSet) {
        self.classes.insert(set.id.clone(), set);
    }

    pub fn enemy(&self, id: &str) -> Option<&EnemyDef> {
        self.enemies.get(id)
    }

    pub fn ability(&self, name: &str) -> Option<&AbilityDef> {
        self.abilities.get(name)
    }

    pub fn item(&self, id: &str) -> Option<&ItemDef> {
        self.items.get(id)
    }

    pub fn loot_table(&self, category: EnemyCategory) -> Option<&LootTable> {
        self.loot_tables.get(&category)
    }

    pub fn race(&self, id: &str) -> Option<&ModifierSet> {
        self.races.get(id)
    }

    pub fn class(&self, id: &str) -> Option<&ModifierSet> {
        self.classes.get(id)
    }

    pub fn enemy_ids(&self) -> impl Iterator<Item = &str> {
        self.enemies.keys().map(|s| s.as_str())
    }

    /// Check cross-references and value ranges. Every problem found here
    /// would otherwise surface mid-combat.
    fn validate(&self, dir: &Path) -> Result<(), ContentError> {
        let fail = |file: &str, message: String| {
            Err(ContentError::Validation {
                message,
                path: dir.join(file),
            })
        };

        for enemy in self.enemies.values() {
            for ability_name in &enemy.abilities {
                if !self.abilities.contains_key(ability_name) {
                    return fail(
                        "enemies.toml",
                        format!(
                            "enemy '{}' references unknown ability '{}'",
                            enemy.id, ability_name
                        ),
                    );
                }
            }
            if enemy.hp == 0 {
                return fail("enemies.toml", format!("enemy '{}' has zero hp", enemy.id));
            }
        }

        for table in self.loot_tables.values() {
            if table.gold_range.min() > table.gold_range.max() {
                return fail(
                    "loot_tables.toml",
                    format!("table '{}' has inverted gold_range", table.category),
                );
            }
            if table.xp_range.min() > table.xp_range.max() {
                return fail(
                    "loot_tables.toml",
                    format!("table '{}' has inverted xp_range", table.category),
                );
            }
            for drop in &table.drops {
                if !self.items.contains_key(&drop.item_id) {
                    return fail(
                        "loot_tables.toml",
                        format!(
                            "table '{}' drops unknown item '{}'",
                            table.category, drop.item_id
                        ),
                    );
                }
                if drop.chance < 0.0 {
                    return fail(
                        "loot_tables.toml",
                        format!(
                            "table '{}' has negative chance for '{}'",
                            table.category, drop.item_id
                        ),
                    );
                }
            }
        }

        Ok(())
    }
}

/// Load a TOML file, returning None if it does not exist
fn load_toml_opt<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ContentError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path).map_err(|e| ContentError::Io {
        error: e,
        path: Some(path.to_path_buf()),
    })?;
    let parsed = toml::from_str(&content).map_err(|e| ContentError::Parse {
        error: e,
        path: path.to_path_buf(),
    })?;
    Ok(Some(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &str) {
        let mut file = std::fs::File::create(dir.join(name)).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn test_load_empty_dir() {
        let dir = TempDir::new().unwrap();
        let catalog = ContentCatalog::load(dir.path()).unwrap();
        assert!(catalog.enemy("anything").is_none());
    }

    #[test]
    fn test_load_catalog() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "abilities.toml",
            r#"
[[abilities]]
name = "heal"
kind = "heal"
mana_cost = 15
heal_amount = 25
target = "self"
"#,
        );
        write_file(
            dir.path(),
            "enemies.toml",
            r#"
[[enemies]]
id = "goblin"
name = "Goblin"
category = "weak"
hp = 30
attack = 6
mana = 20
abilities = ["heal"]
"#,
        );
        write_file(
            dir.path(),
            "items.toml",
            r#"
[[items]]
id = "rusty_dagger"
name = "Rusty Dagger"
slot = "weapon"

[items.stats]
attack = 2
"#,
        );
        write_file(
            dir.path(),
            "loot_tables.toml",
            r#"
[[tables]]
category = "weak"
gold_range = [1, 5]
xp_range = [5, 10]

[[tables.drops]]
item_id = "rusty_dagger"
chance = 10.0
"#,
        );

        let catalog = ContentCatalog::load(dir.path()).unwrap();
        assert_eq!(catalog.enemy("goblin").unwrap().abilities, vec!["heal"]);
        assert!(catalog.ability("heal").is_some());
        assert!(catalog.loot_table(EnemyCategory::Weak).is_some());
        assert!(catalog.loot_table(EnemyCategory::Boss).is_none());
    }

    #[test]
    fn test_unknown_ability_reference_fails() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "enemies.toml",
            r#"
[[enemies]]
id = "goblin"
name = "Goblin"
category = "weak"
hp = 30
attack = 6
abilities = ["no_such_ability"]
"#,
        );

        let err = ContentCatalog::load(dir.path()).unwrap_err();
        assert!(matches!(err, ContentError::Validation { .. }));
    }

    #[test]
    fn test_unknown_drop_item_fails() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "loot_tables.toml",
            r#"
[[tables]]
category = "weak"
gold_range = [1, 5]
xp_range = [1, 5]

[[tables.drops]]
item_id = "ghost_item"
chance = 10.0
"#,
        );

        let err = ContentCatalog::load(dir.path()).unwrap_err();
        assert!(matches!(err, ContentError::Validation { .. }));
    }

    #[test]
    fn test_malformed_toml_fails() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "enemies.toml", "this is not toml [");

        let err = ContentCatalog::load(dir.path()).unwrap_err();
        assert!(matches!(err, ContentError::Parse { .. }));
    }

    #[test]
    fn test_inverted_range_fails() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "loot_tables.toml",
            r#"
[[tables]]
category = "boss"
gold_range = [100, 10]
xp_range = [1, 5]
"#,
        );

        let err = ContentCatalog::load(dir.path()).unwrap_err();
        assert!(matches!(err, ContentError::Validation { .. }));
    }

    #[test]
    fn test_shipped_content_loads() {
        let dir = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../content"));
        let catalog = ContentCatalog::load(dir).unwrap();

        assert!(catalog.enemy("forest_slime").is_some());
        assert!(catalog.enemy("ember_drake").is_some());
        assert!(catalog.ability("fireball").is_some());
        assert!(catalog.item("small_healing_potion").is_some());
        for category in [
            EnemyCategory::Weak,
            EnemyCategory::Normal,
            EnemyCategory::Elite,
            EnemyCategory::Boss,
        ] {
            assert!(catalog.loot_table(category).is_some(), "{category}");
        }
        assert!(catalog.race("elf").is_some());
        assert!(catalog.class("mage").is_some());
    }

    #[test]
    fn test_modifier_sets() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "races.toml",
            r#"
[[sets]]
id = "elf"
name = "Elf"

[sets.modifiers]
agility = 3
attack = -1
"#,
        );

        let catalog = ContentCatalog::load(dir.path()).unwrap();
        let elf = catalog.race("elf").unwrap();
        assert_eq!(elf.modifiers[&StatKind::Agility], 3);
        assert_eq!(elf.modifiers[&StatKind::Attack], -1);
    }
}
