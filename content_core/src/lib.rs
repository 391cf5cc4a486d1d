//! content_core - Static game content catalog
//!
//! This library provides:
//! - ContentCatalog: enemy, ability and item definitions plus loot tables,
//!   loaded once at startup from TOML files and read-only thereafter
//! - Shared closed enums (StatKind, EffectKind, EnemyCategory, Rarity)
//!   used by the combat engine
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use content_core::ContentCatalog;
//! use std::path::Path;
//!
//! let catalog = ContentCatalog::load(Path::new("content/"))?;
//! let wolf = catalog.enemy("wolf").unwrap();
//! println!("{} has {} hp", wolf.name, wolf.hp);
//! ```

mod ability;
mod catalog;
mod enemy;
mod item;
mod loot;
mod types;

pub use ability::AbilityDef;
pub use catalog::{ContentCatalog, ModifierSet};
pub use enemy::EnemyDef;
pub use item::ItemDef;
pub use loot::{DropDef, LootTable, RangeConfig};
pub use types::{AbilityKind, AbilityTarget, EffectKind, EnemyCategory, Rarity, StatKind};

use std::path::PathBuf;
use thiserror::Error;

/// Error loading static content. Raised only at load time; a catalog that
/// loaded successfully never fails at lookup.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: Option<PathBuf>,
    },
    #[error("Parse error in '{path}': {error}")]
    Parse {
        error: toml::de::Error,
        path: PathBuf,
    },
    #[error("Validation error in '{path}': {message}")]
    Validation { message: String, path: PathBuf },
}
