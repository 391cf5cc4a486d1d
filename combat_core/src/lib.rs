//! combat_core - Turn-based combat engine
//!
//! This library provides:
//! - CombatResolver: the round state machine driving one combat per user
//! - Effect processing, enemy AI, loot rolls and level progression
//! - Character model plus the CharacterStore repository abstraction
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use combat_core::{Character, CombatResolver, PlayerAction, TurnOutcome};
//! use combat_core::store::JsonFileStore;
//! use content_core::ContentCatalog;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(ContentCatalog::load(Path::new("content/"))?);
//! let store = JsonFileStore::new("characters.json");
//! let mut resolver = CombatResolver::new(catalog, store);
//!
//! let user_id = character.user_id;
//! let snapshot = resolver.start_combat(character, "dire_wolf")?;
//! match resolver.resolve_turn(user_id, PlayerAction::Attack)? {
//!     TurnOutcome::Continued { log, snapshot } => render(log, snapshot),
//!     TurnOutcome::Ended { log, result } => announce(log, result),
//! }
//! ```

pub mod ai;
pub mod character;
pub mod damage;
pub mod effect;
pub mod loot;
pub mod prelude;
pub mod progression;
pub mod resolver;
pub mod session;
pub mod stats;
pub mod store;

pub use character::Character;
pub use effect::{ActiveEffect, EffectSummary};
pub use loot::{ItemDrop, LootResult};
pub use resolver::{
    ActionRejection, CombatResolver, CombatRewards, DefeatPenalty, PlayerAction, TerminalResult,
    TurnOutcome,
};
pub use session::{MenuPhase, StatusSnapshot};
pub use stats::Stats;
pub use store::{CharacterStore, JsonFileStore, MemoryStore, StoreError};

use thiserror::Error;

/// Error resolving a combat request. Recoverable player-input problems never
/// appear here; they become event-log lines and the round completes.
#[derive(Debug, Error)]
pub enum CombatError {
    #[error("enemy '{0}' not found")]
    UnknownEnemy(String),
    #[error("invalid combat state: {0}")]
    InvalidState(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
