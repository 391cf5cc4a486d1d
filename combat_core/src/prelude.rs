//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Core types
pub use crate::character::Character;
pub use crate::stats::Stats;

// Combat
pub use crate::resolver::{
    CombatResolver, CombatRewards, DefeatPenalty, PlayerAction, TerminalResult, TurnOutcome,
};
pub use crate::session::{MenuPhase, StatusSnapshot};

// Effects
pub use crate::effect::{ActiveEffect, EffectSummary};

// Persistence
pub use crate::store::{CharacterStore, JsonFileStore, MemoryStore};

// Errors
pub use crate::CombatError;

// Re-exports from content_core
pub use content_core::{ContentCatalog, EffectKind, EnemyCategory, Rarity, StatKind};
