//! Character persistence: the injected repository abstraction

use crate::character::Character;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error talking to a character store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("character {0} not found")]
    NotFound(i64),
    #[error("IO error on '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: Option<PathBuf>,
    },
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Repository of characters. The combat engine loads a character in at
/// session start and saves it back exactly once, at a terminal transition.
pub trait CharacterStore {
    fn load(&self, user_id: i64) -> Result<Character, StoreError>;
    fn save(&mut self, character: &Character) -> Result<(), StoreError>;
}

/// In-memory store for tests and ephemeral setups
#[derive(Debug, Default)]
pub struct MemoryStore {
    characters: HashMap<i64, Character>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CharacterStore for MemoryStore {
    fn load(&self, user_id: i64) -> Result<Character, StoreError> {
        self.characters
            .get(&user_id)
            .cloned()
            .ok_or(StoreError::NotFound(user_id))
    }

    fn save(&mut self, character: &Character) -> Result<(), StoreError> {
        self.characters.insert(character.user_id, character.clone());
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(flatten)]
    characters: HashMap<String, Character>,
}

/// Single-document JSON store. Each save rewrites the whole document through
/// a temp file and an atomic rename, so a failed write never leaves a
/// half-persisted file behind.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    fn read_document(&self) -> Result<StoreDocument, StoreError> {
        if !self.path.exists() {
            return Ok(StoreDocument::default());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| StoreError::Io {
            error: e,
            path: Some(self.path.clone()),
        })?;
        if content.trim().is_empty() {
            return Ok(StoreDocument::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_document(&self, document: &StoreDocument) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(document)?;
        let tmp_path = self.path.with_extension("json.tmp");
        let io_err = |error: std::io::Error, path: &Path| StoreError::Io {
            error,
            path: Some(path.to_path_buf()),
        };
        std::fs::write(&tmp_path, content).map_err(|e| io_err(e, &tmp_path))?;
        std::fs::rename(&tmp_path, &self.path).map_err(|e| io_err(e, &self.path))?;
        Ok(())
    }
}

impl CharacterStore for JsonFileStore {
    fn load(&self, user_id: i64) -> Result<Character, StoreError> {
        let document = self.read_document()?;
        document
            .characters
            .get(&user_id.to_string())
            .cloned()
            .ok_or(StoreError::NotFound(user_id))
    }

    fn save(&mut self, character: &Character) -> Result<(), StoreError> {
        let mut document = self.read_document()?;
        document
            .characters
            .insert(character.user_id.to_string(), character.clone());
        self.write_document(&document)
    }
}
