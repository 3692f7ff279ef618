//! In-memory SaveRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use crawl_core::GameState;

use crate::repository::{RepositoryError, Result, SaveEnvelope, SaveRepository};

/// In-memory implementation of SaveRepository.
///
/// Stores the same sealed bytes a file would hold, so checksum and version
/// checks behave exactly as they do on disk.
pub struct InMemorySaveRepository {
    saves: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemorySaveRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            saves: RwLock::new(HashMap::new()),
        }
    }

    /// Stores raw bytes in `slot` without sealing them.
    pub fn insert_raw(&self, slot: &str, bytes: Vec<u8>) -> Result<()> {
        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        saves.insert(slot.to_owned(), bytes);
        Ok(())
    }

    /// The stored bytes of `slot`, if any.
    pub fn raw(&self, slot: &str) -> Result<Option<Vec<u8>>> {
        let saves = self
            .saves
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(saves.get(slot).cloned())
    }
}

impl Default for InMemorySaveRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SaveRepository for InMemorySaveRepository {
    fn save(&self, slot: &str, state: &GameState) -> Result<()> {
        let bytes = SaveEnvelope::seal(state)?.to_bytes()?;
        self.insert_raw(slot, bytes)
    }

    fn load(&self, slot: &str) -> Result<Option<GameState>> {
        match self.raw(slot)? {
            Some(bytes) => Ok(Some(SaveEnvelope::from_bytes(&bytes)?.open()?)),
            None => Ok(None),
        }
    }

    fn exists(&self, slot: &str) -> bool {
        self.saves
            .read()
            .map(|saves| saves.contains_key(slot))
            .unwrap_or(false)
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        saves.remove(slot);
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let saves = self
            .saves
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut slots: Vec<String> = saves.keys().cloned().collect();
        slots.sort_unstable();
        Ok(slots)
    }
}
