//! Repository contracts for saving and loading mutable runtime state.

use crawl_core::GameState;

use super::error::Result;

/// Repository for game state persistence and loading.
///
/// Saves are addressed by slot name. Implementations store the sealed
/// [`SaveEnvelope`](super::SaveEnvelope) and verify it on load, so a
/// corrupted save surfaces as an error instead of a partially applied state.
pub trait SaveRepository: Send + Sync {
    /// Save a game state into `slot`, replacing any previous save.
    fn save(&self, slot: &str, state: &GameState) -> Result<()>;

    /// Load the state in `slot`, or `None` if the slot is empty.
    fn load(&self, slot: &str) -> Result<Option<GameState>>;

    /// Check if a slot holds a save.
    fn exists(&self, slot: &str) -> bool;

    /// Delete a save. Deleting an empty slot is not an error.
    fn delete(&self, slot: &str) -> Result<()>;

    /// List all occupied slots.
    fn list_slots(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }
}
