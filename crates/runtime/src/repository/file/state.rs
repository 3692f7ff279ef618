//! File-based SaveRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use crawl_core::GameState;

use crate::repository::{RepositoryError, Result, SaveEnvelope, SaveRepository};

/// File-based implementation of SaveRepository.
///
/// Each slot is stored as `{slot}.json` holding a [`SaveEnvelope`]. Writes go
/// to a temp file first and are renamed into place, so a crash mid-write
/// leaves the previous save intact.
pub struct FileSaveRepository {
    base_dir: PathBuf,
}

impl FileSaveRepository {
    /// Create a new file-based save repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to a save file.
    ///
    /// Slot names are plain file stems: empty names, path separators and
    /// `..` are rejected so a slot can never resolve outside `base_dir`.
    pub fn save_path(&self, slot: &str) -> Result<PathBuf> {
        let invalid = slot.is_empty()
            || slot.contains(['/', '\\'])
            || slot.contains("..")
            || Path::new(slot).is_absolute();
        if invalid {
            return Err(RepositoryError::InvalidSlot(slot.to_owned()));
        }
        Ok(self.base_dir.join(format!("{}.json", slot)))
    }
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, slot: &str, state: &GameState) -> Result<()> {
        let path = self.save_path(slot)?;
        let temp_path = path.with_extension("json.tmp");

        let bytes = SaveEnvelope::seal(state)?.to_bytes()?;

        // Write to temp file
        fs::write(&temp_path, bytes)?;

        // Atomic rename
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved slot '{}' to {}", slot, path.display());

        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<GameState>> {
        let path = self.save_path(slot)?;

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let state = SaveEnvelope::from_bytes(&bytes)?.open()?;

        tracing::debug!("Loaded slot '{}' from {}", slot, path.display());

        Ok(Some(state))
    }

    fn exists(&self, slot: &str) -> bool {
        self.save_path(slot).is_ok_and(|path| path.exists())
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let path = self.save_path(slot)?;

        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted slot '{}'", slot);
        }

        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let mut slots = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(slot) = filename.strip_suffix(".json")
            {
                slots.push(slot.to_owned());
            }
        }

        slots.sort_unstable();
        Ok(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crawl_core::{BaseAttributes, Character, GameMode, MetaProgress, RunState};

    fn state() -> GameState {
        GameState {
            character: Character::new("Hero", BaseAttributes::new(5, 5, 5, 2, 2)),
            run: RunState::new(1, Vec::new()),
            meta: MetaProgress::default(),
            session: None,
            mode: GameMode::Explore,
        }
    }

    #[test]
    fn slot_names_stay_inside_the_save_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repository = FileSaveRepository::new(dir.path().join("saves")).expect("repo");

        assert_eq!(
            repository.save_path("autosave").expect("plain slot"),
            dir.path().join("saves").join("autosave.json")
        );
        for slot in ["", "../escape", "nested/slot", "..", "a\\b", "/abs"] {
            assert!(
                matches!(repository.save_path(slot), Err(RepositoryError::InvalidSlot(_))),
                "{slot:?} should be rejected"
            );
        }
    }

    #[test]
    fn invalid_slots_are_never_written() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repository = FileSaveRepository::new(dir.path().join("saves")).expect("repo");

        let err = repository
            .save("../escape", &state())
            .expect_err("escaping slot");
        assert!(matches!(err, RepositoryError::InvalidSlot(_)));
        assert!(!err.is_corruption());
        assert!(!dir.path().join("escape.json").exists());
        assert!(!repository.exists("../escape"));
        assert!(matches!(
            repository.load("../escape"),
            Err(RepositoryError::InvalidSlot(_))
        ));
    }
}
