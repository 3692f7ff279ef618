//! Versioned, checksummed save format.
//!
//! # File Format
//!
//! ```text
//! {"version": 1, "checksum": "<sha256 hex of payload>", "payload": "<GameState JSON>"}
//! ```
//!
//! The payload is kept as a string so the checksum covers the exact bytes that
//! were written, independent of how the outer document is formatted.

use crawl_core::GameState;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::error::{RepositoryError, Result};

pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveEnvelope {
    pub version: u32,
    pub checksum: String,
    pub payload: String,
}

impl SaveEnvelope {
    /// Serializes `state` and stamps it with the current version and checksum.
    pub fn seal(state: &GameState) -> Result<Self> {
        let payload = serde_json::to_string(state)?;
        Ok(Self {
            version: SAVE_VERSION,
            checksum: checksum(&payload),
            payload,
        })
    }

    /// Verifies version and checksum, then decodes the state.
    pub fn open(&self) -> Result<GameState> {
        if self.version == 0 || self.version > SAVE_VERSION {
            return Err(RepositoryError::UnsupportedVersion {
                found: self.version,
                current: SAVE_VERSION,
            });
        }

        let actual = checksum(&self.payload);
        if actual != self.checksum {
            return Err(RepositoryError::ChecksumMismatch {
                expected: self.checksum.clone(),
                actual,
            });
        }

        Ok(serde_json::from_str(&self.payload)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(RepositoryError::CorruptedData("empty save file".to_owned()));
        }
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Hex-encoded SHA-256 of `payload`.
pub fn checksum(payload: &str) -> String {
    hex::encode(Sha256::digest(payload.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crawl_core::{BaseAttributes, Character, GameMode, MetaProgress, RunState};

    fn state() -> GameState {
        GameState {
            character: Character::new("Tester", BaseAttributes::new(4, 4, 4, 1, 1)),
            run: RunState::new(99, Vec::new()),
            meta: MetaProgress::default(),
            session: None,
            mode: GameMode::Explore,
        }
    }

    #[test]
    fn sealed_state_opens_unchanged() {
        let envelope = SaveEnvelope::seal(&state()).unwrap();
        assert_eq!(envelope.version, SAVE_VERSION);
        assert_eq!(envelope.checksum.len(), 64);

        let bytes = envelope.to_bytes().unwrap();
        let reopened = SaveEnvelope::from_bytes(&bytes).unwrap().open().unwrap();
        assert_eq!(reopened, state());
    }

    #[test]
    fn tampered_payload_fails_the_checksum() {
        let mut envelope = SaveEnvelope::seal(&state()).unwrap();
        envelope.payload = envelope.payload.replace("Tester", "Cheater");

        let err = envelope.open().unwrap_err();
        assert!(matches!(err, RepositoryError::ChecksumMismatch { .. }));
        assert!(err.is_corruption());
    }

    #[test]
    fn future_versions_are_rejected() {
        let mut envelope = SaveEnvelope::seal(&state()).unwrap();
        envelope.version = SAVE_VERSION + 1;

        assert!(matches!(
            envelope.open(),
            Err(RepositoryError::UnsupportedVersion { found: 2, current: 1 })
        ));
    }

    #[test]
    fn empty_and_garbage_bytes_are_corruption() {
        assert!(SaveEnvelope::from_bytes(b"").unwrap_err().is_corruption());
        assert!(SaveEnvelope::from_bytes(b"{not json").unwrap_err().is_corruption());
    }
}
