//! Repository layer for dynamic runtime data.
//!
//! Repositories handle data that CHANGES during gameplay: the saved
//! [`GameState`](crawl_core::GameState) of a run. Static game content (items,
//! skills, enemies) is handled by oracles, not repositories.

mod envelope;
mod error;
mod file;
mod memory;
mod traits;

pub use envelope::{SAVE_VERSION, SaveEnvelope, checksum};
pub use error::{RepositoryError, Result};
pub use file::FileSaveRepository;
pub use memory::InMemorySaveRepository;
pub use traits::SaveRepository;
