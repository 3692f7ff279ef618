//! Runtime configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration shared by the session controller and its collaborators.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Pacing delay between the player's action and the enemy's reply.
    pub turn_delay: Duration,
    pub event_buffer_size: usize,
    pub save_dir: PathBuf,
    /// Save slot used by [`GameSession::save`](crate::GameSession::save).
    pub save_slot: String,
    /// Fixed run seed; a time-derived seed is used when absent.
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            turn_delay: Duration::from_millis(600),
            event_buffer_size: 100,
            save_dir: default_save_dir(),
            save_slot: "autosave".to_owned(),
            seed: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CRAWL_TURN_DELAY_MS` - Enemy turn pacing delay (default: 600)
    /// - `CRAWL_SAVE_DIR` - Directory for save files (default: platform-specific)
    /// - `CRAWL_SAVE_SLOT` - Save slot name (default: autosave)
    /// - `CRAWL_SEED` - Fixed run seed (default: time-derived)
    /// - `CRAWL_EVENT_BUFFER` - Per-topic event buffer (default: 100)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(millis) = read_env::<u64>("CRAWL_TURN_DELAY_MS") {
            config.turn_delay = Duration::from_millis(millis);
        }

        if let Some(dir) = read_env::<PathBuf>("CRAWL_SAVE_DIR") {
            config.save_dir = dir;
        }

        if let Some(slot) = read_env::<String>("CRAWL_SAVE_SLOT")
            && !slot.is_empty()
        {
            config.save_slot = slot;
        }

        config.seed = read_env::<u64>("CRAWL_SEED");

        if let Some(capacity) = read_env::<usize>("CRAWL_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }

        config
    }
}

/// Platform-specific save directory.
///
/// - Linux: `~/.local/share/crawl/saves` (or `$XDG_DATA_HOME/crawl/saves`)
/// - macOS: `~/Library/Application Support/crawl/saves`
/// - Windows: `%APPDATA%\crawl\saves`
/// - Fallback: `./save_data`
pub fn default_save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "crawl")
        .map(|dirs| dirs.data_dir().join("saves"))
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
