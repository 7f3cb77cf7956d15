use crate::{
    domain::Board,
    error::{KanbanError, Result},
};
use serde::{Deserialize, Serialize};

pub mod file_storage;
pub mod memory_storage;

#[cfg(target_arch = "wasm32")]
pub mod local_storage;

pub use file_storage::FileStore;
pub use memory_storage::MemoryStore;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorage;

/// Synchronous string-keyed, string-valued storage medium
pub trait KeyValueStore {
    /// Reads the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any prior value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`; removing an absent key is not an error
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Where the board snapshot lives inside the medium
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub key: String,
}

impl StoreConfig {
    const DEFAULT_KEY: &'static str = "corkboard-state";

    /// Key used by the earlier browser-only board ("trelloState")
    pub const LEGACY_KEY: &'static str = "trelloState";

    /// Reads and writes the slot the earlier browser-only board used, so its
    /// saved boards open unchanged
    pub fn legacy() -> Self {
        Self {
            key: Self::LEGACY_KEY.to_string(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            key: Self::DEFAULT_KEY.to_string(),
        }
    }
}

/// Loads and saves board snapshots under a well-known key
pub struct PersistentStore<S> {
    medium: S,
    config: StoreConfig,
}

impl<S: KeyValueStore> PersistentStore<S> {
    pub fn new(medium: S, config: StoreConfig) -> Self {
        Self { medium, config }
    }

    /// Creates a store using the default snapshot key
    pub fn with_default_key(medium: S) -> Self {
        Self::new(medium, StoreConfig::default())
    }

    pub fn medium(&self) -> &S {
        &self.medium
    }

    pub fn medium_mut(&mut self) -> &mut S {
        &mut self.medium
    }

    /// Loads the persisted board.
    ///
    /// Returns `None` when no snapshot exists, when the medium cannot be
    /// read, or when the snapshot is malformed. The last two cases are
    /// logged; the caller falls back to its seed board either way.
    pub fn load(&self) -> Option<Board> {
        let raw = match self.medium.get(&self.config.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Failed to read board snapshot '{}': {}", self.config.key, e);
                return None;
            }
        };

        match decode_snapshot(&raw) {
            Ok(board) => {
                log::info!(
                    "Loaded board snapshot ({} columns, {} cards)",
                    board.columns.len(),
                    board.card_count()
                );
                Some(board)
            }
            Err(e) => {
                log::warn!("Ignoring board snapshot '{}': {}", self.config.key, e);
                None
            }
        }
    }

    /// Serializes the board and writes it under the snapshot key
    pub fn save(&mut self, board: &Board) -> Result<()> {
        let json = serde_json::to_string(board)?;
        self.medium.set(&self.config.key, &json)
    }

    /// Removes the persisted snapshot
    pub fn clear(&mut self) -> Result<()> {
        self.medium.remove(&self.config.key)
    }
}

/// Parses and validates a snapshot, mapping every failure to `MalformedSnapshot`
pub fn decode_snapshot(raw: &str) -> Result<Board> {
    let board: Board =
        serde_json::from_str(raw).map_err(|e| KanbanError::MalformedSnapshot(e.to_string()))?;
    board.validate()?;
    Ok(board)
}
