//! Pluggable key-value persistence
//!
//! The controller talks to storage through [`KeyValueStore`] so that a
//! browser-local store, a file on disk, or an in-memory stub can back it
//! interchangeably. Test environments inject [`MemoryStore`].

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in a key-value store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// Minimal string key-value store contract
pub trait KeyValueStore {
    /// Read the value under `key`, `None` if absent
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write `value` under `key`, overwriting any prior value
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete the value under `key`. Deleting an absent key is not an error.
    fn remove(&mut self, key: &str) -> StoreResult<()>;

    /// Whether a value exists under `key`
    fn contains(&self, key: &str) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}
