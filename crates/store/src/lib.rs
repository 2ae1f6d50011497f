//! Persistent key/value settings storage.
//!
//! The gateway only needs four primitives: get, set, delete, and a prefix
//! scan. [`SettingsStore`] abstracts over them so tests can run against
//! [`MemoryStore`] while deployments use the embedded sled backend. The
//! typed [`WidgetStore`] wrapper on top owns the key scheme, the render
//! cache, and the uninstall contract.

pub mod disk;
pub mod memory;
pub mod widget_store;

pub use {disk::SledStore, memory::MemoryStore, widget_store::WidgetStore};

use async_trait::async_trait;

/// Errors from the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(#[from] sled::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// A key-value settings backend. Writes replace the whole value for a key;
/// there is no partial patching.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Get a value by key.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replace the value for a key.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Delete a value by key. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    /// List all keys with a given prefix.
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>>;
}
