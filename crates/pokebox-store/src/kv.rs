//! Key-value store seam

use crate::error::StoreError;
use async_trait::async_trait;

/// Flat string key-value store
///
/// The handle is shared across requests; implementations serialize their
/// own access.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Value at `key`, `None` when absent
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` at `key`, replacing any previous value
    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Remove every listed key, returning how many existed
    async fn delete(&self, keys: &[String]) -> Result<usize, StoreError>;

    /// Check if `key` is present
    async fn exists(&self, key: &str) -> Result<bool, StoreError>;

    /// All keys matching `pattern`, where `*` matches any run of characters.
    /// Order is unspecified.
    async fn keys(&self, pattern: &str) -> Result<Vec<String>, StoreError>;
}
