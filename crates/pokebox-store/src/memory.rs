//! In-process key-value store
//!
//! DashMap-backed implementation of [`KeyValueStore`] with an explicit
//! connect/disconnect lifecycle. The lifecycle belongs to whoever starts the
//! service; the collection logic only ever sees a connected handle.

use crate::error::StoreError;
use crate::kv::KeyValueStore;
use async_trait::async_trait;
use dashmap::DashMap;
use regex::Regex;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-memory key-value store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
    connected: AtomicBool,
}

impl MemoryStore {
    /// Create new, disconnected store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create store that is already connected
    #[inline]
    #[must_use]
    pub fn connected() -> Self {
        let store = Self::new();
        store.connect();
        store
    }

    /// Open the store for operations
    #[inline]
    pub fn connect(&self) {
        self.connected.store(true, Ordering::SeqCst);
        tracing::debug!("memory store connected");
    }

    /// Close the store; stored data is kept for a later `connect`
    #[inline]
    pub fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
        tracing::debug!("memory store disconnected");
    }

    /// Check connection state
    #[inline]
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Number of stored keys
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn ensure_connected(&self) -> Result<(), StoreError> {
        if self.is_connected() {
            Ok(())
        } else {
            Err(StoreError::Disconnected)
        }
    }
}

/// Compile a `*`-wildcard pattern; every other character is literal
pub(crate) fn pattern_regex(pattern: &str) -> Result<Regex, StoreError> {
    let body: Vec<String> = pattern.split('*').map(regex::escape).collect();
    Regex::new(&format!("^{}$", body.join(".*"))).map_err(|e| StoreError::Pattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.ensure_connected()?;
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.ensure_connected()?;
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> Result<usize, StoreError> {
        self.ensure_connected()?;
        Ok(keys
            .iter()
            .filter(|k| self.entries.remove(k.as_str()).is_some())
            .count())
    }

    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        self.ensure_connected()?;
        Ok(self.entries.contains_key(key))
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
        self.ensure_connected()?;
        let matcher = pattern_regex(pattern)?;
        Ok(self
            .entries
            .iter()
            .filter(|e| matcher.is_match(e.key()))
            .map(|e| e.key().clone())
            .collect())
    }
}
