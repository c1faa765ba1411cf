//! Per-identity collection CRUD
//!
//! Every operation takes the requesting [`Identity`] and only ever builds keys
//! under that identity's prefix. Writes are validated before they reach the
//! store; updates are merged field-by-field and the merged record is
//! validated again so a stored entry never violates the entry rules.

use crate::error::CollectionError;
use crate::keys::KeySpace;
use crate::kv::KeyValueStore;
use crate::validation::{FullEntrySchema, InsertSchema, Schema, UpdateSchema};
use pokebox_core::{CollectionEntry, Identity};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Collection store over an injected key-value handle
#[derive(Clone)]
pub struct CollectionStore {
    store: Arc<dyn KeyValueStore>,
    keys: KeySpace,
}

impl fmt::Debug for CollectionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionStore")
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

impl CollectionStore {
    /// Create store over a connected key-value handle
    pub fn new(store: Arc<dyn KeyValueStore>, keys: KeySpace) -> Self {
        Self { store, keys }
    }

    /// Get key-space
    #[inline]
    #[must_use]
    pub fn key_space(&self) -> &KeySpace {
        &self.keys
    }

    /// Ids of every entry owned by `identity`, in store order
    #[instrument(skip(self), fields(identity = %identity), level = "debug")]
    pub async fn list(&self, identity: &Identity) -> Result<Vec<String>, CollectionError> {
        let keys = self.store.keys(&self.keys.pattern(identity)).await?;
        Ok(keys
            .iter()
            .filter_map(|key| self.keys.entry_id(identity, key))
            .map(str::to_string)
            .collect())
    }

    /// Validate `payload` and store it under a fresh id
    #[instrument(skip(self, payload), fields(identity = %identity), level = "debug")]
    pub async fn create(
        &self,
        identity: &Identity,
        payload: &Value,
    ) -> Result<CollectionEntry, CollectionError> {
        let new_entry = InsertSchema.validate(payload)?;
        let entry = new_entry.into_entry(Uuid::new_v4().to_string());
        let key = self.keys.entry_key(identity, &entry.id);

        self.write(&key, &entry).await?;
        info!(%identity, id = %entry.id, pokemon_id = entry.pokemon_id, "collection entry created");
        Ok(entry)
    }

    /// Read one entry
    #[instrument(skip(self), fields(identity = %identity), level = "debug")]
    pub async fn get(
        &self,
        identity: &Identity,
        id: &str,
    ) -> Result<CollectionEntry, CollectionError> {
        let key = self.keys.entry_key(identity, id);
        let raw = self.read_raw(&key, id).await?;
        serde_json::from_str(&raw).map_err(|e| CollectionError::Corrupt {
            key,
            reason: e.to_string(),
        })
    }

    /// Merge `patch` onto an existing entry and store the result
    ///
    /// Fields present in `patch` overwrite, absent fields are kept. An empty
    /// patch returns the stored record unchanged.
    #[instrument(skip(self, patch), fields(identity = %identity), level = "debug")]
    pub async fn update(
        &self,
        identity: &Identity,
        id: &str,
        patch: &Value,
    ) -> Result<CollectionEntry, CollectionError> {
        let key = self.keys.entry_key(identity, id);
        let raw = self.read_raw(&key, id).await?;

        let mut merged: Value = serde_json::from_str(&raw).map_err(|e| CollectionError::Corrupt {
            key: key.clone(),
            reason: e.to_string(),
        })?;

        UpdateSchema.validate(patch)?;

        let (Some(target), Some(changes)) = (merged.as_object_mut(), patch.as_object()) else {
            return Err(CollectionError::Corrupt {
                key,
                reason: "stored value is not a JSON object".to_string(),
            });
        };
        for (field, value) in changes {
            target.insert(field.clone(), value.clone());
        }

        let entry = FullEntrySchema.validate(&merged)?;
        self.write(&key, &entry).await?;
        info!(%identity, id, fields = changes.len(), "collection entry updated");
        Ok(entry)
    }

    /// Remove one entry
    #[instrument(skip(self), fields(identity = %identity), level = "debug")]
    pub async fn delete(&self, identity: &Identity, id: &str) -> Result<(), CollectionError> {
        let key = self.keys.entry_key(identity, id);
        if !self.store.exists(&key).await? {
            return Err(CollectionError::NotFound(id.to_string()));
        }

        self.store.delete(&[key]).await?;
        info!(%identity, id, "collection entry deleted");
        Ok(())
    }

    /// Remove every entry owned by `identity` in one bulk delete
    #[instrument(skip(self), fields(identity = %identity), level = "debug")]
    pub async fn clear_all(&self, identity: &Identity) -> Result<(), CollectionError> {
        let keys = self.store.keys(&self.keys.pattern(identity)).await?;
        if keys.is_empty() {
            debug!(%identity, "collection already empty");
            return Ok(());
        }

        let removed = self.store.delete(&keys).await?;
        info!(%identity, removed, "collection cleared");
        Ok(())
    }

    async fn read_raw(&self, key: &str, id: &str) -> Result<String, CollectionError> {
        self.store
            .get(key)
            .await?
            .ok_or_else(|| CollectionError::NotFound(id.to_string()))
    }

    async fn write(&self, key: &str, entry: &CollectionEntry) -> Result<(), CollectionError> {
        let encoded = serde_json::to_string(entry).map_err(|e| CollectionError::Corrupt {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        self.store.set(key, encoded).await?;
        Ok(())
    }
}
