//! Collection entry types
//!
//! `NewEntry` and `EntryPatch` are the validated forms of the create and
//! update payloads; `CollectionEntry` is what gets stored under an identity.

use serde::{Deserialize, Serialize};

/// A stored collection entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CollectionEntry {
    /// Server-generated id, immutable after creation
    pub id: String,
    /// ISO-8601 timestamp supplied by the client
    pub created_at: String,
    /// Level in `1..=100`
    pub level: u8,
    /// Where the creature was caught
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Catalog id of the referenced creature (not checked against the catalog)
    pub pokemon_id: u32,
}

/// Validated create payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub created_at: String,
    pub level: u8,
    pub location: String,
    pub notes: Option<String>,
    pub pokemon_id: u32,
}

impl NewEntry {
    /// Attach a server-generated id
    #[inline]
    #[must_use]
    pub fn into_entry(self, id: impl Into<String>) -> CollectionEntry {
        CollectionEntry {
            id: id.into(),
            created_at: self.created_at,
            level: self.level,
            location: self.location,
            notes: self.notes,
            pokemon_id: self.pokemon_id,
        }
    }
}

/// Validated partial update; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPatch {
    pub created_at: Option<String>,
    pub level: Option<u8>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub pokemon_id: Option<u32>,
}

impl EntryPatch {
    /// Check if the patch changes nothing
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.created_at.is_none()
            && self.level.is_none()
            && self.location.is_none()
            && self.notes.is_none()
            && self.pokemon_id.is_none()
    }
}
