//! pokebox Store
//!
//! Per-identity collection ("box") storage over a flat key-value store.
//!
//! # Key-space
//!
//! ```text
//! <identity>:<namespace>:<entry id>   one JSON-encoded entry per key
//! <identity>:<namespace>:*            listing / bulk-clear pattern
//! ```
//!
//! Identities cannot contain `:` or `*`, so two identities never share a
//! prefix and a request can only ever reach keys under its own identity.
//!
//! # Example
//!
//! ```rust,ignore
//! use pokebox_store::{CollectionStore, KeySpace, MemoryStore};
//! use std::sync::Arc;
//!
//! # async fn example(identity: pokebox_core::Identity) -> Result<(), Box<dyn std::error::Error>> {
//! let kv = Arc::new(MemoryStore::new());
//! kv.connect();
//!
//! let collection = CollectionStore::new(kv, KeySpace::default());
//! let entry = collection.create(&identity, &payload).await?;
//! assert_eq!(collection.list(&identity).await?, vec![entry.id.clone()]);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod collection;
pub mod error;
pub mod keys;
pub mod kv;
pub mod memory;
pub mod validation;

// Re-exports for convenience
pub use collection::CollectionStore;
pub use error::{CollectionError, StoreError};
pub use keys::KeySpace;
pub use kv::KeyValueStore;
pub use memory::MemoryStore;
pub use validation::{FullEntrySchema, InsertSchema, Schema, UpdateSchema};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the collection store
    pub use crate::{
        CollectionError, CollectionStore, KeySpace, KeyValueStore, MemoryStore, Schema, StoreError,
    };
    pub use pokebox_core::{ApiError, CollectionEntry, ErrorKind, Identity};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
