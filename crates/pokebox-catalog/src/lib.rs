//! pokebox Catalog
//!
//! Builds composite creature records out of the upstream catalog API.
//!
//! # Architecture
//!
//! ```text
//!                   ┌── pokemon(name) ──┐
//! fetch_creature ───┤                   ├── merge ──→ Creature
//!                   └── species(name) ──┘     ↑
//!                                             └── move_record(m) × ≤10 (failures dropped)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use pokebox_catalog::{CatalogAggregator, HttpCatalog};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpCatalog::new("https://pokeapi.co/api/v2")?;
//! let aggregator = CatalogAggregator::new(Arc::new(client));
//!
//! let pikachu = aggregator.fetch_creature("pikachu").await?;
//! println!("{} knows {} moves", pikachu.name, pikachu.abilities.len());
//! # Ok(())
//! # }
//! ```

#![allow(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod aggregator;
pub mod client;
pub mod colors;
pub mod error;
pub mod http;
pub mod records;

// Re-exports for convenience
pub use aggregator::{CatalogAggregator, DESCRIPTION_PLACEHOLDER, MOVE_CANDIDATE_LIMIT};
pub use client::CatalogClient;
pub use colors::{element, resolve, FALLBACK_COLOR};
pub use error::CatalogError;
pub use http::HttpCatalog;
pub use records::{MoveRecord, PokemonRecord, SpeciesRecord};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the catalog
    pub use crate::aggregator::{CatalogAggregator, DESCRIPTION_PLACEHOLDER, MOVE_CANDIDATE_LIMIT};
    pub use crate::client::CatalogClient;
    pub use crate::colors::resolve;
    pub use crate::error::CatalogError;
    pub use crate::records::{MoveRecord, PokemonRecord, SpeciesRecord};
    pub use pokebox_core::{ApiError, Creature, ErrorKind};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
