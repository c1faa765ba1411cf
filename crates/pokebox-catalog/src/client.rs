//! Upstream catalog seam

use crate::error::CatalogError;
use crate::records::{MoveRecord, PokemonRecord, SpeciesRecord};
use async_trait::async_trait;

/// Access to the upstream creature catalog
///
/// Implementations must be safe to share across concurrent requests; the
/// aggregator issues many calls in parallel against one instance.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Base creature record by canonical name
    async fn pokemon(&self, name: &str) -> Result<PokemonRecord, CatalogError>;

    /// Species record by canonical name
    async fn species(&self, name: &str) -> Result<SpeciesRecord, CatalogError>;

    /// Move record by canonical move name
    async fn move_record(&self, name: &str) -> Result<MoveRecord, CatalogError>;

    /// `limit` canonical creature names starting at `offset`
    async fn page(&self, offset: u32, limit: u32) -> Result<Vec<String>, CatalogError>;
}
