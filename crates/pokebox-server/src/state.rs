//! Shared request state

use pokebox_catalog::{CatalogAggregator, CatalogClient};
use pokebox_core::{ConfigError, ServiceConfig, TokenAuthority};
use pokebox_store::{CollectionStore, KeySpace, KeyValueStore};
use std::sync::Arc;

/// Everything a handler needs, cloned into each request
#[derive(Debug, Clone)]
pub struct AppState {
    pub aggregator: CatalogAggregator,
    pub collection: CollectionStore,
    pub authority: Arc<TokenAuthority>,
    pub config: Arc<ServiceConfig>,
}

impl AppState {
    /// Assemble state from configuration and injected backends
    ///
    /// `store` must already be connected.
    pub fn from_config(
        config: ServiceConfig,
        catalog: Arc<dyn CatalogClient>,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, ConfigError> {
        let authority = TokenAuthority::from_config(&config)?;
        Ok(Self::new(config, catalog, store, authority))
    }

    /// Assemble state with an explicit token authority
    pub fn new(
        config: ServiceConfig,
        catalog: Arc<dyn CatalogClient>,
        store: Arc<dyn KeyValueStore>,
        authority: TokenAuthority,
    ) -> Self {
        let keys = KeySpace::new(config.collection_namespace.clone());
        Self {
            aggregator: CatalogAggregator::new(catalog),
            collection: CollectionStore::new(store, keys),
            authority: Arc::new(authority),
            config: Arc::new(config),
        }
    }
}
