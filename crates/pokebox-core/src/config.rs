//! Service configuration
//!
//! Loaded from an optional TOML file; every field has a default so an empty
//! file (or no file) yields a runnable configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Largest page size a listing request may ask for
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid TOML for this schema
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Value out of range or inconsistent
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// pokebox service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// Listen address for the HTTP surface
    pub bind_addr: String,
    /// Base URL of the upstream catalog API, without trailing slash
    pub catalog_base_url: String,
    /// Middle segment of collection keys
    pub collection_namespace: String,
    /// Lifetime of issued tokens
    pub token_ttl_secs: u64,
    /// Hex-encoded 32-byte ed25519 seed
    pub signing_seed_hex: Option<String>,
    /// Page size used when the listing request gives no limit
    pub default_page_limit: u32,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl ServiceConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.collection_namespace.is_empty()
            || self.collection_namespace.contains([':', '*'])
        {
            return Err(ConfigError::Invalid(format!(
                "collection_namespace {:?} must be non-empty and free of ':' and '*'",
                self.collection_namespace
            )));
        }
        if self.catalog_base_url.is_empty() {
            return Err(ConfigError::Invalid("catalog_base_url is empty".to_string()));
        }
        if self.token_ttl_secs == 0 {
            return Err(ConfigError::Invalid("token_ttl_secs must be positive".to_string()));
        }
        if !(1..=MAX_PAGE_LIMIT).contains(&self.default_page_limit) {
            return Err(ConfigError::Invalid(format!(
                "default_page_limit must be between 1 and {MAX_PAGE_LIMIT}, got {}",
                self.default_page_limit
            )));
        }
        Ok(())
    }

    /// With listen address
    #[inline]
    #[must_use]
    pub fn with_bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.bind_addr = addr.into();
        self
    }

    /// With upstream catalog base URL
    #[inline]
    #[must_use]
    pub fn with_catalog_base_url(mut self, url: impl Into<String>) -> Self {
        self.catalog_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// With collection namespace
    #[inline]
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.collection_namespace = namespace.into();
        self
    }

    /// With signing seed
    #[inline]
    #[must_use]
    pub fn with_signing_seed(mut self, seed_hex: impl Into<String>) -> Self {
        self.signing_seed_hex = Some(seed_hex.into());
        self
    }

    /// With token lifetime
    #[inline]
    #[must_use]
    pub fn with_token_ttl(mut self, secs: u64) -> Self {
        self.token_ttl_secs = secs;
        self
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            catalog_base_url: "https://pokeapi.co/api/v2".to_string(),
            collection_namespace: "box".to_string(),
            token_ttl_secs: 86_400,
            signing_seed_hex: None,
            default_page_limit: 20,
            log_filter: "info".to_string(),
        }
    }
}
