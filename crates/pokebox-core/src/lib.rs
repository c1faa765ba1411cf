//! pokebox Core
//!
//! Shared vocabulary for the pokebox service:
//! - Composite creature types produced by the catalog aggregator
//! - Collection entries owned by a single identity
//! - Bearer-token identity issuance and verification
//! - Service configuration
//! - The request-boundary error taxonomy
//!
//! # Example
//!
//! ```rust,ignore
//! use pokebox_core::{Identity, ServiceConfig, TokenAuthority};
//!
//! let config = ServiceConfig::new();
//! let authority = TokenAuthority::from_config(&config)?;
//!
//! let token = authority.issue(&Identity::new("ash")?);
//! let identity = authority.verify(Some(&format!("Bearer {token}")))?;
//! assert_eq!(identity.as_str(), "ash");
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod auth;
pub mod config;
pub mod creature;
pub mod entry;
pub mod error;

// Re-exports for convenience
pub use auth::{AuthError, Claims, Identity, TokenAuthority};
pub use config::{ConfigError, ServiceConfig, MAX_PAGE_LIMIT};
pub use creature::{Ability, Creature, Element, Sprites, Stats};
pub use entry::{CollectionEntry, EntryPatch, NewEntry};
pub use error::{ApiError, ErrorBody, ErrorKind, FieldError, FieldErrors};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with pokebox types
    pub use crate::{
        ApiError, CollectionEntry, Creature, Element, FieldError, Identity, ServiceConfig,
        TokenAuthority,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
