//! pokebox Server
//!
//! HTTP surface over the catalog aggregator and the collection store.
//!
//! # Routes
//!
//! ```text
//! GET    /pokemon/{name}           one composite creature
//! GET    /pokemon?offset=&limit=   a page of composite creatures
//! POST   /auth/token               issue a bearer token for a username
//! GET    /box                      ids in the caller's collection
//! POST   /box                      create an entry (201)
//! DELETE /box                      clear the caller's collection (204)
//! GET    /box/{id}                 read an entry
//! PUT    /box/{id}                 partially update an entry
//! DELETE /box/{id}                 remove an entry (204)
//! ```
//!
//! Every `/box` route requires `Authorization: Bearer <token>`. Every failure,
//! including warp's own rejections, is answered with an
//! [`ErrorBody`](pokebox_core::ErrorBody).

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod filters;
pub mod handlers;
pub mod reply;
pub mod state;

pub use filters::routes;
pub use state::AppState;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
