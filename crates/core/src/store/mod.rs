//! Storage provider integration.
//!
//! Everything the backend needs from the cloud file store lives here:
//!
//! - `auth` - OAuth2 refresh-token exchange for short-lived bearer tokens
//! - `client` - the four remote operations plus download and move
//! - `versioning` - freeing a submission folder name by relocating the
//!   previous occupant to a `_verK` suffix
//!
//! The provider contract (endpoint shapes, 409-as-not-found, the
//! `Dropbox-API-Arg` header, share-link URL rewriting) is depended on
//! verbatim; no retries, timeouts, or caching are layered on top.

mod auth;
mod client;
mod config;
mod error;
mod versioning;

pub use auth::TokenProvider;
pub use client::{EntryMetadata, StoreClient, raw_content_url};
pub use config::{Credentials, StoreConfig};
pub use error::StoreError;
pub use versioning::{MAX_VERSION_PROBES, resolve_folder};
