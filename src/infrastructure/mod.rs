//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the contracts defined by the domain layer.
//!
//! # Modules
//!
//! - [`cache`] - Cache backends and the typed link cache
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`metadata`] - HTTP page title fetcher
//! - [`identity`] - JWT bearer token verification

pub mod cache;
pub mod identity;
pub mod metadata;
pub mod persistence;
