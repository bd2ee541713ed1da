//! Caching layer in front of the link store.
//!
//! Provides a [`CacheService`] trait with three implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`MemoryCache`] - In-process cache for single-instance deployments
//! - [`NullCache`] - No-op implementation for testing/disabled caching
//!
//! Services talk to the cache only through [`LinkCache`], which owns key
//! naming, JSON encoding and fail-open error handling.

mod link_cache;
mod memory_cache;
mod null_cache;
mod redis_cache;
mod service;

pub use link_cache::{DEFAULT_CACHE_TTL_SECONDS, LinkCache, link_key, owner_links_key};
pub use memory_cache::MemoryCache;
pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService};

#[cfg(test)]
pub(crate) use link_cache::tests::BrokenCache;
