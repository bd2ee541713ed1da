//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),

    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Key-value store with per-key expiry.
///
/// Values are opaque strings; serialization is the caller's concern (see
/// [`crate::infrastructure::cache::LinkCache`]). A cache is never
/// authoritative: every miss or error must fall back to the link store.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis `SET EX` / `GET` / `DEL`
/// - [`crate::infrastructure::cache::MemoryCache`] - in-process `moka` cache
/// - [`crate::infrastructure::cache::NullCache`] - always misses
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the value stored under `key`, or `None` on miss or expiry.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores `value` under `key` for `ttl_seconds`, replacing any previous value
    /// and restarting its expiry.
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()>;

    /// Removes `key`. Deleting a missing key succeeds.
    async fn delete(&self, key: &str) -> CacheResult<()>;

    /// Checks if the cache backend is reachable.
    async fn health_check(&self) -> bool;

    /// Short backend name for logs and health output.
    fn backend_name(&self) -> &'static str;
}
