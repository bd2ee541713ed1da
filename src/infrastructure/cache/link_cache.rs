//! Typed view of the cache for link records.
//!
//! Two derived views are kept:
//!
//! - `link:{short_code}` - one serialized [`Link`]
//! - `user:{owner_id}:links` - the owner's serialized link list
//!
//! Both expire after the configured TTL. Every backend failure is logged and
//! absorbed here: reads degrade to a miss and writes to a no-op, so a broken
//! cache never fails a request.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::service::CacheService;
use crate::domain::entities::Link;

/// Default lifetime of a cached view, in seconds.
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 1800;

/// Key of the single-link view.
pub fn link_key(short_code: &str) -> String {
    format!("link:{short_code}")
}

/// Key of the owner's link-list view.
pub fn owner_links_key(owner_id: i64) -> String {
    format!("user:{owner_id}:links")
}

/// JSON-serializing, fail-open façade over a [`CacheService`].
#[derive(Clone)]
pub struct LinkCache {
    backend: Arc<dyn CacheService>,
    ttl_seconds: u64,
}

impl LinkCache {
    pub fn new(backend: Arc<dyn CacheService>, ttl_seconds: u64) -> Self {
        Self {
            backend,
            ttl_seconds,
        }
    }

    pub async fn get_link(&self, short_code: &str) -> Option<Link> {
        self.get_json(&link_key(short_code)).await
    }

    /// Writes the record under its short code with a fresh TTL.
    pub async fn put_link(&self, link: &Link) {
        self.put_json(&link_key(&link.short_code), link).await;
    }

    pub async fn invalidate_link(&self, short_code: &str) {
        self.delete(&link_key(short_code)).await;
    }

    pub async fn get_owner_links(&self, owner_id: i64) -> Option<Vec<Link>> {
        self.get_json(&owner_links_key(owner_id)).await
    }

    pub async fn put_owner_links(&self, owner_id: i64, links: &[Link]) {
        self.put_json(&owner_links_key(owner_id), links).await;
    }

    pub async fn invalidate_owner_links(&self, owner_id: i64) {
        self.delete(&owner_links_key(owner_id)).await;
    }

    async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, key, "Cache read failed, falling back to store");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(error = %e, key, "Discarding undecodable cache entry");
                self.delete(key).await;
                None
            }
        }
    }

    async fn put_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, key, "Failed to serialize cache entry");
                return;
            }
        };

        if let Err(e) = self.backend.set(key, &raw, self.ttl_seconds).await {
            warn!(error = %e, key, "Cache write failed");
        }
    }

    async fn delete(&self, key: &str) {
        match self.backend.delete(key).await {
            Ok(()) => debug!(key, "Cache entry invalidated"),
            Err(e) => warn!(error = %e, key, "Cache invalidation failed"),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::infrastructure::cache::{CacheError, CacheResult, MemoryCache};
    use async_trait::async_trait;
    use chrono::Utc;

    /// Backend whose every operation fails, as if Redis were down.
    pub(crate) struct BrokenCache;

    #[async_trait]
    impl CacheService for BrokenCache {
        async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
            Err(CacheError::ConnectionError("connection refused".into()))
        }

        async fn set(&self, _key: &str, _value: &str, _ttl: u64) -> CacheResult<()> {
            Err(CacheError::ConnectionError("connection refused".into()))
        }

        async fn delete(&self, _key: &str) -> CacheResult<()> {
            Err(CacheError::ConnectionError("connection refused".into()))
        }

        async fn health_check(&self) -> bool {
            false
        }

        fn backend_name(&self) -> &'static str {
            "broken"
        }
    }

    fn link(code: &str, owner_id: Option<i64>) -> Link {
        Link::new(
            1,
            code.to_string(),
            code.to_string(),
            "Title".to_string(),
            "https://example.com/".to_string(),
            owner_id,
            Utc::now(),
            3,
        )
    }

    fn memory_cache() -> (LinkCache, Arc<MemoryCache>) {
        let backend = Arc::new(MemoryCache::new(100));
        (LinkCache::new(backend.clone(), 60), backend)
    }

    #[test]
    fn test_key_layout() {
        assert_eq!(link_key("Ab3xQ9"), "link:Ab3xQ9");
        assert_eq!(owner_links_key(42), "user:42:links");
    }

    #[tokio::test]
    async fn test_link_round_trip_and_invalidate() {
        let (cache, _) = memory_cache();
        let stored = link("Ab3xQ9", Some(1));

        cache.put_link(&stored).await;
        assert_eq!(cache.get_link("Ab3xQ9").await, Some(stored));

        cache.invalidate_link("Ab3xQ9").await;
        assert!(cache.get_link("Ab3xQ9").await.is_none());
    }

    #[tokio::test]
    async fn test_owner_links_round_trip() {
        let (cache, _) = memory_cache();
        let links = vec![link("aaaaaa", Some(5)), link("bbbbbb", Some(5))];

        cache.put_owner_links(5, &links).await;
        assert_eq!(cache.get_owner_links(5).await, Some(links));
        assert!(cache.get_owner_links(6).await.is_none());

        cache.invalidate_owner_links(5).await;
        assert!(cache.get_owner_links(5).await.is_none());
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_dropped() {
        let (cache, backend) = memory_cache();
        backend.set("link:junk00", "not json", 60).await.unwrap();

        assert!(cache.get_link("junk00").await.is_none());
        assert!(backend.get("link:junk00").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_broken_backend_degrades_silently() {
        let cache = LinkCache::new(Arc::new(BrokenCache), 60);

        cache.put_link(&link("Ab3xQ9", None)).await;
        assert!(cache.get_link("Ab3xQ9").await.is_none());
        cache.invalidate_link("Ab3xQ9").await;
        cache.invalidate_owner_links(1).await;
        assert!(cache.get_owner_links(1).await.is_none());
    }
}
