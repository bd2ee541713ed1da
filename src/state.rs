//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{LinkService, ResolutionService};
use crate::domain::identity::IdentityProvider;
use crate::infrastructure::cache::{CacheService, LinkCache};
use crate::infrastructure::metadata::HttpTitleFetcher;
use crate::infrastructure::persistence::PgLinkRepository;

#[derive(Clone)]
pub struct AppState {
    pub resolution_service: Arc<ResolutionService<PgLinkRepository>>,
    pub link_service: Arc<LinkService<PgLinkRepository, HttpTitleFetcher>>,
    pub identity: Arc<dyn IdentityProvider>,
    pub cache: Arc<dyn CacheService>,
    pub db: Arc<PgPool>,
    /// Prefix for `short_url` in responses, without a trailing slash.
    pub public_base_url: String,
}

impl AppState {
    /// Wires the services over one pool and one cache backend.
    pub fn new(
        db: Arc<PgPool>,
        cache: Arc<dyn CacheService>,
        cache_ttl_seconds: u64,
        title_fetcher: HttpTitleFetcher,
        title_fallback: Option<String>,
        identity: Arc<dyn IdentityProvider>,
        public_base_url: impl Into<String>,
    ) -> Self {
        let link_repository = Arc::new(PgLinkRepository::new(db.clone()));
        let link_cache = LinkCache::new(cache.clone(), cache_ttl_seconds);

        let resolution_service = Arc::new(ResolutionService::new(
            link_repository.clone(),
            link_cache.clone(),
        ));
        let link_service = Arc::new(
            LinkService::new(link_repository, Arc::new(title_fetcher), link_cache)
                .with_fallback_title(title_fallback),
        );

        Self {
            resolution_service,
            link_service,
            identity,
            cache,
            db,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Public short URL for `code`.
    pub fn short_url(&self, code: &str) -> String {
        self.link_service.get_short_url(&self.public_base_url, code)
    }
}
