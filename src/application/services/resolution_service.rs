//! Short code resolution and owner-facing reads.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::LinkCache;

fn link_not_found(code: &str) -> AppError {
    AppError::not_found("Link not found", json!({ "code": code }))
}

/// Resolves short codes to destinations and serves owner link lookups.
///
/// The redirect path reads the store directly because it mutates the click
/// counter; the cache is only written afterwards. Owner lookups are
/// cache-first.
pub struct ResolutionService<L: LinkRepository> {
    link_repository: Arc<L>,
    cache: LinkCache,
}

impl<L: LinkRepository> ResolutionService<L> {
    pub fn new(link_repository: Arc<L>, cache: LinkCache) -> Self {
        Self {
            link_repository,
            cache,
        }
    }

    /// Returns the destination for `code` and records one click.
    ///
    /// # Flow
    ///
    /// 1. Read the record from the store
    /// 2. Atomically increment its click counter in the store
    /// 3. Write the updated record through to `link:{code}`
    /// 4. Drop the owner's `user:{id}:links` view, whose counts are now stale
    ///
    /// Concurrent resolutions may overwrite `link:{code}` in any order; each
    /// write carries the counter as it stood after that request's increment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this code, including
    /// when it is deleted between the read and the increment.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let link = self
            .link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| link_not_found(code))?;

        let link = match self.link_repository.increment_clicks(link.id).await {
            Ok(updated) => updated,
            Err(AppError::NotFound { .. }) => return Err(link_not_found(code)),
            Err(e) => return Err(e),
        };

        self.cache.put_link(&link).await;
        if let Some(owner_id) = link.owner_id {
            self.cache.invalidate_owner_links(owner_id).await;
        }

        debug!(code, clicks = link.clicks, "Resolved short code");
        Ok(link.original_url)
    }

    /// Returns the owner's link with short code `code`.
    ///
    /// A cached record owned by someone else is answered with NotFound rather
    /// than a store lookup, so another owner's link never leaks through.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the owner has no link with this code.
    pub async fn get_link_for_owner(&self, owner_id: i64, code: &str) -> Result<Link, AppError> {
        if let Some(cached) = self.cache.get_link(code).await {
            if cached.is_owned_by(owner_id) {
                return Ok(cached);
            }
            return Err(link_not_found(code));
        }

        let link = self
            .link_repository
            .find_by_code_for_owner(code, owner_id)
            .await?
            .ok_or_else(|| link_not_found(code))?;

        self.cache.put_link(&link).await;
        Ok(link)
    }

    /// Returns all of the owner's links, newest first.
    pub async fn list_links_for_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError> {
        if let Some(links) = self.cache.get_owner_links(owner_id).await {
            return Ok(links);
        }

        let links = self.link_repository.list_by_owner(owner_id).await?;
        self.cache.put_owner_links(owner_id, &links).await;
        Ok(links)
    }
}
