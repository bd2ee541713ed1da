//! Link creation, update and deletion.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use crate::domain::entities::{Link, LinkPatch, LinkSelector, NewLink};
use crate::domain::metadata::TitleFetcher;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::LinkCache;
use crate::utils::code_generator::CodeGenerator;
use crate::utils::url_normalizer::normalize_url;
use crate::utils::validation::{MAX_TITLE_LENGTH, validate_alias, validate_title};

fn link_not_found(details: serde_json::Value) -> AppError {
    AppError::not_found("Link not found", details)
}

fn duplicate_alias(alias: &str) -> AppError {
    AppError::conflict("duplicate alias", json!({ "alias": alias }))
}

fn duplicate_url(existing: &Link) -> AppError {
    AppError::conflict(
        "duplicate URL for owner",
        json!({ "short_code": existing.short_code }),
    )
}

fn invalid_url(e: impl ToString) -> AppError {
    AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
}

/// Keeps at most [`MAX_TITLE_LENGTH`] characters of a fetched title.
fn clamp_title(title: String) -> String {
    if title.chars().count() <= MAX_TITLE_LENGTH {
        return title;
    }
    title.chars().take(MAX_TITLE_LENGTH).collect()
}

/// Creates, updates and deletes links while keeping the cache consistent.
///
/// # Uniqueness
///
/// - `short_code` and `alias` share one global namespace
/// - `original_url` is unique per owner only; anonymous links are not deduplicated
///
/// Pre-checks against the store give precise error messages. The store's
/// own constraints remain the final arbiter, and a violation there surfaces
/// as the same [`AppError::Conflict`].
///
/// The cache is never consulted for these checks.
pub struct LinkService<L: LinkRepository, F: TitleFetcher> {
    link_repository: Arc<L>,
    title_fetcher: Arc<F>,
    cache: LinkCache,
    code_generator: CodeGenerator,
    fallback_title: Option<String>,
}

impl<L: LinkRepository, F: TitleFetcher> LinkService<L, F> {
    /// Creates a new link service with the default code policy and no fallback title.
    pub fn new(link_repository: Arc<L>, title_fetcher: Arc<F>, cache: LinkCache) -> Self {
        Self {
            link_repository,
            title_fetcher,
            cache,
            code_generator: CodeGenerator::default(),
            fallback_title: None,
        }
    }

    pub fn with_code_generator(mut self, code_generator: CodeGenerator) -> Self {
        self.code_generator = code_generator;
        self
    }

    /// Title used when fetching one fails. `None` makes such failures an error.
    pub fn with_fallback_title(mut self, fallback_title: Option<String>) -> Self {
        self.fallback_title = fallback_title.filter(|t| !t.trim().is_empty());
        self
    }

    /// Creates a short link.
    ///
    /// # Arguments
    ///
    /// - `owner_id` - Owner of the new link, `None` for an anonymous link
    /// - `original_url` - Destination; normalized before any check
    /// - `alias` - Optional user-chosen alias; defaults to the generated code
    /// - `title` - Optional title; fetched from the destination when absent
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] - malformed URL, alias or title
    /// - [`AppError::Conflict`] - owner already shortened this URL, or alias taken
    /// - [`AppError::UpstreamFetch`] - title fetch failed and no fallback is configured
    /// - [`AppError::ExhaustedKeyspace`] - every generated code collided
    pub async fn shorten(
        &self,
        owner_id: Option<i64>,
        original_url: &str,
        alias: Option<String>,
        title: Option<String>,
    ) -> Result<Link, AppError> {
        let original_url = normalize_url(original_url).map_err(invalid_url)?;
        if let Some(alias) = &alias {
            validate_alias(alias)?;
        }
        let title = title.as_deref().map(validate_title).transpose()?;

        if let Some(owner_id) = owner_id
            && let Some(existing) = self
                .link_repository
                .find_by_url_for_owner(&original_url, owner_id)
                .await?
        {
            return Err(duplicate_url(&existing));
        }

        if let Some(alias) = &alias
            && self.link_repository.find_by_key(alias, None).await?.is_some()
        {
            return Err(duplicate_alias(alias));
        }

        let title = match title {
            Some(title) => title,
            None => self.fetch_title(&original_url).await?,
        };

        let short_code = self.generate_unique_code().await?;
        let alias = alias.unwrap_or_else(|| short_code.clone());

        let link = self
            .link_repository
            .create(NewLink {
                short_code,
                alias,
                title,
                original_url,
                owner_id,
            })
            .await?;

        if let Some(owner_id) = owner_id {
            self.cache.invalidate_owner_links(owner_id).await;
        }
        self.cache.put_link(&link).await;

        info!(
            short_code = %link.short_code,
            owner_id = ?link.owner_id,
            "Link created"
        );
        Ok(link)
    }

    /// Applies `patch` to the owner's link with short code `code`.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] - the owner has no link with this code
    /// - [`AppError::Conflict`] - the new alias is used by another link, or the
    ///   owner already has another link to the new URL
    /// - [`AppError::Validation`] - malformed field
    pub async fn update_link(
        &self,
        owner_id: i64,
        code: &str,
        patch: LinkPatch,
    ) -> Result<Link, AppError> {
        let patch = LinkPatch {
            title: patch.title.as_deref().map(validate_title).transpose()?,
            alias: match patch.alias {
                Some(alias) => {
                    validate_alias(&alias)?;
                    Some(alias)
                }
                None => None,
            },
            original_url: patch
                .original_url
                .as_deref()
                .map(normalize_url)
                .transpose()
                .map_err(invalid_url)?,
        };

        let link = self
            .link_repository
            .find_by_code_for_owner(code, owner_id)
            .await?
            .ok_or_else(|| link_not_found(json!({ "code": code })))?;

        if patch.is_empty() {
            return Ok(link);
        }

        if let Some(alias) = &patch.alias
            && *alias != link.alias
            && self
                .link_repository
                .find_by_key(alias, Some(link.id))
                .await?
                .is_some()
        {
            return Err(duplicate_alias(alias));
        }

        if let Some(url) = &patch.original_url
            && *url != link.original_url
            && let Some(existing) = self
                .link_repository
                .find_by_url_for_owner(url, owner_id)
                .await?
            && existing.id != link.id
        {
            return Err(duplicate_url(&existing));
        }

        let updated = self.link_repository.update(link.id, patch).await?;

        self.cache.invalidate_owner_links(owner_id).await;
        self.cache.put_link(&updated).await;

        info!(short_code = %updated.short_code, owner_id, "Link updated");
        Ok(updated)
    }

    /// Permanently deletes the owner's link selected by code or destination URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the owner has no matching link.
    pub async fn delete_link(&self, owner_id: i64, selector: LinkSelector) -> Result<(), AppError> {
        let link = match &selector {
            LinkSelector::Code(code) => {
                self.link_repository
                    .find_by_code_for_owner(code, owner_id)
                    .await?
            }
            LinkSelector::Url(url) => {
                // an unparsable URL can still match a stored string verbatim
                let url = normalize_url(url).unwrap_or_else(|_| url.clone());
                self.link_repository
                    .find_by_url_for_owner(&url, owner_id)
                    .await?
            }
        };

        let link = link.ok_or_else(|| match &selector {
            LinkSelector::Code(code) => link_not_found(json!({ "code": code })),
            LinkSelector::Url(url) => link_not_found(json!({ "url": url })),
        })?;

        self.link_repository.delete(link.id).await?;

        self.cache.invalidate_link(&link.short_code).await;
        self.cache.invalidate_owner_links(owner_id).await;

        info!(short_code = %link.short_code, owner_id, "Link deleted");
        Ok(())
    }

    /// Builds the public short URL for a code.
    pub fn get_short_url(&self, base_url: &str, code: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), code)
    }

    /// Looks up a title for `url`, falling back when the fetch fails.
    async fn fetch_title(&self, url: &str) -> Result<String, AppError> {
        match self.title_fetcher.fetch_title(url).await {
            Ok(title) => Ok(clamp_title(title)),
            Err(e) => match &self.fallback_title {
                Some(fallback) => {
                    warn!(url, error = %e, "Title fetch failed, using fallback title");
                    Ok(fallback.clone())
                }
                None => Err(AppError::upstream_fetch(
                    e.to_string(),
                    json!({ "url": url }),
                )),
            },
        }
    }

    /// Draws candidates until one is free in both the code and alias namespaces.
    async fn generate_unique_code(&self) -> Result<String, AppError> {
        for code in self.code_generator.candidates() {
            if self
                .link_repository
                .find_by_key(&code, None)
                .await?
                .is_none()
            {
                return Ok(code);
            }
        }

        Err(AppError::exhausted_keyspace(
            "Failed to generate unique code",
            json!({
                "reason": "Too many collisions",
                "attempts": self.code_generator.max_attempts,
            }),
        ))
    }
}
