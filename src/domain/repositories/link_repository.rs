//! Repository trait for short link data access.

use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Durable storage for link records.
///
/// Uniqueness of `short_code`, `alias`, the shared code/alias namespace and
/// `(owner_id, original_url)` is enforced by the store itself; callers may
/// pre-check for clearer errors but must still expect [`AppError::Conflict`]
/// from every mutating call.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code, alias or
    /// owner/URL pair is already taken.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by short code, restricted to links owned by `owner_id`.
    async fn find_by_code_for_owner(
        &self,
        code: &str,
        owner_id: i64,
    ) -> Result<Option<Link>, AppError>;

    /// Finds the owner's link pointing at `original_url`.
    async fn find_by_url_for_owner(
        &self,
        original_url: &str,
        owner_id: i64,
    ) -> Result<Option<Link>, AppError>;

    /// Finds a link whose short code or alias equals `key`.
    ///
    /// `exclude_id` skips one record, so an update does not collide with itself.
    async fn find_by_key(
        &self,
        key: &str,
        exclude_id: Option<i64>,
    ) -> Result<Option<Link>, AppError>;

    /// Lists all links owned by `owner_id`, newest first.
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError>;

    /// Applies a partial update and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    /// Returns [`AppError::Conflict`] on a uniqueness violation.
    async fn update(&self, id: i64, patch: LinkPatch) -> Result<Link, AppError>;

    /// Permanently removes a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    /// Atomically adds one to the click counter and returns the stored record.
    ///
    /// The increment is a single store-side statement, so concurrent calls
    /// never lose updates.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    async fn increment_clicks(&self, id: i64) -> Result<Link, AppError>;
}
