//! Link metadata collaborator.

use async_trait::async_trait;

/// Title used when a page has no usable `<title>`.
pub const NO_TITLE: &str = "No Title";

/// Errors surfaced by a title fetch.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Error fetching URL: {0}")]
    Request(String),

    #[error("Failed to fetch URL (status {0})")]
    Status(u16),

    #[error("Timed out fetching URL after {0}s")]
    Timeout(u64),
}

/// Fetches a human-readable title for a destination URL.
///
/// Implementations return [`NO_TITLE`] when the page loads but carries no
/// title, and a [`FetchError`] when the page cannot be loaded.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TitleFetcher: Send + Sync {
    async fn fetch_title(&self, url: &str) -> Result<String, FetchError>;
}
