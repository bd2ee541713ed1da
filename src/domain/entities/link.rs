//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shortened URL with its owner and click counter.
///
/// `short_code` is system-generated and immutable. `alias` shares the same
/// namespace as `short_code` and defaults to it. `owner_id` is `None` for
/// anonymous links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: i64,
    pub short_code: String,
    pub alias: String,
    pub title: String,
    pub original_url: String,
    pub owner_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub clicks: i64,
}

impl Link {
    /// Creates a new Link instance.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        short_code: String,
        alias: String,
        title: String,
        original_url: String,
        owner_id: Option<i64>,
        created_at: DateTime<Utc>,
        clicks: i64,
    ) -> Self {
        Self {
            id,
            short_code,
            alias,
            title,
            original_url,
            owner_id,
            created_at,
            clicks,
        }
    }

    /// Returns true if the link belongs to `owner_id`.
    pub fn is_owned_by(&self, owner_id: i64) -> bool {
        self.owner_id == Some(owner_id)
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub short_code: String,
    pub alias: String,
    pub title: String,
    pub original_url: String,
    pub owner_id: Option<i64>,
}

/// Partial update for an existing link.
///
/// `None` fields are left unchanged. `short_code`, `owner_id` and `clicks`
/// are not editable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPatch {
    pub title: Option<String>,
    pub alias: Option<String>,
    pub original_url: Option<String>,
}

impl LinkPatch {
    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.alias.is_none() && self.original_url.is_none()
    }
}

/// Selects a single link of an owner for deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkSelector {
    /// Match by short code.
    Code(String),
    /// Match by destination URL.
    Url(String),
}
