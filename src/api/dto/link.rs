//! Link representation returned by the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Link;

/// JSON representation of a link.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub short_code: String,
    pub alias: String,
    pub title: String,
    pub original_url: String,
    pub short_url: String,
    pub owner_id: Option<i64>,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl LinkResponse {
    pub fn new(link: Link, short_url: String) -> Self {
        Self {
            id: link.id,
            short_code: link.short_code,
            alias: link.alias,
            title: link.title,
            original_url: link.original_url,
            short_url,
            owner_id: link.owner_id,
            clicks: link.clicks,
            created_at: link.created_at,
        }
    }
}

/// Query string for `DELETE /api/links?url=...`.
#[derive(Debug, Deserialize)]
pub struct DeleteByUrlQuery {
    pub url: String,
}
