//! DTO for the link shortening endpoint.

use serde::Deserialize;
use validator::Validate;

/// Request body for `POST /api/shorten`.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// Destination URL (absolute `http` or `https`).
    #[validate(length(min = 1, max = 2048))]
    pub url: String,

    /// Optional alias; defaults to the generated short code.
    #[validate(length(min = 3, max = 30))]
    pub alias: Option<String>,

    /// Optional title; fetched from the destination page when absent.
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
}
