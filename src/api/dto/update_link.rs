//! DTO for the link update endpoint.

use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::LinkPatch;

/// Request body for `PATCH /api/links/{code}`.
///
/// All fields are optional and only provided fields are changed.
/// `short_code` and the owner cannot be changed.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateLinkRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    #[validate(length(min = 3, max = 30))]
    pub alias: Option<String>,

    /// New destination URL.
    #[validate(length(min = 1, max = 2048))]
    pub url: Option<String>,
}

impl From<UpdateLinkRequest> for LinkPatch {
    fn from(req: UpdateLinkRequest) -> Self {
        LinkPatch {
            title: req.title,
            alias: req.alias,
            original_url: req.url,
        }
    }
}
