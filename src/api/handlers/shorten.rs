//! Handler for link shortening endpoint.

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::LinkResponse;
use crate::api::dto::shorten::ShortenRequest;
use crate::domain::entities::Principal;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// A bearer token is optional. Without one the link is anonymous and is not
/// checked against any owner's existing URLs.
///
/// # Request Body
///
/// ```json
/// {
///   "url": "http://example.com/page",
///   "alias": "my-page",   // optional
///   "title": "My page"    // optional, fetched when absent
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request on malformed URL, alias or title
/// - 409 Conflict on duplicate URL for owner or duplicate alias
/// - 502 Bad Gateway if the title could not be fetched and no fallback is set
/// - 503 Service Unavailable if no free short code was found
pub async fn shorten_handler(
    State(state): State<AppState>,
    principal: Option<Extension<Principal>>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let owner_id = principal.map(|Extension(p)| p.id);

    let link = state
        .link_service
        .shorten(owner_id, &payload.url, payload.alias, payload.title)
        .await?;

    let short_url = state.short_url(&link.short_code);

    Ok((StatusCode::CREATED, Json(LinkResponse::new(link, short_url))))
}
