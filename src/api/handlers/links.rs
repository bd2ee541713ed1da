//! Handlers for owner-scoped link management.
//!
//! Every handler here runs behind [`crate::api::middleware::auth::layer`],
//! which puts the caller's [`Principal`] into request extensions.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::{DeleteByUrlQuery, LinkResponse};
use crate::api::dto::update_link::UpdateLinkRequest;
use crate::domain::entities::{LinkSelector, Principal};
use crate::error::AppError;
use crate::state::AppState;

/// Lists the caller's links.
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state
        .resolution_service
        .list_links_for_owner(principal.id)
        .await?;

    let items = links
        .into_iter()
        .map(|link| {
            let short_url = state.short_url(&link.short_code);
            LinkResponse::new(link, short_url)
        })
        .collect();

    Ok(Json(items))
}

/// Returns one of the caller's links.
///
/// `GET /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code doesn't exist or belongs to someone else.
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state
        .resolution_service
        .get_link_for_owner(principal.id, &code)
        .await?;

    let short_url = state.short_url(&link.short_code);
    Ok(Json(LinkResponse::new(link, short_url)))
}

/// Partially updates one of the caller's links.
///
/// `PATCH /api/links/{code}`
///
/// ```json
/// {
///   "title": "New title",
///   "alias": "new-alias",
///   "url": "https://new-destination.com"
/// }
/// ```
///
/// # Errors
///
/// - 404 Not Found if the caller has no link with this code
/// - 409 Conflict if the alias or URL collides with another link
/// - 400 Bad Request if validation fails
pub async fn update_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<UpdateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .update_link(principal.id, &code, payload.into())
        .await?;

    let short_url = state.short_url(&link.short_code);
    Ok(Json(LinkResponse::new(link, short_url)))
}

/// Permanently deletes one of the caller's links by short code.
///
/// `DELETE /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the caller has no link with this code.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<StatusCode, AppError> {
    state
        .link_service
        .delete_link(principal.id, LinkSelector::Code(code))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Permanently deletes the caller's link to a destination URL.
///
/// `DELETE /api/links?url=...`
///
/// # Errors
///
/// Returns 404 Not Found if the caller has no link to this URL.
pub async fn delete_link_by_url_handler(
    Query(query): Query<DeleteByUrlQuery>,
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<StatusCode, AppError> {
    state
        .link_service
        .delete_link(principal.id, LinkSelector::Url(query.url))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
