//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::{domain::entities::Principal, error::AppError, state::AppState};

/// Resolves the bearer token in `parts` into a [`Principal`].
async fn authenticate(st: &AppState, parts: &mut Parts) -> Result<Principal, AppError> {
    let AuthBearer(token) = AuthBearer::from_request_parts(parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    st.identity.authenticate(&token)
}

/// Requires a valid bearer token and stores the caller's [`Principal`] in
/// request extensions.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Errors
///
/// Returns `401 Unauthorized` with `WWW-Authenticate: Bearer` if the header is
/// missing or the token does not verify.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/links", get(list_links_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let principal = authenticate(&st, &mut parts).await?;
    tracing::debug!(user_id = principal.id, "Authenticated request");
    parts.extensions.insert(principal);

    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Like [`layer`], but lets requests without an `Authorization` header through
/// anonymously. A header that is present but invalid is still rejected.
pub async fn optional_layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !req.headers().contains_key(header::AUTHORIZATION) {
        return Ok(next.run(req).await);
    }

    let (mut parts, body) = req.into_parts();

    let principal = authenticate(&st, &mut parts).await?;
    parts.extensions.insert(principal);

    Ok(next.run(Request::from_parts(parts, body)).await)
}
