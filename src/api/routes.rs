//! API route configuration.

use crate::api::handlers::{
    delete_link_by_url_handler, delete_link_handler, get_link_handler, list_links_handler,
    shorten_handler, update_link_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Owner-scoped routes; wrap with [`crate::api::middleware::auth::layer`].
///
/// # Endpoints
///
/// - `GET    /links`          - List the caller's links
/// - `DELETE /links?url=...`  - Delete the caller's link to a URL
/// - `GET    /links/{code}`   - Fetch one of the caller's links
/// - `PATCH  /links/{code}`   - Partially update a link
/// - `DELETE /links/{code}`   - Delete a link
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/links",
            get(list_links_handler).delete(delete_link_by_url_handler),
        )
        .route(
            "/links/{code}",
            get(get_link_handler)
                .patch(update_link_handler)
                .delete(delete_link_handler),
        )
}

/// Routes where a bearer token is optional; wrap with
/// [`crate::api::middleware::auth::optional_layer`].
///
/// - `POST /shorten` - Create a short link, owned if a token is given
pub fn open_routes() -> Router<AppState> {
    Router::new().route("/shorten", post(shorten_handler))
}
