//! HTTP request handlers for API endpoints.
//!
//! Handlers are thin: extract, call a service, shape the response.

pub mod health;
pub mod links;
pub mod redirect;
pub mod shorten;

pub use health::health_handler;
pub use links::{
    delete_link_by_url_handler, delete_link_handler, get_link_handler, list_links_handler,
    update_link_handler,
};
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
