//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls, validation and the link cache.
//! They consume repository traits so handlers never touch SQL directly.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link creation, update and deletion
//! - [`services::resolution_service::ResolutionService`] - Redirect resolution and owner reads

pub mod services;
