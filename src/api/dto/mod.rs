//! Data Transfer Objects for API requests and responses.
//!
//! Request DTOs derive `validator::Validate` for shape checks. Domain rules
//! (URL normalization, reserved aliases) live in the services.

pub mod health;
pub mod link;
pub mod shorten;
pub mod update_link;
