//! Core domain entities.
//!
//! - [`Link`] - A shortened URL mapping with its click counter
//! - [`Principal`] - The authenticated caller of an owner-scoped operation
//!
//! Creation and update inputs live beside the entity they produce:
//! [`NewLink`] for inserts, [`LinkPatch`] for partial updates.

pub mod link;
pub mod principal;

pub use link::{Link, LinkPatch, LinkSelector, NewLink};
pub use principal::{Principal, Role};
