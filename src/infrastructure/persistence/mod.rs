//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with
//! bound parameters for every value.

pub mod pg_link_repository;

pub use pg_link_repository::PgLinkRepository;
