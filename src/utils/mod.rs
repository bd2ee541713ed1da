//! Helpers shared by the services and the API layer.
//!
//! - [`code_generator`] - Short code generation with a bounded retry policy
//! - [`url_normalizer`] - Destination URL validation and normalization
//! - [`validation`] - Alias and title rules

pub mod code_generator;
pub mod url_normalizer;
pub mod validation;
