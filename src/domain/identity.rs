//! Identity collaborator.

use crate::domain::entities::Principal;
use crate::error::AppError;

/// Turns a bearer credential into an authenticated [`Principal`].
#[cfg_attr(test, mockall::automock)]
pub trait IdentityProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the credential is invalid or expired.
    fn authenticate(&self, token: &str) -> Result<Principal, AppError>;
}
