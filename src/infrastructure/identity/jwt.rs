//! HS256 JWT verification for the identity collaborator.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::domain::entities::{Principal, Role};
use crate::domain::identity::IdentityProvider;
use crate::error::AppError;

/// Access token claims issued by the auth service.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Username.
    pub sub: String,
    pub id: i64,
    pub role: Role,
    pub exp: i64,
}

/// Verifies access tokens signed with a shared HS256 secret.
pub struct JwtIdentityProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityProvider {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Signs a token for `principal`, valid for `ttl`.
    ///
    /// Token issuance belongs to the auth service; this exists for tooling and tests.
    pub fn issue(
        &self,
        principal: &Principal,
        ttl: Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            sub: principal.username.clone(),
            id: principal.id,
            role: principal.role,
            exp: (Utc::now() + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
    }
}

impl IdentityProvider for JwtIdentityProvider {
    fn authenticate(&self, token: &str) -> Result<Principal, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            debug!(error = %e, "Rejected bearer token");
            AppError::unauthorized(
                "Could not validate user.",
                json!({ "reason": "Invalid or expired token" }),
            )
        })?;

        let claims = data.claims;
        if claims.sub.is_empty() {
            return Err(AppError::unauthorized(
                "Could not validate user.",
                json!({ "reason": "Token has no subject" }),
            ));
        }

        Ok(Principal::new(claims.id, claims.sub, claims.role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> JwtIdentityProvider {
        JwtIdentityProvider::new("test_secret_key_32_bytes_long!!")
    }

    #[test]
    fn test_issue_and_authenticate() {
        let provider = provider();
        let alice = Principal::new(7, "alice", Role::User);

        let token = provider.issue(&alice, Duration::minutes(20)).unwrap();
        let principal = provider.authenticate(&token).unwrap();

        assert_eq!(principal, alice);
    }

    #[test]
    fn test_admin_role_survives() {
        let provider = provider();
        let admin = Principal::new(1, "root", Role::Admin);

        let token = provider.issue(&admin, Duration::minutes(5)).unwrap();
        assert_eq!(provider.authenticate(&token).unwrap().role, Role::Admin);
    }

    #[test]
    fn test_garbage_token_rejected() {
        let result = provider().authenticate("invalid.token.here");
        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let other = JwtIdentityProvider::new("different_secret_key_32_bytes!!");
        let token = other
            .issue(&Principal::new(1, "bob", Role::User), Duration::minutes(5))
            .unwrap();

        assert!(provider().authenticate(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let provider = provider();
        let token = provider
            .issue(&Principal::new(1, "bob", Role::User), Duration::hours(-1))
            .unwrap();

        assert!(matches!(
            provider.authenticate(&token),
            Err(AppError::Unauthorized { .. })
        ));
    }
}
