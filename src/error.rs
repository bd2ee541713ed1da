//! Application error type and its HTTP representation.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// JSON error envelope returned by every failing endpoint.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error code with a message and structured details.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Errors produced by the link store, services and handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Unauthorized { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Conflict { message: String, details: Value },

    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Metadata fetch failed and no fallback title was available.
    #[error("{message}")]
    UpstreamFetch { message: String, details: Value },

    /// Short code generation kept colliding past its retry bound.
    #[error("{message}")]
    ExhaustedKeyspace { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn upstream_fetch(message: impl Into<String>, details: Value) -> Self {
        Self::UpstreamFetch {
            message: message.into(),
            details,
        }
    }
    pub fn exhausted_keyspace(message: impl Into<String>, details: Value) -> Self {
        Self::ExhaustedKeyspace {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    fn parts(&self) -> (StatusCode, &'static str, &str, &Value) {
        match self {
            Self::Unauthorized { message, details } => {
                (StatusCode::UNAUTHORIZED, "unauthorized", message, details)
            }
            Self::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            Self::Conflict { message, details } => {
                (StatusCode::CONFLICT, "conflict", message, details)
            }
            Self::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            Self::UpstreamFetch { message, details } => (
                StatusCode::BAD_GATEWAY,
                "upstream_fetch_error",
                message,
                details,
            ),
            Self::ExhaustedKeyspace { message, details } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "exhausted_keyspace",
                message,
                details,
            ),
            Self::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        }
    }

    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        self.parts().0
    }

    /// Converts the error into its serializable body.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code, message, details) = self.parts();
        ErrorInfo {
            code,
            message: message.to_string(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        if status == StatusCode::UNAUTHORIZED {
            return (status, [(header::WWW_AUTHENTICATE, "Bearer")], Json(body)).into_response();
        }

        (status, Json(body)).into_response()
    }
}

/// Maps a link-table constraint name to the message shown to callers.
fn constraint_message(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some("links_short_code_key") => "duplicate short code",
        Some("links_alias_key") | Some("links_alias_short_code_cross") => "duplicate alias",
        Some("links_owner_url_key") => "duplicate URL for owner",
        _ => "Unique constraint violation",
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            let constraint = db.constraint();
            return AppError::conflict(
                constraint_message(constraint),
                json!({ "constraint": constraint }),
            );
        }

        tracing::error!(error = %e, "Database error");
        AppError::internal("Database error", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&e).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Validation failed", details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::unauthorized("x", json!({})), StatusCode::UNAUTHORIZED),
            (AppError::not_found("x", json!({})), StatusCode::NOT_FOUND),
            (AppError::conflict("x", json!({})), StatusCode::CONFLICT),
            (AppError::bad_request("x", json!({})), StatusCode::BAD_REQUEST),
            (AppError::upstream_fetch("x", json!({})), StatusCode::BAD_GATEWAY),
            (
                AppError::exhausted_keyspace("x", json!({})),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::internal("x", json!({})),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.status(), status);
        }
    }

    #[test]
    fn test_display_is_message() {
        let err = AppError::conflict("duplicate alias", json!({ "alias": "promo" }));
        assert_eq!(err.to_string(), "duplicate alias");
    }

    #[test]
    fn test_error_info() {
        let info = AppError::not_found("Link not found", json!({ "code": "abc123" }))
            .to_error_info();

        assert_eq!(info.code, "not_found");
        assert_eq!(info.message, "Link not found");
        assert_eq!(info.details["code"], "abc123");
    }

    #[test]
    fn test_constraint_messages() {
        assert_eq!(
            constraint_message(Some("links_owner_url_key")),
            "duplicate URL for owner"
        );
        assert_eq!(constraint_message(Some("links_alias_key")), "duplicate alias");
        assert_eq!(
            constraint_message(Some("links_alias_short_code_cross")),
            "duplicate alias"
        );
        assert_eq!(
            constraint_message(Some("links_short_code_key")),
            "duplicate short code"
        );
        assert_eq!(constraint_message(None), "Unique constraint violation");
    }

    #[test]
    fn test_unauthorized_sets_www_authenticate() {
        let response = AppError::unauthorized("Unauthorized", json!({})).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
    }
}
