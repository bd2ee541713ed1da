//! Field rules for aliases and titles.

use crate::error::AppError;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Allowed alias shape: 3-30 letters, digits, `_` or `-`.
pub static ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{3,30}$").expect("alias pattern is valid"));

/// Longest accepted title, in characters.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Aliases that would shadow a route.
const RESERVED_ALIASES: &[&str] = &["api", "health", "links", "shorten"];

/// Checks a user-chosen alias.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the alias has the wrong shape or is reserved.
pub fn validate_alias(alias: &str) -> Result<(), AppError> {
    if !ALIAS_REGEX.is_match(alias) {
        return Err(AppError::bad_request(
            "Alias must be 3-30 characters of letters, digits, '_' or '-'",
            json!({ "alias": alias }),
        ));
    }

    if RESERVED_ALIASES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(alias))
    {
        return Err(AppError::bad_request(
            "This alias is reserved",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}

/// Checks a caller-supplied title and returns it trimmed.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the title is blank or too long.
pub fn validate_title(title: &str) -> Result<String, AppError> {
    let trimmed = title.trim();

    if trimmed.is_empty() {
        return Err(AppError::bad_request(
            "Title must not be blank",
            json!({}),
        ));
    }

    let length = trimmed.chars().count();
    if length > MAX_TITLE_LENGTH {
        return Err(AppError::bad_request(
            format!("Title must be at most {MAX_TITLE_LENGTH} characters"),
            json!({ "provided_length": length }),
        ));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_aliases() {
        let longest = "a".repeat(30);
        for alias in ["abc", "my-link", "Promo_2025", longest.as_str()] {
            assert!(validate_alias(alias).is_ok(), "{alias}");
        }
    }

    #[test]
    fn test_alias_too_short_or_long() {
        assert!(validate_alias("ab").is_err());
        assert!(validate_alias(&"a".repeat(31)).is_err());
    }

    #[test]
    fn test_alias_bad_characters() {
        for alias in ["my link", "promo!", "über", "a/b"] {
            assert!(
                matches!(validate_alias(alias), Err(AppError::Validation { .. })),
                "{alias}"
            );
        }
    }

    #[test]
    fn test_reserved_alias_any_case() {
        assert!(validate_alias("health").is_err());
        assert!(validate_alias("API").is_err());
    }

    #[test]
    fn test_title_trimmed() {
        assert_eq!(validate_title("  My page ").unwrap(), "My page");
    }

    #[test]
    fn test_title_blank() {
        assert!(validate_title("   ").is_err());
    }

    #[test]
    fn test_title_too_long() {
        let err = validate_title(&"x".repeat(MAX_TITLE_LENGTH + 1)).unwrap_err();
        assert!(err.to_string().contains("at most"));
    }
}
