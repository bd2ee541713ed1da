//! Destination URL validation and normalization.
//!
//! The normalized form is what gets stored and compared, so two spellings of
//! the same address count as one URL for the per-owner uniqueness rule.

use url::Url;

/// Longest destination URL accepted, in bytes.
pub const MAX_URL_LENGTH: usize = 2048;

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlNormalizationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,

    #[error("URL is longer than {MAX_URL_LENGTH} characters")]
    TooLong,
}

/// Validates `input` as an absolute http(s) URL and returns its canonical form.
///
/// - host lowercased
/// - default port (80 / 443) dropped
/// - fragment dropped
/// - path and query kept as written
///
/// # Errors
///
/// See [`UrlNormalizationError`].
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     normalize_url("HTTP://Example.COM:80/page#top").unwrap(),
///     "http://example.com/page"
/// );
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let trimmed = input.trim();
    if trimmed.len() > MAX_URL_LENGTH {
        return Err(UrlNormalizationError::TooLong);
    }

    let mut url =
        Url::parse(trimmed).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(UrlNormalizationError::UnsupportedProtocol);
    }

    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or(UrlNormalizationError::MissingHost)?
        .to_ascii_lowercase();
    url.set_host(Some(&host))
        .map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    // the parser already drops default ports for http and https
    url.set_fragment(None);

    let normalized = url.to_string();
    if normalized.len() > MAX_URL_LENGTH {
        return Err(UrlNormalizationError::TooLong);
    }

    Ok(normalized)
}
