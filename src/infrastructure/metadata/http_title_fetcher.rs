//! Fetches a page and pulls the text of its `<title>` element.

use async_trait::async_trait;
use regex::Regex;
use reqwest::{Client, StatusCode, redirect::Policy};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;

use crate::domain::metadata::{FetchError, NO_TITLE, TitleFetcher};

static TITLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<title[^>]*>(.*?)</title\s*>").expect("title pattern is valid")
});

/// Most bytes of a page read while looking for its title.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Returns the trimmed, entity-decoded contents of the first `<title>` tag.
pub fn extract_title(html: &str) -> Option<String> {
    let raw = TITLE_REGEX.captures(html)?.get(1)?.as_str();

    let decoded = raw
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&");

    let title = WHITESPACE_REGEX.replace_all(decoded.trim(), " ").into_owned();
    (!title.is_empty()).then_some(title)
}

const TITLE_END: &[u8] = b"</title";

/// True once a complete closing title tag has been read.
fn contains_title_end(bytes: &[u8]) -> bool {
    bytes
        .windows(TITLE_END.len())
        .position(|w| w.eq_ignore_ascii_case(TITLE_END))
        .is_some_and(|at| bytes[at + TITLE_END.len()..].contains(&b'>'))
}

/// [`TitleFetcher`] backed by `reqwest`.
///
/// Follows up to 10 redirects. Anything other than `200 OK` is an error. The
/// whole exchange, body included, is bounded by `timeout`, and at most
/// [`MAX_BODY_BYTES`] of the page are read.
pub struct HttpTitleFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpTitleFetcher {
    /// # Errors
    ///
    /// Returns [`FetchError::Request`] if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(Policy::limited(10))
            .user_agent(concat!("linkbottle/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self { client, timeout })
    }

    async fn fetch_body(&self, url: &str) -> Result<String, FetchError> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }

        // read until the title closes or the cap is hit
        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?
        {
            body.extend_from_slice(&chunk);

            if body.len() >= MAX_BODY_BYTES || contains_title_end(&body) {
                break;
            }
        }
        body.truncate(MAX_BODY_BYTES);

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

#[async_trait]
impl TitleFetcher for HttpTitleFetcher {
    async fn fetch_title(&self, url: &str) -> Result<String, FetchError> {
        let body = tokio::time::timeout(self.timeout, self.fetch_body(url))
            .await
            .map_err(|_| FetchError::Timeout(self.timeout.as_secs()))??;

        let title = extract_title(&body).unwrap_or_else(|| NO_TITLE.to_string());
        debug!(url, title = %title, "Fetched page title");
        Ok(title)
    }
}
