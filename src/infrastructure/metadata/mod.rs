//! Title lookup over HTTP.

mod http_title_fetcher;

pub use http_title_fetcher::{HttpTitleFetcher, extract_title};
