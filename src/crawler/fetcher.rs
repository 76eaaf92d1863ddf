//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the mirror:
//! - Building the shared HTTP client
//! - GET requests returning the raw body bytes
//! - Error classification
//!
//! Failed fetches are never retried; the caller logs them and moves on.

use crate::config::CrawlerConfig;
use crate::FetchError;
use reqwest::Client;
use url::Url;

/// Builds an HTTP client with the configured timeouts
///
/// No custom headers are sent and redirects follow reqwest's default policy.
///
/// # Example
///
/// ```no_run
/// use site_mirror::config::CrawlerConfig;
/// use site_mirror::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(config.request_timeout())
        .connect_timeout(config.connect_timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns its body bytes
///
/// # Error Classification
///
/// | Condition | Result |
/// |-----------|--------|
/// | Timeout | `FetchError::Timeout` |
/// | Connection refused / DNS failure | `FetchError::Connect` |
/// | Non-2xx status | `FetchError::Status` |
/// | Anything else (body read, protocol) | `FetchError::Transport` |
pub async fn fetch(client: &Client, url: &Url) -> Result<Vec<u8>, FetchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| classify(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await.map_err(|e| classify(url, e))?;
    Ok(body.to_vec())
}

/// Maps a reqwest error to the matching `FetchError`
fn classify(url: &Url, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Connect {
            url: url.to_string(),
            source: error,
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            source: error,
        }
    }
}
