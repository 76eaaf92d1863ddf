//! Site-Mirror: a single-site web mirror
//!
//! This crate mirrors one website to local storage. Starting from a seed page it
//! discovers same-origin links, fetches each resource once, and writes it to a
//! path derived from the URL.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Site-Mirror operations
///
/// Only startup failures surface as a `MirrorError`; once the crawl loop is
/// running every per-resource failure is logged and the loop continues.
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid phase transition: {from} -> {to}")]
    InvalidTransition {
        from: state::CrawlPhase,
        to: state::CrawlPhase,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown text encoding label: {0}")]
    UnknownEncoding(String),
}

/// URL-specific errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),

    #[error("Malformed URL: {0}")]
    Malformed(String),

    #[error("Link uses a scheme outside the crawl: {0}")]
    ForeignScheme(String),
}

/// Errors raised while fetching a resource
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {source}")]
    Connect { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("HTTP error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },
}

/// Errors raised while decoding a page body as text
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("No candidate encoding decoded the body (tried {tried:?})")]
    Exhausted { tried: Vec<&'static str> },
}

/// Errors raised while writing a mirrored resource
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid storage path: {0}")]
    InvalidPath(String),
}

/// Result type alias for Site-Mirror operations
pub type Result<T> = std::result::Result<T, MirrorError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{EncodingPreferences, Frontier, Mirror};
pub use output::{CrawlEvent, CrawlStatistics, EventSink};
pub use state::CrawlPhase;
pub use crate::url::{map_path, normalize, CrawlScope};
