//! URL handling module for Site-Mirror
//!
//! This module provides href resolution and canonicalization, the crawl's
//! origin lock, and the mapping from URLs to local file paths.

mod normalize;
mod path_map;

use crate::UrlResult;
use url::{Origin, Url};

// Re-export main functions
pub use normalize::{normalize, parse_seed};
pub use path_map::{is_markup_path, map_path};

/// The scheme and host a crawl is locked to
///
/// Built once from the seed URL; every URL that enters the frontier must share
/// this origin (scheme, host and port).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlScope {
    scheme: String,
    prefix: String,
    origin: Origin,
}

impl CrawlScope {
    /// Parses a seed URL and locks the crawl to its origin
    ///
    /// Returns the canonical seed together with the scope.
    ///
    /// # Examples
    ///
    /// ```
    /// use site_mirror::url::CrawlScope;
    ///
    /// let (scope, seed) = CrawlScope::from_seed("http://Example.com:8080/a/#top").unwrap();
    /// assert_eq!(scope.scheme(), "http");
    /// assert_eq!(scope.prefix(), "http://example.com:8080");
    /// assert_eq!(seed.as_str(), "http://example.com:8080/a/");
    /// ```
    pub fn from_seed(seed: &str) -> UrlResult<(Self, Url)> {
        let seed = parse_seed(seed)?;
        Ok((Self::for_url(&seed), seed))
    }

    /// Builds the scope of an already canonical URL
    pub fn for_url(url: &Url) -> Self {
        let origin = url.origin();
        Self {
            scheme: url.scheme().to_string(),
            prefix: origin.ascii_serialization(),
            origin,
        }
    }

    /// The locked scheme, without `://`
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// `scheme://host[:port]`, used to absolutize root-relative hrefs
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns true if the URL belongs to the locked origin
    pub fn contains(&self, url: &Url) -> bool {
        url.origin() == self.origin
    }
}
