//! Link extraction from page text
//!
//! Links are found with a pattern match over `href=` / `src=` attributes, not
//! a markup parse, so broken or partial HTML still yields its links.

use crate::url::{normalize, CrawlScope};
use regex::{CaptureMatches, Regex};
use std::sync::LazyLock;
use url::Url;

/// `href="..."` / `src="..."`, double or single quoted
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i:href|src)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("hardcoded regex pattern is valid")
});

/// Lazy iterator over the in-scope links of one page
///
/// Yields canonical URLs in order of first occurrence. Duplicates are not
/// removed here; the frontier's visited set takes care of them as each link
/// is consumed.
pub struct Links<'a> {
    matches: CaptureMatches<'static, 'a>,
    page_url: &'a Url,
    scope: &'a CrawlScope,
    rejected: usize,
    out_of_scope: usize,
}

impl Links<'_> {
    /// Hrefs the normalizer refused so far
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Links dropped for pointing at another origin so far
    pub fn out_of_scope(&self) -> usize {
        self.out_of_scope
    }
}

impl Iterator for Links<'_> {
    type Item = Url;

    fn next(&mut self) -> Option<Url> {
        for caps in self.matches.by_ref() {
            let Some(href) = caps.get(1).or_else(|| caps.get(2)) else {
                continue;
            };

            match normalize(href.as_str(), self.page_url, self.scope) {
                Ok(url) if self.scope.contains(&url) => return Some(url),
                Ok(url) => {
                    self.out_of_scope += 1;
                    tracing::trace!("Skipping out-of-scope link {}", url);
                }
                Err(e) => {
                    self.rejected += 1;
                    tracing::debug!(
                        "Skipping link {:?} on {}: {}",
                        href.as_str(),
                        self.page_url,
                        e
                    );
                }
            }
        }
        None
    }
}

/// Scans page text for links that belong to the crawl
///
/// # Example
///
/// ```
/// use site_mirror::crawler::extract_links;
/// use site_mirror::url::CrawlScope;
///
/// let (scope, page) = CrawlScope::from_seed("http://example.com/a/index.html").unwrap();
/// let html = r#"<a href="../b.html">b</a> <img src="/img/x.png"> <a href="http://other.com/">x</a>"#;
///
/// let links: Vec<String> = extract_links(html, &page, &scope).map(String::from).collect();
/// assert_eq!(links, vec!["http://example.com/b.html", "http://example.com/img/x.png"]);
/// ```
pub fn extract_links<'a>(content: &'a str, page_url: &'a Url, scope: &'a CrawlScope) -> Links<'a> {
    Links {
        matches: LINK_RE.captures_iter(content),
        page_url,
        scope,
        rejected: 0,
        out_of_scope: 0,
    }
}
