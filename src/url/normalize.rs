use crate::url::CrawlScope;
use crate::{UrlError, UrlResult};
use regex::Regex;
use std::sync::LazyLock;
use url::{Position, Url};

/// Matches an href that names its own scheme (`mailto:`, `javascript:`, ...)
static EXPLICIT_SCHEME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("hardcoded regex pattern is valid")
});

/// Resolves an href found on `page_url` into a canonical crawl URL
///
/// # Resolution Rules (first match wins)
///
/// 1. Starts with the crawl's `scheme://` → used verbatim
/// 2. Starts with `//` → protocol-relative, the crawl's scheme is prepended
/// 3. Starts with `/` → root-relative, `scheme://host[:port]` is prepended
/// 4. Starts with `../` → appended to the page's directory, then every
///    `segment/../` pair is collapsed until none remain
/// 5. Anything else → appended to the page's directory
///
/// Hrefs carrying any other scheme are rejected with `UrlError::ForeignScheme`.
/// The result is reduced to `scheme://host[:port]/path[?query]`; fragments and
/// credentials are dropped.
///
/// # Examples
///
/// ```
/// use site_mirror::url::{normalize, CrawlScope};
///
/// let (scope, page) = CrawlScope::from_seed("http://example.com/a/index.html").unwrap();
///
/// let url = normalize("../b.html", &page, &scope).unwrap();
/// assert_eq!(url.as_str(), "http://example.com/b.html");
///
/// let url = normalize("img/x.png#frag", &page, &scope).unwrap();
/// assert_eq!(url.as_str(), "http://example.com/a/img/x.png");
/// ```
pub fn normalize(href: &str, page_url: &Url, scope: &CrawlScope) -> UrlResult<Url> {
    let decoded = html_escape::decode_html_entities(href.trim());
    let href: &str = &decoded;

    if href.is_empty() {
        return Err(UrlError::Malformed("empty href".to_string()));
    }

    let resolved = if has_crawl_scheme(href, scope) {
        href.to_string()
    } else if let Some(rest) = href.strip_prefix("//") {
        format!("{}://{}", scope.scheme(), rest)
    } else if href.starts_with('/') {
        format!("{}{}", scope.prefix(), href)
    } else if EXPLICIT_SCHEME_RE.is_match(href) {
        return Err(UrlError::ForeignScheme(href.to_string()));
    } else if href.starts_with("../") {
        collapse_parents(&format!("{}/{}", page_directory(page_url), href))
    } else {
        format!("{}/{}", page_directory(page_url), href)
    };

    canonicalize(&resolved)
}

/// Parses and canonicalizes the seed URL of a crawl
pub fn parse_seed(seed: &str) -> UrlResult<Url> {
    let url = Url::parse(seed.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", seed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS seeds are supported, got: {}",
            url.scheme()
        )));
    }

    canonicalize(url.as_str())
}

/// Case-insensitive check for the crawl's `scheme://` prefix
fn has_crawl_scheme(href: &str, scope: &CrawlScope) -> bool {
    let prefix = format!("{}://", scope.scheme());
    href.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(&prefix))
}

/// The page URL without its query, up to (not including) the last `/`
fn page_directory(page_url: &Url) -> &str {
    let without_query = &page_url[..Position::AfterPath];
    match without_query.rfind('/') {
        Some(idx) => &without_query[..idx],
        None => without_query,
    }
}

/// Collapses every `segment/..` pair in the path of an absolute URL string
///
/// Only the path is touched, so a run of `..` can never eat into the host.
/// Ascents above the root are discarded.
fn collapse_parents(resolved: &str) -> String {
    let Some(authority_end) = resolved.find("://").map(|i| i + 3) else {
        return resolved.to_string();
    };
    let Some(path_start) = resolved[authority_end..].find('/').map(|p| authority_end + p) else {
        return resolved.to_string();
    };

    let (authority, rest) = resolved.split_at(path_start);
    let suffix_start = rest.find(['?', '#']).unwrap_or(rest.len());
    let (path, suffix) = rest.split_at(suffix_start);

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/').skip(1) {
        if segment == ".." {
            segments.pop();
        } else {
            segments.push(segment);
        }
    }

    let mut collapsed = format!("{}/{}", authority, segments.join("/"));
    if path.ends_with("/..") && !collapsed.ends_with('/') {
        collapsed.push('/');
    }
    collapsed.push_str(suffix);
    collapsed
}

/// Parses a resolved URL and reduces it to `scheme://host[:port]/path[?query]`
fn canonicalize(resolved: &str) -> UrlResult<Url> {
    let mut url =
        Url::parse(resolved).map_err(|e| UrlError::Malformed(format!("{}: {}", resolved, e)))?;

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost(resolved.to_string()));
    }

    url.set_fragment(None);
    // Only fails for URLs that cannot carry credentials at all
    let _ = url.set_username("");
    let _ = url.set_password(None);
    if url.query() == Some("") {
        url.set_query(None);
    }

    Ok(url)
}
