use std::path::{Path, PathBuf};
use url::Url;

/// Maps a crawl URL to the local file it is mirrored into
///
/// Directory-like paths (trailing `/`, empty, or a last segment without a
/// `.`) get an `index.html` appended. The query is not part of the path, so
/// URLs differing only by query share one file.
///
/// # Examples
///
/// ```
/// use site_mirror::url::map_path;
/// use std::path::{Path, PathBuf};
/// use url::Url;
///
/// let root = Path::new("./pages");
/// let url = Url::parse("http://example.com/docs/").unwrap();
/// assert_eq!(map_path(&url, root), PathBuf::from("./pages/docs/index.html"));
///
/// let url = Url::parse("http://example.com/docs/intro").unwrap();
/// assert_eq!(map_path(&url, root), PathBuf::from("./pages/docs/intro/index.html"));
/// ```
pub fn map_path(url: &Url, root: &Path) -> PathBuf {
    let mut path = url.path().to_string();

    if path.ends_with('/') {
        path.push_str("index.html");
    } else if path.is_empty() || !path.rsplit('/').next().is_some_and(|s| s.contains('.')) {
        path.push_str("/index.html");
    }

    let mut local = root.to_path_buf();
    for segment in path
        .split('/')
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
    {
        local.push(segment);
    }
    local
}

/// Returns true if the mapped file should be scanned for links
///
/// A path with no extension, or one of `markup_extensions`, counts as markup.
/// A trailing dot (`file.`) is an empty extension, not a missing one, and is
/// stored without scanning.
pub fn is_markup_path(path: &Path, markup_extensions: &[String]) -> bool {
    match path.extension().and_then(|ext| ext.to_str()) {
        None => true,
        Some(ext) => markup_extensions
            .iter()
            .any(|markup| markup.eq_ignore_ascii_case(ext)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MARKUP_EXTENSIONS;

    fn mapped(url: &str) -> PathBuf {
        map_path(&Url::parse(url).unwrap(), Path::new("/tmp/mirror"))
    }

    fn markup() -> Vec<String> {
        DEFAULT_MARKUP_EXTENSIONS.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_root_maps_to_index() {
        assert_eq!(mapped("http://example.com/"), PathBuf::from("/tmp/mirror/index.html"));
        assert_eq!(mapped("http://example.com"), PathBuf::from("/tmp/mirror/index.html"));
    }

    #[test]
    fn test_file_with_extension_kept() {
        assert_eq!(
            mapped("http://example.com/img/x.png"),
            PathBuf::from("/tmp/mirror/img/x.png")
        );
    }

    #[test]
    fn test_extensionless_segment_becomes_directory() {
        assert_eq!(
            mapped("http://example.com/about"),
            PathBuf::from("/tmp/mirror/about/index.html")
        );
    }

    #[test]
    fn test_dot_in_directory_only() {
        assert_eq!(
            mapped("http://example.com/v1.2/readme"),
            PathBuf::from("/tmp/mirror/v1.2/readme/index.html")
        );
    }

    #[test]
    fn test_query_ignored() {
        assert_eq!(
            mapped("http://example.com/list.php?page=3"),
            PathBuf::from("/tmp/mirror/list.php")
        );
    }

    #[test]
    fn test_always_ends_in_file_with_extension() {
        for url in [
            "http://example.com/",
            "http://example.com/a",
            "http://example.com/a/",
            "http://example.com/a/b.css",
            "http://example.com/a//b",
        ] {
            let path = mapped(url);
            assert!(path.starts_with("/tmp/mirror"));
            assert!(path.extension().is_some(), "{} -> {:?}", url, path);
        }
    }

    #[test]
    fn test_markup_detection() {
        let exts = markup();
        assert!(is_markup_path(Path::new("/m/index.html"), &exts));
        assert!(is_markup_path(Path::new("/m/page.PHP"), &exts));
        assert!(is_markup_path(Path::new("/m/login.do"), &exts));
        assert!(is_markup_path(Path::new("/m/LICENSE"), &exts));
        assert!(!is_markup_path(Path::new("/m/img/x.png"), &exts));
        assert!(!is_markup_path(Path::new("/m/style.css"), &exts));
    }

    #[test]
    fn test_trailing_dot_is_not_markup() {
        let path = mapped("http://example.com/dl/file.");
        assert_eq!(path, PathBuf::from("/tmp/mirror/dl/file."));
        assert!(!is_markup_path(&path, &markup()));
    }
}
