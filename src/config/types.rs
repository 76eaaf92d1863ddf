use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Markup extensions whose bodies are scanned for links
pub const DEFAULT_MARKUP_EXTENSIONS: &[&str] =
    &["html", "htm", "asp", "aspx", "jsp", "action", "php", "do"];

/// Candidate encodings, tried in order when decoding page text
pub const DEFAULT_ENCODINGS: &[&str] = &["utf-8", "gbk", "iso-8859-1"];

/// Main configuration structure for Site-Mirror
///
/// Every section is optional in the TOML file; missing keys fall back to the
/// defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub decoding: DecodingConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Local directory the mirror is written under
    #[serde(rename = "root-dir")]
    pub root_dir: PathBuf,

    /// Whole-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Connection timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// File extensions treated as parseable for links
    #[serde(rename = "markup-extensions")]
    pub markup_extensions: Vec<String>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("./pages"),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            markup_extensions: DEFAULT_MARKUP_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl CrawlerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Text decoding configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DecodingConfig {
    /// WHATWG encoding labels, in initial preference order
    pub encodings: Vec<String>,
}

impl Default for DecodingConfig {
    fn default() -> Self {
        Self {
            encodings: DEFAULT_ENCODINGS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
