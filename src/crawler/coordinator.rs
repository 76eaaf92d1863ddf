//! Mirror coordinator - main crawl loop
//!
//! This module contains the loop that drives a mirror run:
//! - Taking URLs off the frontier in breadth-first order
//! - Fetching and decoding markup pages and extracting their links
//! - Storing every resource once at its mapped path
//! - Reporting progress and failures to the event sink
//!
//! No per-URL failure stops the run; the loop ends only when the frontier
//! is empty.

use crate::config::{validate, Config};
use crate::crawler::decode::EncodingPreferences;
use crate::crawler::fetcher::{build_http_client, fetch};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::extract_links;
use crate::output::{CrawlEvent, CrawlStatistics, EventSink, TracingSink};
use crate::state::CrawlPhase;
use crate::storage::{FsStore, ResourceStore};
use crate::url::{is_markup_path, map_path, CrawlScope};
use crate::{FetchError, MirrorError, Result};
use reqwest::Client;
use std::path::Path;
use std::time::Instant;
use url::Url;

/// Owns all state of one mirror run
///
/// The frontier and the encoding preferences live here and are only touched
/// through `&mut self`, so the run needs no locking.
pub struct Mirror<S: ResourceStore = FsStore, E: EventSink = TracingSink> {
    config: Config,
    scope: CrawlScope,
    frontier: Frontier,
    encodings: EncodingPreferences,
    client: Client,
    store: S,
    sink: E,
    phase: CrawlPhase,
    stats: CrawlStatistics,
}

impl Mirror {
    /// Creates a mirror that writes under `config.crawler.root_dir` and logs
    /// through `tracing`
    ///
    /// # Errors
    ///
    /// Fails if the seed is not an absolute http(s) URL, if an encoding label
    /// is unknown, or if the HTTP client cannot be built.
    pub fn new(seed: &str, config: Config) -> Result<Self> {
        let store = FsStore::new(config.crawler.root_dir.clone());
        Self::with_parts(seed, config, store, TracingSink)
    }
}

impl<S: ResourceStore, E: EventSink> Mirror<S, E> {
    /// Creates a mirror with a custom store and event sink
    ///
    /// Fails on an invalid config, including one edited after loading.
    pub fn with_parts(seed: &str, config: Config, store: S, sink: E) -> Result<Self> {
        validate(&config)?;
        let (scope, seed) = CrawlScope::from_seed(seed)?;
        let encodings = EncodingPreferences::from_labels(&config.decoding.encodings)?;
        let client = build_http_client(&config.crawler)?;

        tracing::debug!(
            "Crawl locked to {} with encodings {:?}",
            scope.prefix(),
            encodings.names()
        );

        Ok(Self {
            config,
            scope,
            frontier: Frontier::with_seed(seed),
            encodings,
            client,
            store,
            sink,
            phase: CrawlPhase::Idle,
            stats: CrawlStatistics {
                urls_enqueued: 1,
                ..Default::default()
            },
        })
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    pub fn scope(&self) -> &CrawlScope {
        &self.scope
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn encodings(&self) -> &EncodingPreferences {
        &self.encodings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn sink(&self) -> &E {
        &self.sink
    }

    pub fn stats(&self) -> &CrawlStatistics {
        &self.stats
    }

    fn root(&self) -> &Path {
        &self.config.crawler.root_dir
    }

    /// Runs the crawl until the frontier is empty
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlStatistics)` - The frontier drained
    /// * `Err(MirrorError::InvalidTransition)` - The mirror was already run
    pub async fn run(&mut self) -> Result<CrawlStatistics> {
        self.transition(CrawlPhase::Running)?;
        tracing::info!(
            "Mirroring {} into {}",
            self.scope.prefix(),
            self.root().display()
        );

        let start_time = Instant::now();

        while let Some(url) = self.frontier.next_url() {
            if self.frontier.is_empty() && self.phase == CrawlPhase::Running {
                self.transition(CrawlPhase::Draining)?;
            }

            self.handle_url(url).await;

            if !self.frontier.is_empty() && self.phase == CrawlPhase::Draining {
                self.transition(CrawlPhase::Running)?;
            }
        }

        self.stats.elapsed = start_time.elapsed();
        self.transition(CrawlPhase::Done)?;

        self.sink.emit(CrawlEvent::Finished {
            pages_handled: self.stats.pages_handled,
            elapsed: self.stats.elapsed,
        });

        Ok(self.stats.clone())
    }

    /// Handles a single URL
    ///
    /// 1. Markup pages are fetched, decoded and scanned for links
    /// 2. The resource is stored unless its file already exists, reusing the
    ///    body from step 1 when there is one
    async fn handle_url(&mut self, url: Url) {
        let path = map_path(&url, self.root());
        let mut body = None;

        if is_markup_path(&path, &self.config.crawler.markup_extensions) {
            match fetch(&self.client, &url).await {
                Ok(bytes) => {
                    self.discover_links(&url, &bytes);
                    body = Some(bytes);
                }
                Err(e) => self.record_fetch_failure(&url, e),
            }
        }

        if self.store.exists(&path) {
            tracing::debug!("Already mirrored: {} at {}", url, path.display());
            self.stats.files_skipped += 1;
        } else {
            let bytes = match body {
                Some(bytes) => Some(bytes),
                None => match fetch(&self.client, &url).await {
                    Ok(bytes) => Some(bytes),
                    Err(e) => {
                        self.record_fetch_failure(&url, e);
                        None
                    }
                },
            };

            if let Some(bytes) = bytes {
                self.store_resource(&url, &path, &bytes);
            }
        }

        self.stats.pages_handled += 1;
        self.sink.emit(CrawlEvent::Progress {
            url: url.to_string(),
            queue_depth: self.frontier.pending_len(),
        });
    }

    /// Decodes a page body and enqueues every new in-scope link
    fn discover_links(&mut self, url: &Url, bytes: &[u8]) {
        let text = match self.encodings.decode(bytes) {
            Ok(text) => text,
            Err(e) => {
                self.stats.decode_failures += 1;
                self.sink.emit(CrawlEvent::DecodeFailed {
                    url: url.to_string(),
                    error: e.to_string(),
                });
                String::new()
            }
        };

        let mut links = extract_links(&text, url, &self.scope);
        let accepted = self.frontier.offer_all(links.by_ref());

        self.stats.urls_enqueued += accepted as u64;
        self.stats.rejected_links += links.rejected() as u64;
        self.stats.out_of_scope_links += links.out_of_scope() as u64;
        tracing::debug!("Found {} new links on {}", accepted, url);
    }

    fn store_resource(&mut self, url: &Url, path: &Path, bytes: &[u8]) {
        match self.store.write(path, bytes) {
            Ok(()) => {
                self.stats.files_written += 1;
                self.sink.emit(CrawlEvent::Stored {
                    url: url.to_string(),
                    path: path.to_path_buf(),
                    bytes: bytes.len(),
                });
            }
            Err(e) => {
                self.stats.storage_failures += 1;
                self.sink.emit(CrawlEvent::StoreFailed {
                    url: url.to_string(),
                    path: path.to_path_buf(),
                    error: e.to_string(),
                });
            }
        }
    }

    fn record_fetch_failure(&mut self, url: &Url, error: FetchError) {
        self.stats.fetch_failures += 1;
        self.sink.emit(CrawlEvent::FetchFailed {
            url: url.to_string(),
            error: error.to_string(),
        });
    }

    fn transition(&mut self, next: CrawlPhase) -> Result<()> {
        if !self.phase.can_transition_to(next) {
            return Err(MirrorError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        tracing::debug!("Crawl phase {} -> {}", self.phase, next);
        self.phase = next;
        Ok(())
    }
}

/// Runs a complete mirror with the filesystem store
///
/// # Example
///
/// ```no_run
/// use site_mirror::config::Config;
/// use site_mirror::crawler::run_mirror;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let stats = run_mirror("http://example.com/", Config::default()).await?;
/// println!("{} pages handled", stats.pages_handled);
/// # Ok(())
/// # }
/// ```
pub async fn run_mirror(seed: &str, config: Config) -> Result<CrawlStatistics> {
    let mut mirror = Mirror::new(seed, config)?;
    mirror.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::RecordingSink;
    use crate::storage::MemoryStore;
    use crate::{ConfigError, UrlError};

    fn test_mirror(seed: &str) -> Mirror<MemoryStore, RecordingSink> {
        Mirror::with_parts(
            seed,
            Config::default(),
            MemoryStore::new(),
            RecordingSink::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_mirror_is_idle_and_seeded() {
        let mirror = test_mirror("http://example.com/a/index.html#top");

        assert_eq!(mirror.phase(), CrawlPhase::Idle);
        assert_eq!(mirror.frontier().pending_len(), 1);
        assert_eq!(
            mirror.frontier().pending().next().map(Url::as_str),
            Some("http://example.com/a/index.html")
        );
        assert_eq!(mirror.scope().prefix(), "http://example.com");
        assert_eq!(mirror.stats().urls_enqueued, 1);
    }

    #[test]
    fn test_bad_seed_rejected() {
        let result = Mirror::with_parts(
            "ftp://example.com/",
            Config::default(),
            MemoryStore::new(),
            RecordingSink::default(),
        );
        assert!(matches!(
            result,
            Err(MirrorError::Url(UrlError::InvalidScheme(_)))
        ));
    }

    #[test]
    fn test_unknown_encoding_rejected() {
        let mut config = Config::default();
        config.decoding.encodings = vec!["no-such-charset".to_string()];
        let result = Mirror::with_parts(
            "http://example.com/",
            config,
            MemoryStore::new(),
            RecordingSink::default(),
        );
        assert!(matches!(result, Err(MirrorError::Config(_))));
    }

    #[test]
    fn test_empty_root_override_rejected() {
        let mut config = Config::default();
        config.crawler.root_dir = std::path::PathBuf::new();
        let result = Mirror::with_parts(
            "http://example.com/",
            config,
            MemoryStore::new(),
            RecordingSink::default(),
        );
        assert!(matches!(
            result,
            Err(MirrorError::Config(ConfigError::Validation(_)))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_seed_still_terminates() {
        let mut mirror = test_mirror("http://127.0.0.1:9/");

        let stats = mirror.run().await.unwrap();

        assert_eq!(mirror.phase(), CrawlPhase::Done);
        assert_eq!(stats.pages_handled, 1);
        // Text fetch and raw download both attempted
        assert_eq!(stats.fetch_failures, 2);
        assert_eq!(stats.files_written, 0);
        assert_eq!(mirror.store().write_count(), 0);
        assert!(matches!(
            mirror.sink().events.last(),
            Some(CrawlEvent::Finished { pages_handled: 1, .. })
        ));
    }

    #[tokio::test]
    async fn test_second_run_rejected() {
        let mut mirror = test_mirror("http://127.0.0.1:9/");
        mirror.run().await.unwrap();

        let again = mirror.run().await;
        assert!(matches!(
            again,
            Err(MirrorError::InvalidTransition {
                from: CrawlPhase::Done,
                to: CrawlPhase::Running
            })
        ));
    }
}
