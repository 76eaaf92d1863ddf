//! Event sink trait and event types
//!
//! The scheduler reports what it does as `CrawlEvent`s; how they are rendered
//! (log lines, a progress bar, a test recorder) is up to the sink.

use std::path::PathBuf;
use std::time::Duration;

/// Something that happened during a crawl
#[derive(Debug, Clone, PartialEq)]
pub enum CrawlEvent {
    /// A URL was fully handled
    Progress {
        url: String,
        /// URLs still pending after this one
        queue_depth: usize,
    },

    /// A GET failed; the URL is still marked handled
    FetchFailed { url: String, error: String },

    /// No candidate encoding decoded the page; it yields no links
    DecodeFailed { url: String, error: String },

    /// Writing the mirrored file failed
    StoreFailed {
        url: String,
        path: PathBuf,
        error: String,
    },

    /// A resource was written to the mirror
    Stored {
        url: String,
        path: PathBuf,
        bytes: usize,
    },

    /// The frontier drained
    Finished {
        pages_handled: u64,
        elapsed: Duration,
    },
}

/// Receives crawl events
pub trait EventSink {
    fn emit(&mut self, event: CrawlEvent);
}

/// Renders events as `tracing` log lines
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: CrawlEvent) {
        match event {
            CrawlEvent::Progress { url, queue_depth } => {
                tracing::info!("Handled: {} [{}]", url, queue_depth);
            }
            CrawlEvent::FetchFailed { url, error } => {
                tracing::warn!("Fetch failed: {}: {}", url, error);
            }
            CrawlEvent::DecodeFailed { url, error } => {
                tracing::warn!("Decode failed: {}: {}", url, error);
            }
            CrawlEvent::StoreFailed { url, path, error } => {
                tracing::warn!("Store failed: {} -> {}: {}", url, path.display(), error);
            }
            CrawlEvent::Stored { url, path, bytes } => {
                tracing::debug!("Stored {} ({} bytes) at {}", url, bytes, path.display());
            }
            CrawlEvent::Finished {
                pages_handled,
                elapsed,
            } => {
                tracing::info!(
                    "Mirror complete: {} pages handled in {:.2}s",
                    pages_handled,
                    elapsed.as_secs_f64()
                );
            }
        }
    }
}

/// Keeps every event in memory
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub events: Vec<CrawlEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: CrawlEvent) {
        self.events.push(event);
    }
}
