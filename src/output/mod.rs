//! Output module for crawl events and summaries
//!
//! This module handles:
//! - The structured event interface the scheduler reports to
//! - Recording and printing run statistics

pub mod stats;
mod traits;

pub use stats::{print_statistics, CrawlStatistics};
pub use traits::{CrawlEvent, EventSink, RecordingSink, TracingSink};
