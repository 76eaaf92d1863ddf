//! State module for tracking crawl progress
//!
//! - `CrawlPhase`: the scheduler's run-level state machine

mod crawl_phase;

pub use crawl_phase::CrawlPhase;
