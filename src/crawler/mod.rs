//! Crawler module for mirroring a site
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching
//! - Adaptive decoding of page text
//! - Pattern-based link extraction
//! - The pending/visited frontier
//! - The crawl loop that ties them together

mod coordinator;
mod decode;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{run_mirror, Mirror};
pub use decode::EncodingPreferences;
pub use fetcher::{build_http_client, fetch};
pub use frontier::Frontier;
pub use parser::{extract_links, Links};
