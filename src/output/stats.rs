//! Statistics collected over one crawl run

use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlStatistics {
    /// URLs taken off the frontier and handled
    pub pages_handled: u64,

    /// URLs accepted into the frontier, seed included
    pub urls_enqueued: u64,

    /// Files written to the mirror
    pub files_written: u64,

    /// URLs whose mapped file already existed
    pub files_skipped: u64,

    /// Failed GET requests (text and raw fetches)
    pub fetch_failures: u64,

    /// Pages no candidate encoding could decode
    pub decode_failures: u64,

    /// Failed writes
    pub storage_failures: u64,

    /// Hrefs the normalizer rejected, foreign schemes such as `mailto:` included
    pub rejected_links: u64,

    /// Links pointing at another origin
    pub out_of_scope_links: u64,

    /// Wall-clock time of the run
    pub elapsed: Duration,
}

impl CrawlStatistics {
    /// Total failures of any kind
    pub fn failures(&self) -> u64 {
        self.fetch_failures + self.decode_failures + self.storage_failures
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Mirror Statistics ===\n");

    println!("Overview:");
    println!("  Pages handled: {}", stats.pages_handled);
    println!("  URLs enqueued: {}", stats.urls_enqueued);
    println!("  Files written: {}", stats.files_written);
    println!("  Files already present: {}", stats.files_skipped);
    println!("  Off-site links ignored: {}", stats.out_of_scope_links);
    println!();

    if stats.failures() > 0 || stats.rejected_links > 0 {
        println!("Errors:");
        println!("  Fetch failures: {}", stats.fetch_failures);
        println!("  Decode failures: {}", stats.decode_failures);
        println!("  Storage failures: {}", stats.storage_failures);
        println!("  Rejected links skipped: {}", stats.rejected_links);
        println!();
    }

    println!("Elapsed: {:.2}s", stats.elapsed.as_secs_f64());
}
