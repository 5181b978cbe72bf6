//! Statistics over a finished crawl
//!
//! This module summarizes a result set and prints it the way the CLI shows
//! it after a run.

use crate::crawler::CrawlResult;
use std::collections::BTreeMap;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Total number of results
    pub total_pages: u64,

    /// Pages that completed an HTTP exchange with a status below 400
    pub successful: u64,

    /// Pages that completed with a 4xx or 5xx status
    pub http_errors: u64,

    /// Pages whose fetch failed at the transport level
    pub transport_failures: u64,

    /// Sum of raw link counts over all pages
    pub total_links: u64,

    /// Count of pages per HTTP status code (transport failures excluded)
    pub pages_by_status: BTreeMap<u16, u64>,
}

impl CrawlStatistics {
    /// Computes statistics for a result set
    pub fn from_results(results: &[CrawlResult]) -> Self {
        let mut stats = Self::default();

        for result in results {
            stats.total_pages += 1;
            stats.total_links += result.link_count as u64;

            if result.is_transport_failure() {
                stats.transport_failures += 1;
                continue;
            }

            *stats.pages_by_status.entry(result.status).or_insert(0) += 1;
            if result.is_http_error() {
                stats.http_errors += 1;
            } else {
                stats.successful += 1;
            }
        }

        stats
    }

    /// Returns the success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_pages == 0 {
            return 0.0;
        }
        (self.successful as f64 / self.total_pages as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Total pages crawled: {}", stats.total_pages);
    println!("  Total links found: {}", stats.total_links);
    println!("  Transport failures: {}", stats.transport_failures);
    println!("  HTTP errors (4xx/5xx): {}", stats.http_errors);
    println!();

    if !stats.pages_by_status.is_empty() {
        println!("Pages by Status:");
        for (status, count) in &stats.pages_by_status {
            let percentage = (*count as f64 / stats.total_pages as f64) * 100.0;
            println!("  {}: {} ({:.1}%)", status, count, percentage);
        }
        println!();
    }

    println!(
        "Success Rate: {:.1}% ({} / {} pages fetched without error)",
        stats.success_rate(),
        stats.successful,
        stats.total_pages
    );
}
