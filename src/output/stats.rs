//! Run statistics
//!
//! Counters collected while scraping, reported once the CSV has been written.

use chrono::{DateTime, Utc};

/// Scrape run statistics summary
#[derive(Debug, Clone)]
pub struct ScrapeStatistics {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished (None while running)
    pub finished_at: Option<DateTime<Utc>>,

    /// Categories processed
    pub categories: u64,

    /// Listing pages found by pagination
    pub listing_pages: u64,

    /// Listing pages that could not be fetched on the second pass
    pub listing_pages_skipped: u64,

    /// Product links discovered across all listing pages
    pub product_links: u64,

    /// Products appended to the table
    pub products_scraped: u64,

    /// Products whose page could not be fetched or whose link was invalid
    pub products_skipped: u64,

    /// Columns in the final table
    pub columns: u64,

    /// Where the CSV was written
    pub output_path: Option<String>,
}

impl ScrapeStatistics {
    /// Starts a new statistics record at the current time
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            categories: 0,
            listing_pages: 0,
            listing_pages_skipped: 0,
            product_links: 0,
            products_scraped: 0,
            products_skipped: 0,
            columns: 0,
            output_path: None,
        }
    }

    /// Marks the run as finished now
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Run duration in seconds, once finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }

    /// Share of discovered product links that made it into the table
    pub fn success_rate(&self) -> f64 {
        if self.product_links == 0 {
            return 0.0;
        }
        (self.products_scraped as f64 / self.product_links as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &ScrapeStatistics) {
    println!("=== Scrape Statistics ===\n");

    println!("Run:");
    println!("  Started: {}", stats.started_at.to_rfc3339());
    if let Some(finished) = stats.finished_at {
        println!("  Finished: {}", finished.to_rfc3339());
    }
    if let Some(seconds) = stats.duration_seconds() {
        println!("  Duration: {}s", seconds);
    }
    println!();

    println!("Pages:");
    println!("  Categories: {}", stats.categories);
    println!("  Listing pages: {}", stats.listing_pages);
    println!("  Listing pages skipped: {}", stats.listing_pages_skipped);
    println!();

    println!("Products:");
    println!("  Links found: {}", stats.product_links);
    println!("  Scraped: {}", stats.products_scraped);
    println!("  Skipped: {}", stats.products_skipped);
    println!("  Columns: {}", stats.columns);
    println!();

    if let Some(path) = &stats.output_path {
        println!("Output: {}", path);
    }

    println!(
        "Success Rate: {:.1}% ({} / {} products scraped)",
        stats.success_rate(),
        stats.products_scraped,
        stats.product_links
    );
}
