//! Crawler module for storefront page fetching and processing
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching with retry logic
//! - Category pagination
//! - HTML extraction of product links and product fields
//! - Overall scrape coordination

mod coordinator;
mod extractor;
mod fetcher;
mod paginator;

pub use coordinator::{run_scrape, Coordinator};
pub use extractor::{extract_product, extract_product_links, ProductDetails, Selectors};
pub use fetcher::{backoff_delay, build_http_client, fetch_url, FetchResult};
pub use paginator::list_pages;

use crate::config::Config;
use crate::output::ScrapeStatistics;
use crate::ScrapeError;

/// Runs a complete scrape operation
///
/// This is the main entry point for starting a scrape. It will:
/// 1. Build the HTTP client
/// 2. Enumerate listing pages for every category
/// 3. Fetch every product page and extract its fields
/// 4. Write the accumulated table as CSV
///
/// # Arguments
///
/// * `config` - The scraper configuration
///
/// # Returns
///
/// * `Ok(ScrapeStatistics)` - Scrape completed and CSV written
/// * `Err(ScrapeError)` - Scrape could not start or the CSV could not be written
pub async fn scrape(config: Config) -> Result<ScrapeStatistics, ScrapeError> {
    run_scrape(config).await
}
