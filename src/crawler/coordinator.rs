//! Scrape coordinator - main orchestration logic
//!
//! This module contains the main scrape loop, which walks
//! categories → listing pages → product links → product pages strictly in
//! sequence and appends one row per product to the result table.
//! Failures are contained at the page or product they occur in.

use crate::config::Config;
use crate::crawler::extractor::{extract_product, extract_product_links, Selectors};
use crate::crawler::fetcher::{build_http_client, fetch_url};
use crate::crawler::paginator::list_pages;
use crate::output::{write_csv, ProductRecord, ResultTable, ScrapeStatistics};
use crate::url::product_url;
use crate::ScrapeError;
use reqwest::Client;
use std::path::Path;

/// Main scrape coordinator structure
pub struct Coordinator {
    config: Config,
    selectors: Selectors,
    client: Client,
    stats: ScrapeStatistics,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Selectors compiled and HTTP client built
    /// * `Err(ScrapeError)` - Invalid selector or client construction failure
    pub fn new(config: Config) -> Result<Self, ScrapeError> {
        let selectors = Selectors::compile(&config.selectors)?;
        let client = build_http_client(&config.fetch)?;

        Ok(Self {
            config,
            selectors,
            client,
            stats: ScrapeStatistics::start(),
        })
    }

    /// Statistics collected so far
    pub fn stats(&self) -> &ScrapeStatistics {
        &self.stats
    }

    /// Runs the main scrape loop
    ///
    /// Returns the accumulated table; nothing is written here.
    pub async fn run(&mut self) -> Result<ResultTable, ScrapeError> {
        tracing::info!(
            "Starting scrape of {} ({} categories)",
            self.config.site.base_url,
            self.config.site.categories.len()
        );

        let mut table = ResultTable::new();
        let categories = self.config.site.categories.clone();

        for category in &categories {
            self.scrape_category(category, &mut table).await?;
            self.stats.categories += 1;
        }

        self.stats.columns = table.column_count() as u64;
        tracing::info!(
            "Scrape finished: {} product(s), {} column(s)",
            table.len(),
            table.column_count()
        );

        Ok(table)
    }

    /// Scrapes every listing page of one category
    async fn scrape_category(
        &mut self,
        category: &str,
        table: &mut ResultTable,
    ) -> Result<(), ScrapeError> {
        let pages = list_pages(&self.client, &self.config, &self.selectors, category).await?;
        self.stats.listing_pages += pages.len() as u64;

        for page_url in &pages {
            // Listing pages are fetched again here; the paginator keeps only URLs
            let Some(body) = fetch_url(&self.client, &self.config.fetch, page_url)
                .await
                .into_body()
            else {
                self.stats.listing_pages_skipped += 1;
                continue;
            };

            let links = extract_product_links(&body, &self.selectors);
            tracing::debug!("{} product link(s) on {}", links.len(), page_url);
            self.stats.product_links += links.len() as u64;

            for link in &links {
                self.scrape_product(category, link, table).await;
            }
        }

        Ok(())
    }

    /// Fetches one product page and appends its row; failures skip the product
    async fn scrape_product(&mut self, category: &str, link: &str, table: &mut ResultTable) {
        let url = match product_url(&self.config.site.base_url, link) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Skipping product link '{}': {}", link, e);
                self.stats.products_skipped += 1;
                return;
            }
        };

        let Some(body) = fetch_url(&self.client, &self.config.fetch, &url)
            .await
            .into_body()
        else {
            self.stats.products_skipped += 1;
            return;
        };

        let details = extract_product(&body, &self.selectors);
        tracing::debug!(
            "Scraped '{}' ({} specification(s)) from {}",
            details.title,
            details.specs.len(),
            url
        );

        table.append(ProductRecord::new(category, details).into_row());
        self.stats.products_scraped += 1;
    }

    /// Consumes the coordinator, returning its statistics
    pub fn into_stats(self) -> ScrapeStatistics {
        self.stats
    }
}

/// Runs the complete scrape operation
///
/// 1. Compile selectors and build the HTTP client
/// 2. Walk every category, listing page and product page
/// 3. Write the table to the configured CSV path
///
/// # Example
///
/// ```no_run
/// use ankur_scrape::config::Config;
/// use ankur_scrape::crawler::run_scrape;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let stats = run_scrape(Config::default()).await?;
/// println!("{} products", stats.products_scraped);
/// # Ok(())
/// # }
/// ```
pub async fn run_scrape(config: Config) -> Result<ScrapeStatistics, ScrapeError> {
    let output_path = config.output.csv_path.clone();
    let write_bom = config.output.write_bom;

    let mut coordinator = Coordinator::new(config)?;
    let table = coordinator.run().await?;

    write_csv(&table, Path::new(&output_path), write_bom)?;

    let mut stats = coordinator.into_stats();
    stats.output_path = Some(output_path);
    stats.finish();
    Ok(stats)
}
