//! Category pagination
//!
//! Walks `?page=1`, `?page=2`, ... for one category until a page has no
//! product links.

use crate::config::Config;
use crate::crawler::extractor::{extract_product_links, Selectors};
use crate::crawler::fetcher::fetch_url;
use crate::url::listing_page_url;
use crate::UrlResult;
use reqwest::Client;

/// Lists the listing-page URLs of a category that contain products
///
/// Pages are requested in ascending order starting at 1. Enumeration stops at
/// the first page that either fails to fetch or holds no product links; that
/// page is not included. A failed fetch is indistinguishable from running out
/// of pages, apart from the warning the fetcher logs. Enumeration also stops
/// after `max-pages-per-category` pages.
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Listing page URLs, in page order
/// * `Err(UrlError)` - The listing URL could not be built for this category
pub async fn list_pages(
    client: &Client,
    config: &Config,
    selectors: &Selectors,
    category: &str,
) -> UrlResult<Vec<String>> {
    let mut pages = Vec::new();
    let mut page_number: u32 = 1;

    loop {
        if page_number > config.site.max_pages_per_category {
            tracing::warn!(
                "Category '{}' reached the limit of {} listing pages, stopping",
                category,
                config.site.max_pages_per_category
            );
            break;
        }

        let url = listing_page_url(&config.site.base_url, category, page_number)?;

        let Some(body) = fetch_url(client, &config.fetch, &url).await.into_body() else {
            tracing::debug!("Stopping '{}' at page {}: fetch failed", category, page_number);
            break;
        };

        if extract_product_links(&body, selectors).is_empty() {
            tracing::debug!(
                "Stopping '{}' at page {}: no product links",
                category,
                page_number
            );
            break;
        }

        tracing::debug!("Listing page found: {}", url);
        pages.push(url);
        page_number += 1;
    }

    tracing::info!("Category '{}': {} listing page(s)", category, pages.len());
    Ok(pages)
}
