//! URL construction for listing and product pages
//!
//! Listing pages live at `{base}/collections/{category}?page={n}`; product
//! links found on them are relative paths resolved against the base URL.

use crate::{UrlError, UrlResult};
use url::Url;

/// Builds the URL of one listing page of a category
///
/// # Examples
///
/// ```
/// use ankur_scrape::url::listing_page_url;
///
/// let url = listing_page_url("https://www.ankurlighting.com", "chandeliers", 2).unwrap();
/// assert_eq!(url, "https://www.ankurlighting.com/collections/chandeliers?page=2");
/// ```
pub fn listing_page_url(base_url: &str, category: &str, page: u32) -> UrlResult<String> {
    if category.is_empty() || category.contains(['/', '?', '#']) {
        return Err(UrlError::InvalidCategory(category.to_string()));
    }

    let base = parse_base(base_url)?;
    let mut url = base
        .join(&format!("collections/{}", category))
        .map_err(|e| UrlError::Parse(e.to_string()))?;
    url.query_pairs_mut()
        .clear()
        .append_pair("page", &page.to_string());

    Ok(url.to_string())
}

/// Resolves a product link from a listing page against the base URL
///
/// Site-relative hrefs are appended to the base URL, so a base with a path
/// prefix keeps it. Absolute hrefs are kept as they are.
pub fn product_url(base_url: &str, href: &str) -> UrlResult<String> {
    let href = href.trim();
    let base = parse_base(base_url)?;

    if let Ok(absolute) = Url::parse(href) {
        return Ok(absolute.to_string());
    }

    let joined = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        href.trim_start_matches('/')
    );
    Url::parse(&joined)
        .map(|url| url.to_string())
        .map_err(|e| UrlError::Parse(format!("{}: {}", href, e)))
}

/// Parses the base URL so that relative joins keep any path prefix
fn parse_base(base_url: &str) -> UrlResult<Url> {
    let mut base = Url::parse(base_url).map_err(|e| UrlError::Parse(e.to_string()))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(UrlError::InvalidScheme(base.scheme().to_string()));
    }

    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    Ok(base)
}
