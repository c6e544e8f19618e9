//! HTML extraction for listing and product pages
//!
//! All knowledge of the storefront markup lives here, behind [`Selectors`]:
//! - Product links on a listing page
//! - Title, price and gallery image on a product page
//! - The specification table as label/value pairs

use crate::config::SelectorConfig;
use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};

/// Compiled CSS selectors for the storefront
#[derive(Debug, Clone)]
pub struct Selectors {
    product_link: Selector,
    title: Selector,
    price: Selector,
    image: Selector,
    spec_table: Selector,
    spec_row: Selector,
    spec_label: Selector,
    spec_value: Selector,
}

impl Selectors {
    /// Parses every selector once
    ///
    /// # Returns
    ///
    /// * `Ok(Selectors)` - All selectors parsed
    /// * `Err(ConfigError::InvalidSelector)` - The first selector that failed
    pub fn compile(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            product_link: parse_selector("product-link", &config.product_link)?,
            title: parse_selector("title", &config.title)?,
            price: parse_selector("price", &config.price)?,
            image: parse_selector("image", &config.image)?,
            spec_table: parse_selector("spec-table", &config.spec_table)?,
            spec_row: parse_selector("spec-row", &config.spec_row)?,
            spec_label: parse_selector("spec-label", &config.spec_label)?,
            spec_value: parse_selector("spec-value", &config.spec_value)?,
        })
    }
}

fn parse_selector(field: &str, selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        field: field.to_string(),
        message: format!("{:?}", e),
    })
}

/// Fields scraped from one product page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDetails {
    pub title: String,
    pub price: String,
    pub img_url: String,
    /// Specification label/value pairs in table order, labels verbatim
    pub specs: Vec<(String, String)>,
}

/// Extracts product link hrefs from a listing page
///
/// Links are returned in document order as they appear in the markup
/// (usually site-relative paths). Duplicates are kept; elements without an
/// `href` are skipped.
///
/// # Example
///
/// ```
/// use ankur_scrape::config::SelectorConfig;
/// use ankur_scrape::crawler::{extract_product_links, Selectors};
///
/// let selectors = Selectors::compile(&SelectorConfig::default()).unwrap();
/// let html = r#"<a class="product-title h6" href="/products/orb">Orb</a>"#;
/// assert_eq!(extract_product_links(html, &selectors), vec!["/products/orb"]);
/// ```
pub fn extract_product_links(html: &str, selectors: &Selectors) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(&selectors.product_link)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.to_string())
        .collect()
}

/// Extracts title, price, image URL and specifications from a product page
///
/// Missing elements yield empty strings; a missing specification table
/// yields no specifications.
pub fn extract_product(html: &str, selectors: &Selectors) -> ProductDetails {
    let document = Html::parse_document(html);

    let title = first_text(&document, &selectors.title);
    let price = first_text(&document, &selectors.price);
    let img_url = document
        .select(&selectors.image)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(|src| src.trim().to_string())
        .unwrap_or_default();

    let specs = document
        .select(&selectors.spec_table)
        .next()
        .map(|table| extract_specs(table, selectors))
        .unwrap_or_default();

    ProductDetails {
        title,
        price,
        img_url,
        specs,
    }
}

/// Reads label/value pairs from the specification table
///
/// Rows without both cells are skipped. A label repeated within the table
/// keeps its first position and takes the last value.
fn extract_specs(table: ElementRef<'_>, selectors: &Selectors) -> Vec<(String, String)> {
    let mut specs: Vec<(String, String)> = Vec::new();

    for row in table.select(&selectors.spec_row) {
        let label = row.select(&selectors.spec_label).next();
        let value = row.select(&selectors.spec_value).next();

        let (Some(label), Some(value)) = (label, value) else {
            continue;
        };

        let key = stripped_text(label);
        let value = stripped_text(value);

        match specs.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => specs.push((key, value)),
        }
    }

    specs
}

fn first_text(document: &Html, selector: &Selector) -> String {
    document
        .select(selector)
        .next()
        .map(stripped_text)
        .unwrap_or_default()
}

/// Joins every descendant text node, each trimmed, with no separator
fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
