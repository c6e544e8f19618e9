use serde::Deserialize;

/// Storefront scraped when no configuration file is given
pub const DEFAULT_BASE_URL: &str = "https://www.ankurlighting.com";

/// Categories scraped when no configuration file is given
pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "chandeliers",
    "table-lamps",
    "wall-lights",
    "pendant-lights",
    "floor-lamps",
    "outdoor-lights",
    "ceiling-lights",
    "architectural-lights",
];

/// Main configuration structure for Ankur-Scrape
///
/// Every section is optional; a missing section or key falls back to the
/// built-in storefront defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub selectors: SelectorConfig,
}

/// Which storefront and categories to scrape
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Storefront root, e.g. `https://www.ankurlighting.com`
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Category path segments under `/collections/`
    pub categories: Vec<String>,

    /// Upper bound on listing pages enumerated for one category
    #[serde(rename = "max-pages-per-category")]
    pub max_pages_per_category: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            max_pages_per_category: 500,
        }
    }
}

/// HTTP request and retry policy
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Retries after the first attempt
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Delay before retry n is `backoff_factor * 2^(n-1)` seconds
    #[serde(rename = "backoff-factor")]
    pub backoff_factor: f64,

    /// Per-attempt request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Status codes that trigger a retry
    #[serde(rename = "retry-statuses")]
    pub retry_statuses: Vec<u16>,

    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_retries: 5,
            backoff_factor: 0.3,
            timeout_secs: 10,
            retry_statuses: vec![500, 502, 503, 504],
            user_agent: format!("ankur-scrape/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the CSV file
    #[serde(rename = "csv-path")]
    pub csv_path: String,

    /// Prefix the file with a UTF-8 byte order mark
    #[serde(rename = "write-bom")]
    pub write_bom: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "ankurL2.csv".to_string(),
            write_bom: true,
        }
    }
}

/// CSS selectors describing the storefront markup
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Product title links on a listing page
    #[serde(rename = "product-link")]
    pub product_link: String,

    pub title: String,

    pub price: String,

    /// Gallery image; its `src` attribute is taken
    pub image: String,

    #[serde(rename = "spec-table")]
    pub spec_table: String,

    #[serde(rename = "spec-row")]
    pub spec_row: String,

    #[serde(rename = "spec-label")]
    pub spec_label: String,

    #[serde(rename = "spec-value")]
    pub spec_value: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            product_link: "a.product-title.h6".to_string(),
            title: "h1.product-title.h3".to_string(),
            price: "span.money.conversion-bear-money".to_string(),
            image: "div.product-gallery__media:nth-child(1) > img:nth-child(1)".to_string(),
            spec_table: "table.spec__table".to_string(),
            spec_row: "tr".to_string(),
            spec_label: "th.attr__label".to_string(),
            spec_value: "td.attr__value".to_string(),
        }
    }
}

impl SelectorConfig {
    /// Returns `(field name, selector)` pairs, used for validation and compilation
    pub fn fields(&self) -> [(&'static str, &str); 8] {
        [
            ("product-link", &self.product_link),
            ("title", &self.title),
            ("price", &self.price),
            ("image", &self.image),
            ("spec-table", &self.spec_table),
            ("spec-row", &self.spec_row),
            ("spec-label", &self.spec_label),
            ("spec-value", &self.spec_value),
        ]
    }
}
