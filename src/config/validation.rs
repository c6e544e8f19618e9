use crate::config::types::{Config, FetchConfig, OutputConfig, SelectorConfig, SiteConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_fetch_config(&config.fetch)?;
    validate_output_config(&config.output)?;
    validate_selectors(&config.selectors)?;
    Ok(())
}

/// Validates the storefront URL and category list
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    if config.categories.is_empty() {
        return Err(ConfigError::Validation(
            "at least one category is required".to_string(),
        ));
    }

    for category in &config.categories {
        validate_category(category)?;
    }

    if config.max_pages_per_category < 1 {
        return Err(ConfigError::Validation(
            "max-pages-per-category must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// A category becomes one path segment of the listing URL
fn validate_category(category: &str) -> Result<(), ConfigError> {
    if category.is_empty() {
        return Err(ConfigError::Validation(
            "category cannot be empty".to_string(),
        ));
    }

    if category
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#'))
    {
        return Err(ConfigError::Validation(format!(
            "category '{}' must be a single URL path segment",
            category
        )));
    }

    Ok(())
}

/// Validates the retry policy
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if !config.backoff_factor.is_finite() || !(0.0..=60.0).contains(&config.backoff_factor) {
        return Err(ConfigError::Validation(format!(
            "backoff-factor must be between 0 and 60 seconds, got {}",
            config.backoff_factor
        )));
    }

    if config.max_retries > 10 {
        return Err(ConfigError::Validation(format!(
            "max-retries must be <= 10, got {}",
            config.max_retries
        )));
    }

    for status in &config.retry_statuses {
        if !(100..=599).contains(status) {
            return Err(ConfigError::Validation(format!(
                "retry-statuses contains invalid HTTP status {}",
                status
            )));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Every selector must be non-empty and parse as CSS
fn validate_selectors(config: &SelectorConfig) -> Result<(), ConfigError> {
    for (field, selector) in config.fields() {
        if selector.trim().is_empty() {
            return Err(ConfigError::InvalidSelector {
                field: field.to_string(),
                message: "selector cannot be empty".to_string(),
            });
        }

        Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
            field: field.to_string(),
            message: format!("{:?}", e),
        })?;
    }

    Ok(())
}
