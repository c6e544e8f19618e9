//! Configuration module for Ankur-Scrape
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Without a file, [`Config::default`] describes the built-in storefront.
//!
//! # Example
//!
//! ```no_run
//! use ankur_scrape::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scrape.toml")).unwrap();
//! println!("Scraping {} categories", config.site.categories.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, FetchConfig, OutputConfig, SelectorConfig, SiteConfig, DEFAULT_BASE_URL,
    DEFAULT_CATEGORIES,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
