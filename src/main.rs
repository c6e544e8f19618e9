//! Ankur-Scrape main entry point
//!
//! This is the command-line interface for the Ankur-Scrape product scraper.

use ankur_scrape::config::{load_config_with_hash, validate, Config};
use ankur_scrape::crawler::scrape;
use ankur_scrape::output::print_statistics;
use ankur_scrape::url::listing_page_url;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Ankur-Scrape: a storefront product table scraper
///
/// Ankur-Scrape walks every category listing of the storefront, visits each
/// product page, and writes title, price, image and specification columns
/// to a CSV file. Without a configuration file the built-in storefront,
/// categories and output path are used.
#[derive(Parser, Debug)]
#[command(name = "ankur-scrape")]
#[command(version)]
#[command(about = "A storefront product table scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (optional)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Write the CSV here instead of the configured path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be scraped without sending requests
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using built-in storefront settings");
            Config::default()
        }
    };

    if let Some(output) = &cli.output {
        config.output.csv_path = output.display().to_string();
    }
    validate(&config).context("invalid configuration")?;

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else {
        handle_scrape(config, cli.quiet).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ankur_scrape=info,warn"),
            1 => EnvFilter::new("ankur_scrape=debug,info"),
            2 => EnvFilter::new("ankur_scrape=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the resolved configuration
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Ankur-Scrape Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!(
        "  Max pages per category: {}",
        config.site.max_pages_per_category
    );

    println!("\nFetch:");
    println!("  Max retries: {}", config.fetch.max_retries);
    println!("  Backoff factor: {}s", config.fetch.backoff_factor);
    println!("  Timeout: {}s", config.fetch.timeout_secs);
    println!("  Retry statuses: {:?}", config.fetch.retry_statuses);
    println!("  User agent: {}", config.fetch.user_agent);

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);
    println!("  UTF-8 BOM: {}", config.output.write_bom);

    println!("\nSelectors:");
    for (field, selector) in config.selectors.fields() {
        println!("  {}: {}", field, selector);
    }

    println!("\nCategories ({}):", config.site.categories.len());
    for category in &config.site.categories {
        let first_page = listing_page_url(&config.site.base_url, category, 1)
            .with_context(|| format!("invalid category '{}'", category))?;
        println!("  - {} ({})", category, first_page);
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main scrape operation
async fn handle_scrape(config: Config, quiet: bool) -> anyhow::Result<()> {
    let output_path = config.output.csv_path.clone();

    match scrape(config).await {
        Ok(stats) => {
            tracing::info!("Scrape completed successfully");
            if !quiet {
                print_statistics(&stats);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            Err(e).with_context(|| format!("scrape did not produce {}", output_path))
        }
    }
}
