//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper, including:
//! - Building the HTTP client with the configured user agent and timeout
//! - GET requests with bounded retries and exponential backoff
//! - Error classification into retryable and terminal failures

use crate::config::FetchConfig;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
        /// Number of attempts made, including the successful one
        attempts: u32,
    },

    /// Non-success status, either not retryable or still failing after the
    /// last retry
    HttpError {
        /// The HTTP status code of the last response
        status_code: u16,
        /// Number of attempts made
        attempts: u32,
    },

    /// Network error (connection refused, timeout, unreadable body)
    NetworkError {
        /// Error description
        error: String,
        /// Number of attempts made
        attempts: u32,
    },
}

impl FetchResult {
    /// Returns true if the page body was retrieved
    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success { .. })
    }

    /// Number of requests that were sent for this URL
    pub fn attempts(&self) -> u32 {
        match self {
            FetchResult::Success { attempts, .. }
            | FetchResult::HttpError { attempts, .. }
            | FetchResult::NetworkError { attempts, .. } => *attempts,
        }
    }

    /// Consumes the result, returning the body on success
    pub fn into_body(self) -> Option<String> {
        match self {
            FetchResult::Success { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Outcome of a single attempt, before the retry decision
enum Attempt {
    Done(FetchResult),
    Retry(FetchResult),
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetch configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use ankur_scrape::config::FetchConfig;
/// use ankur_scrape::crawler::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.timeout_secs))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Longest sleep between two attempts
pub const MAX_BACKOFF_DELAY: Duration = Duration::from_secs(300);

/// Delay before the given retry (1-based): `factor * 2^(retry - 1)` seconds
///
/// With the default factor of 0.3 this yields 0.3s, 0.6s, 1.2s, 2.4s, 4.8s.
/// The result never exceeds [`MAX_BACKOFF_DELAY`].
pub fn backoff_delay(backoff_factor: f64, retry: u32) -> Duration {
    if retry == 0 {
        return Duration::ZERO;
    }
    let exponent = (retry - 1).min(31) as i32;
    Duration::try_from_secs_f64(backoff_factor * 2f64.powi(exponent))
        .unwrap_or(MAX_BACKOFF_DELAY)
        .min(MAX_BACKOFF_DELAY)
}

/// Fetches a URL with the configured retry policy
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | 2xx / unfollowed 3xx (after redirects) | Success |
/// | Status in `retry-statuses` | Retry with backoff |
/// | Other 4xx / 5xx status (e.g. 404) | Immediate failure |
/// | Timeout / connection failure | Retry with backoff |
/// | Other request errors | Immediate failure |
///
/// At most `1 + max_retries` requests are sent. Every failure is logged once
/// at warn level with the URL; the caller decides whether to skip the unit.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `config` - Retry policy
/// * `url` - The URL to fetch
pub async fn fetch_url(client: &Client, config: &FetchConfig, url: &str) -> FetchResult {
    let mut attempt: u32 = 0;

    loop {
        if attempt > 0 {
            let delay = backoff_delay(config.backoff_factor, attempt);
            tracing::debug!(
                "Retry {}/{} for {} in {:?}",
                attempt,
                config.max_retries,
                url,
                delay
            );
            tokio::time::sleep(delay).await;
        }
        attempt += 1;

        let result = match fetch_once(client, config, url, attempt).await {
            Attempt::Done(result) => result,
            Attempt::Retry(result) if attempt > config.max_retries => result,
            Attempt::Retry(_) => continue,
        };

        match &result {
            FetchResult::Success { .. } => {}
            FetchResult::HttpError { status_code, .. } => {
                tracing::warn!(
                    "Request failed for {}: HTTP {} after {} attempt(s)",
                    url,
                    status_code,
                    attempt
                );
            }
            FetchResult::NetworkError { error, .. } => {
                tracing::warn!(
                    "Request failed for {}: {} after {} attempt(s)",
                    url,
                    error,
                    attempt
                );
            }
        }

        return result;
    }
}

/// Sends one GET request and classifies the outcome
async fn fetch_once(client: &Client, config: &FetchConfig, url: &str, attempt: u32) -> Attempt {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();
            let final_url = response.url().to_string();

            // 3xx responses reqwest did not follow still carry a usable body
            if status.is_client_error() || status.is_server_error() {
                let failure = FetchResult::HttpError {
                    status_code: status.as_u16(),
                    attempts: attempt,
                };
                return if is_retryable_status(config, status) {
                    tracing::debug!("HTTP {} from {} (attempt {})", status, url, attempt);
                    Attempt::Retry(failure)
                } else {
                    Attempt::Done(failure)
                };
            }

            match response.text().await {
                Ok(body) => Attempt::Done(FetchResult::Success {
                    final_url,
                    status_code: status.as_u16(),
                    body,
                    attempts: attempt,
                }),
                Err(e) => Attempt::Retry(FetchResult::NetworkError {
                    error: e.to_string(),
                    attempts: attempt,
                }),
            }
        }
        Err(e) => {
            // Classify error
            let retryable = e.is_timeout() || e.is_connect() || e.is_request();
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            tracing::debug!("{} for {} (attempt {})", error, url, attempt);

            let failure = FetchResult::NetworkError {
                error,
                attempts: attempt,
            };
            if retryable {
                Attempt::Retry(failure)
            } else {
                Attempt::Done(failure)
            }
        }
    }
}

fn is_retryable_status(config: &FetchConfig, status: StatusCode) -> bool {
    config.retry_statuses.contains(&status.as_u16())
}
