//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, DEFAULT_USER_AGENT};
use reqwest::ClientBuilder;

/// Initializes the HTTP client used for Cloudflare API calls.
///
/// The per-request timeout comes from the configuration. There is no retry
/// layer: a failed request fails that hostname only.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(DEFAULT_USER_AGENT)
        .build()?;
    Ok(Arc::new(client))
}
