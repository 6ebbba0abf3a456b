//! Application initialization and resource setup.
//!
//! This module provides functions to initialize all shared resources:
//! - Logger
//! - HTTP client and the caching, rate-limited fetcher built on it
//! - DNS resolver
//! - Concurrency semaphore

mod client;
mod logger;
mod resolver;

use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::config::Config;
use crate::http::{
    Cacher, CachingFetcher, DelaySleeper, Fetcher, FileCache, MemoryCache, ReqwestGet,
};

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
pub use resolver::init_resolver;

/// Initializes a semaphore for controlling concurrency.
///
/// # Arguments
///
/// * `count` - Maximum number of concurrent operations allowed
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count))
}

/// Builds the fetcher shared by every Cloudflare API call of a run.
///
/// Responses are cached in `config.cache_path()` unless `no_cache` is set,
/// in which case they only live for the run.
pub fn init_fetcher(config: &Config, client: Arc<reqwest::Client>) -> Arc<dyn CachingFetcher> {
    let cache: Box<dyn Cacher> = if config.no_cache {
        Box::new(MemoryCache::new())
    } else {
        let path = config.cache_path();
        log::debug!("Caching API responses in {}", path.display());
        Box::new(FileCache::new(path, config.cache_ttl()))
    };

    Arc::new(Fetcher::new(
        Box::new(ReqwestGet::new(client)),
        cache,
        Box::new(DelaySleeper(config.request_delay())),
    ))
}
