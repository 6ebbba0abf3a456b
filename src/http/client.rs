//! Caching, rate-limited HTTP GET.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::cache::Cacher;
use crate::error_handling::FetchError;

/// A GET request: URL plus headers.
///
/// Only the URL identifies a request for caching purposes; two requests for
/// the same URL with different headers share one cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Request {
    pub url: String,
    pub headers: BTreeMap<String, String>,
}

impl Request {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: BTreeMap::new(),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Fetches a URL body, serving from cache when possible and spacing out live
/// requests.
#[async_trait]
pub trait CachingFetcher: Send + Sync {
    async fn fetch(&self, req: &Request) -> Result<String, FetchError>;
}

/// Raw HTTP transport.
#[async_trait]
pub trait HttpGet: Send + Sync {
    async fn get(&self, req: &Request) -> anyhow::Result<String>;
}

/// Waits between consecutive live requests.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self);
}

/// Sleeps for a fixed duration.
#[derive(Debug, Clone, Copy)]
pub struct DelaySleeper(pub Duration);

#[async_trait]
impl Sleeper for DelaySleeper {
    async fn sleep(&self) {
        tokio::time::sleep(self.0).await;
    }
}

/// `HttpGet` backed by a shared `reqwest::Client`.
///
/// Non-2xx responses are errors carrying the body, so they never reach the
/// cache.
#[derive(Debug, Clone)]
pub struct ReqwestGet {
    client: Arc<reqwest::Client>,
}

impl ReqwestGet {
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpGet for ReqwestGet {
    async fn get(&self, req: &Request) -> anyhow::Result<String> {
        let mut builder = self.client.get(&req.url);
        for (name, value) in &req.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status();
        log::debug!("Response status for {}: {}", req.url, status);

        let body = response.text().await?;
        if !status.is_success() {
            anyhow::bail!("HTTP {status}: {body}");
        }
        Ok(body)
    }
}

/// The default `CachingFetcher`.
///
/// All calls are serialized through one async mutex, which makes the fetcher
/// the single owner of the "has made a request" flag and of the cache file,
/// so concurrent callers cannot burst the API or interleave cache writes.
pub struct Fetcher {
    http: Box<dyn HttpGet>,
    cache: Box<dyn Cacher>,
    sleeper: Box<dyn Sleeper>,
    has_made_request: Mutex<bool>,
}

impl Fetcher {
    pub fn new(http: Box<dyn HttpGet>, cache: Box<dyn Cacher>, sleeper: Box<dyn Sleeper>) -> Self {
        Self {
            http,
            cache,
            sleeper,
            has_made_request: Mutex::new(false),
        }
    }
}

#[async_trait]
impl CachingFetcher for Fetcher {
    async fn fetch(&self, req: &Request) -> Result<String, FetchError> {
        let mut has_made_request = self.has_made_request.lock().await;

        match self.cache.get(&req.url) {
            Ok(Some(body)) => {
                log::debug!("Cache hit for {}", req.url);
                return Ok(body);
            }
            Ok(None) => {}
            Err(e) => log::warn!("Cache read failed for {}, fetching instead: {e:#}", req.url),
        }

        if *has_made_request {
            self.sleeper.sleep().await;
        }

        log::debug!("Making http request to {}", req.url);
        let result = self.http.get(req).await;
        *has_made_request = true;

        let body = result.map_err(|e| FetchError::CouldNotMakeRequest {
            url: req.url.clone(),
            reason: format!("{e:#}"),
        })?;

        self.cache
            .set(&req.url, &body)
            .map_err(|e| FetchError::CouldNotCache {
                url: req.url.clone(),
                reason: format!("{e:#}"),
            })?;

        Ok(body)
    }
}
