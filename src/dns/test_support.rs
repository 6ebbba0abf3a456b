//! Stubs shared by the DNS unit tests.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use super::DnsLookup;
use crate::error_handling::FetchError;
use crate::http::{CachingFetcher, Request};

pub(crate) const CF_NAMESERVERS: [&str; 2] = ["bar.ns.cloudflare.com.", "foo.ns.cloudflare.com."];

/// In-memory DNS: unknown names fail to resolve.
#[derive(Default)]
pub(crate) struct StubLookup {
    ips: HashMap<String, Vec<IpAddr>>,
    ns: HashMap<String, Vec<String>>,
    pub(crate) ns_calls: Arc<AtomicUsize>,
    pub(crate) ip_calls: Arc<AtomicUsize>,
}

impl StubLookup {
    /// The fixture used by most tests: `domain-behind-cloudflare.com` is on
    /// Cloudflare nameservers, `example.com` and `example.co.uk` are not.
    pub(crate) fn standard() -> Self {
        Self::default()
            .with_ns("domain-behind-cloudflare.com", &CF_NAMESERVERS)
            .with_ns("example.com", &["a.iana-servers.net.", "b.iana-servers.net."])
            .with_ns("example.co.uk", &["ns1.example.co.uk."])
            .with_ip("example.com", &["127.0.0.1"])
    }

    pub(crate) fn with_ip(mut self, host: &str, ips: &[&str]) -> Self {
        let parsed = ips.iter().filter_map(|ip| ip.parse().ok()).collect();
        self.ips.insert(host.to_string(), parsed);
        self
    }

    pub(crate) fn with_ns(mut self, domain: &str, nameservers: &[&str]) -> Self {
        self.ns.insert(
            domain.to_string(),
            nameservers.iter().map(|ns| ns.to_string()).collect(),
        );
        self
    }
}

#[async_trait]
impl DnsLookup for StubLookup {
    async fn lookup_ip(&self, host: &str) -> anyhow::Result<Vec<IpAddr>> {
        self.ip_calls.fetch_add(1, Ordering::SeqCst);
        self.ips
            .get(host)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no record found for {host}"))
    }

    async fn lookup_ns(&self, domain: &str) -> anyhow::Result<Vec<String>> {
        self.ns_calls.fetch_add(1, Ordering::SeqCst);
        self.ns
            .get(domain)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("SERVFAIL for {domain}"))
    }
}

/// Serves canned bodies by exact URL and records every requested URL.
#[derive(Default)]
pub(crate) struct StubFetcher {
    bodies: HashMap<String, String>,
    pub(crate) requests: std::sync::Mutex<Vec<Request>>,
}

impl StubFetcher {
    pub(crate) fn with(mut self, url: &str, body: impl Into<String>) -> Self {
        self.bodies.insert(url.to_string(), body.into());
        self
    }

    pub(crate) fn requested_urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|reqs| reqs.iter().map(|r| r.url.clone()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CachingFetcher for StubFetcher {
    async fn fetch(&self, req: &Request) -> Result<String, FetchError> {
        if let Ok(mut reqs) = self.requests.lock() {
            reqs.push(req.clone());
        }
        self.bodies
            .get(&req.url)
            .cloned()
            .ok_or_else(|| FetchError::CouldNotMakeRequest {
                url: req.url.clone(),
                reason: "connection refused".to_string(),
            })
    }
}

/// Builds a Cloudflare list envelope.
pub(crate) fn envelope(result: serde_json::Value, page: u32, total_pages: u32) -> String {
    serde_json::json!({
        "result_info": {
            "page": page,
            "per_page": 50,
            "total_pages": total_pages,
            "count": result.as_array().map_or(0, |a| a.len()),
            "total_count": result.as_array().map_or(0, |a| a.len()),
        },
        "result": result,
        "success": true,
        "errors": [],
        "messages": [],
    })
    .to_string()
}
