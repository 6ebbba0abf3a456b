// Shared test helpers: in-memory DNS, a scripted prompter and a fetcher
// pointed at a mock Cloudflare API.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use domain_reconcile::http::{
    Cacher, CachingFetcher, DelaySleeper, Fetcher, MemoryCache, ReqwestGet,
};
use domain_reconcile::{Config, DnsLookup, Owner, Prompter};

/// DNS answers from fixed tables; unknown names fail.
#[derive(Default)]
pub struct StaticDns {
    ips: HashMap<String, Vec<IpAddr>>,
    ns: HashMap<String, Vec<String>>,
}

#[allow(dead_code)] // Not every test file uses every helper
impl StaticDns {
    pub fn ip(mut self, host: &str, ips: &[&str]) -> Self {
        let parsed = ips
            .iter()
            .map(|ip| ip.parse().expect("valid IP in test fixture"))
            .collect();
        self.ips.insert(host.to_string(), parsed);
        self
    }

    pub fn ns(mut self, domain: &str, nameservers: &[&str]) -> Self {
        self.ns.insert(
            domain.to_string(),
            nameservers.iter().map(|n| n.to_string()).collect(),
        );
        self
    }
}

#[async_trait]
impl DnsLookup for StaticDns {
    async fn lookup_ip(&self, host: &str) -> anyhow::Result<Vec<IpAddr>> {
        self.ips
            .get(host)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no record found for {host}"))
    }

    async fn lookup_ns(&self, domain: &str) -> anyhow::Result<Vec<String>> {
        self.ns
            .get(domain)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("SERVFAIL for {domain}"))
    }
}

/// Answers prompts in order; panics on a prompt it does not expect.
#[allow(dead_code)]
pub struct ScriptedPrompter {
    script: Vec<(&'static str, &'static str)>,
    pub asked: Vec<String>,
}

#[allow(dead_code)]
impl ScriptedPrompter {
    pub fn new(script: Vec<(&'static str, &'static str)>) -> Self {
        Self {
            script,
            asked: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt(&mut self, message: &str, default: &str, _allowed: Option<&[&str]>) -> String {
        let index = self.asked.len();
        self.asked.push(message.to_string());
        let (expected, answer) = self
            .script
            .get(index)
            .unwrap_or_else(|| panic!("unexpected prompt #{index}: {message}"));
        assert!(
            message.contains(expected),
            "prompt {message:?} should contain {expected:?}"
        );
        if answer.is_empty() {
            default.to_string()
        } else {
            answer.to_string()
        }
    }
}

/// A real fetcher (reqwest + cache) without the inter-request delay.
#[allow(dead_code)]
pub fn fetcher_with(cache: Box<dyn Cacher>) -> Arc<dyn CachingFetcher> {
    Arc::new(Fetcher::new(
        Box::new(ReqwestGet::new(Arc::new(reqwest::Client::new()))),
        cache,
        Box::new(DelaySleeper(Duration::ZERO)),
    ))
}

#[allow(dead_code)]
pub fn memory_fetcher() -> Arc<dyn CachingFetcher> {
    fetcher_with(Box::new(MemoryCache::new()))
}

/// Config pointing the Cloudflare client at a mock server.
#[allow(dead_code)]
pub fn config_for(api_base: &str, include_unknown: bool) -> Config {
    Config {
        api_base: api_base.to_string(),
        include_unknown,
        no_cache: true,
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn owner(id: &str, server_ip: &str, domains: &[&str]) -> Owner {
    Owner {
        id: id.to_string(),
        server_name: format!("{id}-server"),
        server_ip: server_ip.to_string(),
        domains: domains.iter().map(|d| d.to_string()).collect(),
    }
}

/// Wraps a result list in a Cloudflare envelope.
#[allow(dead_code)]
pub fn envelope(result: serde_json::Value, page: u32, total_pages: u32) -> serde_json::Value {
    let count = result.as_array().map_or(0, |a| a.len());
    serde_json::json!({
        "result_info": {
            "page": page,
            "per_page": 50,
            "total_pages": total_pages,
            "count": count,
            "total_count": count,
        },
        "result": result,
        "success": true,
        "errors": [],
        "messages": [],
    })
}
