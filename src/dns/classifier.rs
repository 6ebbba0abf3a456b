//! Cloudflare delegation detection.
//!
//! A hostname is considered behind Cloudflare when the nameservers of its base
//! domain are Cloudflare's. Plain DNS cannot reveal the origin address of such
//! hostnames, so they are tagged for resolution through the Cloudflare API.

use std::collections::HashMap;
use std::sync::Arc;

use super::DnsLookup;
use crate::config::CLOUDFLARE_NS_SUFFIX;
use crate::domain::{base_domain, normalize_hostname};
use crate::models::Hostname;

/// Tags hostnames as direct or Cloudflare-delegated.
///
/// Nameserver lookups are memoized per base domain for the lifetime of the
/// instance, so classifying many subdomains of one site costs one lookup.
pub struct DelegationClassifier {
    lookup: Arc<dyn DnsLookup>,
    provider_suffix: String,
    cached_ns: HashMap<String, Vec<String>>,
}

impl DelegationClassifier {
    pub fn new(lookup: Arc<dyn DnsLookup>) -> Self {
        Self {
            lookup,
            provider_suffix: CLOUDFLARE_NS_SUFFIX.to_string(),
            cached_ns: HashMap::new(),
        }
    }

    /// Returns the sorted, dot-trimmed nameservers of the hostname's base
    /// domain.
    ///
    /// A failed lookup yields an empty list (and is memoized as such), which
    /// makes the hostname count as not delegated.
    pub async fn nameservers_for_base(&mut self, host: &str) -> Vec<String> {
        let base = base_domain(host);

        if let Some(cached) = self.cached_ns.get(&base) {
            return cached.clone();
        }

        log::debug!("Looking up nameservers for {base}");
        let raw = match self.lookup.lookup_ns(&base).await {
            Ok(ns) => ns,
            Err(e) => {
                log::warn!("Nameserver lookup for {base} failed, treating as not delegated: {e:#}");
                Vec::new()
            }
        };

        let mut nameservers: Vec<String> = raw
            .iter()
            .map(|ns| ns.trim_end_matches('.').to_string())
            .collect();
        nameservers.sort();
        nameservers.dedup();
        log::debug!("Nameservers for {base} are {nameservers:?}");

        self.cached_ns.insert(base, nameservers.clone());
        nameservers
    }

    /// True if at least one nameserver of the base domain is a Cloudflare one.
    pub async fn is_delegated(&mut self, host: &str) -> bool {
        let suffix = self.provider_suffix.clone();
        self.nameservers_for_base(host)
            .await
            .iter()
            .any(|ns| ns.ends_with(&suffix))
    }

    /// Tags every name, in order.
    pub async fn classify(&mut self, names: &[String]) -> Vec<Hostname> {
        let mut hostnames = Vec::with_capacity(names.len());
        for name in names {
            let nameservers = self.nameservers_for_base(&normalize_hostname(name)).await;
            let delegated = nameservers
                .iter()
                .any(|ns| ns.ends_with(&self.provider_suffix));

            hostnames.push(if delegated {
                Hostname::delegated(name.clone(), nameservers)
            } else {
                Hostname::direct(name.clone())
            });
        }
        hostnames
    }
}
