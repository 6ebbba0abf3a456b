//! Resolution of Cloudflare-delegated hostnames through the Cloudflare API.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::types::{CloudflareResponse, DnsRecord, RecordKind, Zone};
use crate::config::PER_PAGE;
use crate::dns::DnsLookup;
use crate::domain::{base_domain, normalize_hostname, same_base_domain};
use crate::error_handling::ResolveError;
use crate::http::{CachingFetcher, Request};
use crate::models::{Credentials, Hostname};

/// Resolves delegated hostnames by reading the zone's records from the
/// Cloudflare API instead of trusting public DNS (which only shows edge IPs).
pub struct CloudflareResolver {
    fetcher: Arc<dyn CachingFetcher>,
    lookup: Arc<dyn DnsLookup>,
    api_base: String,
}

/// What matching a name against a zone's records produced.
#[derive(Debug, Default)]
struct Matches {
    addresses: Vec<String>,
    /// CNAME targets outside the zone's base domain, left for plain DNS.
    external: Vec<String>,
}

impl CloudflareResolver {
    pub fn new(
        fetcher: Arc<dyn CachingFetcher>,
        lookup: Arc<dyn DnsLookup>,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            lookup,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Returns every address the hostname resolves to according to its zone.
    ///
    /// CNAMEs within the same base domain are followed through the fetched
    /// records; CNAMEs leaving it are resolved with ordinary DNS. An empty
    /// result means no matching A record exists.
    pub async fn resolve(&self, host: &Hostname) -> Result<Vec<String>, ResolveError> {
        let creds = host
            .credentials()
            .ok_or_else(|| ResolveError::NoCredentials(host.name.clone()))?;

        let name = normalize_hostname(&host.name);
        let zone = self.zone_for(&name, creds).await?;
        let records = self.records_for_zone(&zone, creds).await?;
        log::debug!(
            "Fetched {} records for zone {} ({})",
            records.len(),
            zone.name,
            zone.id
        );

        let mut matches = Matches::default();
        collect_matches(&name, &records, &mut Vec::new(), &mut matches)?;

        let mut addresses = matches.addresses;
        for target in matches.external {
            log::debug!("Resolving CNAME target {target} of {name} via DNS");
            let ips = self
                .lookup
                .lookup_ip(&target)
                .await
                .map_err(|e| ResolveError::Lookup {
                    host: target.clone(),
                    reason: format!("{e:#}"),
                })?;
            for ip in ips {
                push_unique(&mut addresses, ip.to_string());
            }
        }

        log::debug!("Cloudflare addresses for {name} are {addresses:?}");
        Ok(addresses)
    }

    /// Finds the zone of the hostname's base domain. Only the first page is
    /// consulted: a name filter matches at most one zone.
    async fn zone_for(&self, host: &str, creds: &Credentials) -> Result<Zone, ResolveError> {
        let base = base_domain(host);
        let url = format!(
            "{}/zones?name={}&page=1&per_page={}",
            self.api_base, base, PER_PAGE
        );

        let response: CloudflareResponse<Vec<Zone>> = self.get(&url, creds).await?;
        response
            .result
            .and_then(|zones| zones.into_iter().next())
            .ok_or(ResolveError::NoZoneFound(base))
    }

    /// Fetches every record of the zone, following pagination.
    async fn records_for_zone(
        &self,
        zone: &Zone,
        creds: &Credentials,
    ) -> Result<Vec<DnsRecord>, ResolveError> {
        let mut records = Vec::new();
        let mut page = 1;

        loop {
            let url = format!(
                "{}/zones/{}/dns_records?page={}&per_page={}",
                self.api_base, zone.id, page, PER_PAGE
            );
            let response: CloudflareResponse<Vec<DnsRecord>> = self.get(&url, creds).await?;
            records.extend(response.result.unwrap_or_default());

            match response.result_info {
                Some(info) if info.has_more_after(page) => page += 1,
                _ => break,
            }
        }

        Ok(records)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        creds: &Credentials,
    ) -> Result<CloudflareResponse<T>, ResolveError> {
        let request = Request::new(url)
            .header("X-Auth-Email", creds.email.as_str())
            .header("X-Auth-Key", creds.api_key.as_str())
            .header("Content-Type", "application/json");

        let body = self.fetcher.fetch(&request).await?;
        let response: CloudflareResponse<T> = serde_json::from_str(&body)?;
        response.into_checked()
    }
}

/// Collects the addresses `name` resolves to within `records`.
///
/// `chain` holds the names currently being resolved; meeting one of them
/// again means the CNAMEs form a cycle.
fn collect_matches(
    name: &str,
    records: &[DnsRecord],
    chain: &mut Vec<String>,
    out: &mut Matches,
) -> Result<(), ResolveError> {
    if chain.iter().any(|seen| seen == name) {
        return Err(ResolveError::AliasLoop(name.to_string()));
    }
    chain.push(name.to_string());

    for record in records.iter().filter(|r| name_matches(&r.name, name)) {
        match record.kind {
            RecordKind::A => push_unique(&mut out.addresses, record.content.clone()),
            RecordKind::Cname => {
                let target = normalize_hostname(&record.content);
                if same_base_domain(&target, name) {
                    collect_matches(&target, records, chain, out)?;
                } else {
                    push_unique(&mut out.external, target);
                }
            }
            RecordKind::Other => {}
        }
    }

    chain.pop();
    Ok(())
}

/// Matches a hostname against a record name.
///
/// A `*` label matches exactly one non-empty label; every other label must be
/// equal, ignoring ASCII case.
pub fn name_matches(pattern: &str, host: &str) -> bool {
    let pattern = normalize_hostname(pattern);
    let host = normalize_hostname(host);

    let pattern_labels: Vec<&str> = pattern.split('.').collect();
    let host_labels: Vec<&str> = host.split('.').collect();
    if pattern_labels.len() != host_labels.len() {
        return false;
    }

    pattern_labels
        .iter()
        .zip(&host_labels)
        .all(|(p, h)| match *p {
            "*" => !h.is_empty(),
            literal => literal.eq_ignore_ascii_case(h),
        })
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}
