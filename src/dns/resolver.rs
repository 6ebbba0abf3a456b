//! Address resolution dispatch.

use std::sync::Arc;

use super::cloudflare::CloudflareResolver;
use super::DnsLookup;
use crate::domain::normalize_hostname;
use crate::error_handling::ResolveError;
use crate::models::{Delegation, Hostname};

/// Resolves a hostname to addresses the way its delegation requires: plain
/// DNS for direct hostnames, the Cloudflare API for delegated ones.
pub struct AddressResolver {
    dns: Arc<dyn DnsLookup>,
    cloudflare: CloudflareResolver,
}

impl AddressResolver {
    pub fn new(dns: Arc<dyn DnsLookup>, cloudflare: CloudflareResolver) -> Self {
        Self { dns, cloudflare }
    }

    pub async fn resolve(&self, host: &Hostname) -> Result<Vec<String>, ResolveError> {
        match &host.delegation {
            Delegation::Direct => self.resolve_direct(&host.name).await,
            Delegation::Provider(_) => self.cloudflare.resolve(host).await,
        }
    }

    async fn resolve_direct(&self, name: &str) -> Result<Vec<String>, ResolveError> {
        let name = normalize_hostname(name);
        log::debug!("Looking up IP addresses for {name}");

        let ips = self
            .dns
            .lookup_ip(&name)
            .await
            .map_err(|e| ResolveError::Lookup {
                host: name.clone(),
                reason: format!("{e:#}"),
            })?;

        let addresses: Vec<String> = ips.iter().map(ToString::to_string).collect();
        log::debug!("IP addresses for {name} are {addresses:?}");
        Ok(addresses)
    }
}
