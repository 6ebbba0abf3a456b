//! Ordinary DNS lookups (A/AAAA and NS).
//!
//! Lookups go through the `DnsLookup` trait so the classifier and resolvers
//! can be exercised without a network.

use std::net::IpAddr;
use std::sync::Arc;

use anyhow::{Error, Result};
use async_trait::async_trait;
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;

/// Platform DNS resolution.
#[async_trait]
pub trait DnsLookup: Send + Sync {
    /// Resolves a hostname to its IPv4/IPv6 addresses.
    async fn lookup_ip(&self, host: &str) -> Result<Vec<IpAddr>>;

    /// Returns the nameserver hostnames of a domain, as reported by DNS.
    async fn lookup_ns(&self, domain: &str) -> Result<Vec<String>>;
}

/// NXDOMAIN and NODATA are answers, not failures.
fn is_empty_answer(err: &ResolveError) -> bool {
    matches!(err.kind(), ResolveErrorKind::NoRecordsFound { .. })
}

/// `DnsLookup` backed by `hickory-resolver`.
#[derive(Clone)]
pub struct HickoryLookup {
    resolver: Arc<TokioAsyncResolver>,
}

impl HickoryLookup {
    pub fn new(resolver: Arc<TokioAsyncResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl DnsLookup for HickoryLookup {
    async fn lookup_ip(&self, host: &str) -> Result<Vec<IpAddr>> {
        let response = self.resolver.lookup_ip(host).await.map_err(Error::new)?;
        Ok(response.iter().collect())
    }

    async fn lookup_ns(&self, domain: &str) -> Result<Vec<String>> {
        match self.resolver.lookup(domain, RecordType::NS).await {
            Ok(lookup) => Ok(lookup
                .iter()
                .filter_map(|rdata| {
                    if let RData::NS(ns) = rdata {
                        Some(ns.to_utf8())
                    } else {
                        None
                    }
                })
                .collect()),
            Err(e) if is_empty_answer(&e) => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}
