//! Hostname status evaluation.
//!
//! Each hostname is resolved and compared with the address of the server its
//! owner declares. Batches run with bounded concurrency and keep input order.

use std::sync::Arc;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use tokio::sync::Semaphore;

use super::resolver::AddressResolver;
use crate::initialization::init_semaphore;
use crate::models::{EvaluationResult, Hostname, Owner, Status};

/// Called after each hostname completes with `(completed, total)`.
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Classifies resolved addresses against the expected one.
///
/// No addresses at all is `Unknown`, same as a failed resolution.
pub fn classify_addresses(addresses: &[String], expected: &str) -> Status {
    if addresses.is_empty() {
        return Status::Unknown;
    }
    let expected = expected.trim();
    if addresses.iter().any(|addr| addr == expected) {
        Status::Ok
    } else {
        Status::Inactive
    }
}

/// Every owner declaring `hostname`, in inventory order.
pub fn owners_for<'a>(owners: &'a [Owner], hostname: &str) -> Vec<&'a Owner> {
    owners
        .iter()
        .filter(|owner| owner.domains.iter().any(|d| d == hostname))
        .collect()
}

/// Resolves a hostname, logging and discarding the error.
async fn resolve_logged(resolver: &AddressResolver, host: &Hostname) -> Option<Vec<String>> {
    match resolver.resolve(host).await {
        Ok(addresses) => {
            log::debug!("{} resolved to {addresses:?}", host.name);
            Some(addresses)
        }
        Err(e) => {
            log::debug!("Could not resolve {}: {e}", host.name);
            None
        }
    }
}

fn status_for(addresses: Option<&Vec<String>>, expected: &str) -> Status {
    addresses.map_or(Status::Unknown, |addrs| classify_addresses(addrs, expected))
}

/// Resolves hostnames and reports their status.
pub struct StatusEvaluator {
    resolver: Arc<AddressResolver>,
    semaphore: Arc<Semaphore>,
}

impl StatusEvaluator {
    /// `max_concurrency` caps the number of hostnames resolved at once; zero
    /// is treated as one.
    pub fn new(resolver: AddressResolver, max_concurrency: usize) -> Self {
        Self {
            resolver: Arc::new(resolver),
            semaphore: init_semaphore(max_concurrency.max(1)),
        }
    }

    /// Resolves one hostname and compares it with `expected`.
    ///
    /// Resolution errors never escape: they become `Status::Unknown`.
    pub async fn check_status(&self, host: &Hostname, expected: &str) -> Status {
        let addresses = resolve_logged(&self.resolver, host).await;
        let status = status_for(addresses.as_ref(), expected);
        log::debug!("{} expected {expected}: {status}", host.name);
        status
    }

    /// Evaluates every hostname against the server address of each owner
    /// declaring it.
    ///
    /// Each hostname is resolved once. The output holds one entry per
    /// (owner, hostname) pair, grouped by hostname in input order and then by
    /// owner in inventory order. Hostnames no owner declares are evaluated
    /// once against a blank owner. `progress` fires once per resolved
    /// hostname.
    pub async fn evaluate_batch(
        &self,
        hostnames: &[Hostname],
        owners: &[Owner],
        progress: Option<ProgressCallback>,
    ) -> Vec<EvaluationResult> {
        let total = hostnames.len();
        let mut resolved: Vec<Option<Vec<String>>> = vec![None; total];
        let mut tasks = FuturesUnordered::new();

        for (index, host) in hostnames.iter().enumerate() {
            let permit = match Arc::clone(&self.semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    log::warn!("Semaphore closed, leaving {} as unknown", host.name);
                    continue;
                }
            };

            let resolver = Arc::clone(&self.resolver);
            let host = host.clone();
            let handle = tokio::spawn(async move {
                let _permit = permit;
                resolve_logged(&resolver, &host).await
            });
            tasks.push(async move { (index, handle.await) });
        }

        let mut completed = 0;
        while let Some((index, joined)) = tasks.next().await {
            resolved[index] = joined.unwrap_or_else(|join_error| {
                log::warn!("Task panicked: {join_error:?}");
                None
            });

            completed += 1;
            if let Some(callback) = &progress {
                callback(completed, total);
            }
        }

        let blank = Owner::default();
        let mut results = Vec::with_capacity(total);
        for (host, addresses) in hostnames.iter().zip(&resolved) {
            let mut declaring = owners_for(owners, &host.name);
            if declaring.is_empty() {
                log::warn!("No owner declares {}", host.name);
                declaring.push(&blank);
            }
            for owner in declaring {
                results.push(EvaluationResult {
                    owner_id: owner.id.clone(),
                    hostname: host.name.clone(),
                    server_name: owner.server_name.clone(),
                    status: status_for(addresses.as_ref(), &owner.server_ip),
                });
            }
        }

        results
    }
}
