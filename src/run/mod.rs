//! The reconciliation pipeline.
//!
//! Hostnames flow through three stages:
//! 1. classification (direct or behind Cloudflare)
//! 2. credential collection for the Cloudflare groups
//! 3. bounded-concurrency status evaluation

mod report;

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use crate::config::Config;
use crate::dns::cloudflare::CloudflareResolver;
use crate::dns::{
    attach_credentials, AddressResolver, DelegationClassifier, DnsLookup, HickoryLookup,
    ProgressCallback, Prompter, StatusEvaluator,
};
use crate::http::CachingFetcher;
use crate::initialization::{init_client, init_fetcher, init_resolver};
use crate::inventory::hostnames_from_owners;
use crate::models::Owner;

pub use report::{filter_results, render_table, ReconcileReport};

/// A configured pipeline with its DNS and HTTP collaborators.
///
/// Each run builds a fresh classifier and resolver, so nothing learned in
/// one run (nameservers, credentials) leaks into the next.
pub struct Pipeline {
    config: Config,
    lookup: Arc<dyn DnsLookup>,
    fetcher: Arc<dyn CachingFetcher>,
}

impl Pipeline {
    pub fn new(
        config: Config,
        lookup: Arc<dyn DnsLookup>,
        fetcher: Arc<dyn CachingFetcher>,
    ) -> Self {
        Self {
            config,
            lookup,
            fetcher,
        }
    }

    /// Evaluates every hostname the owners declare.
    ///
    /// Credentials are asked for through `prompter` before any Cloudflare API
    /// call is made.
    pub async fn run<P: Prompter + ?Sized>(
        &self,
        owners: &[Owner],
        prompter: &mut P,
        progress: Option<ProgressCallback>,
    ) -> ReconcileReport {
        let names = hostnames_from_owners(owners);
        info!("Classifying {} hostnames", names.len());

        let mut classifier = DelegationClassifier::new(Arc::clone(&self.lookup));
        let hostnames = classifier.classify(&names).await;
        let delegated = hostnames.iter().filter(|h| h.provider().is_some()).count();
        info!("{delegated} of {} hostnames are behind Cloudflare", hostnames.len());

        let hostnames = attach_credentials(prompter, hostnames);

        let cloudflare = CloudflareResolver::new(
            Arc::clone(&self.fetcher),
            Arc::clone(&self.lookup),
            self.config.api_base.as_str(),
        );
        let evaluator = StatusEvaluator::new(
            AddressResolver::new(Arc::clone(&self.lookup), cloudflare),
            self.config.max_concurrency,
        );

        let start_time = Instant::now();
        let results = evaluator.evaluate_batch(&hostnames, owners, progress).await;
        let report = ReconcileReport::new(results, self.config.include_unknown);

        info!(
            "Checked {} hostnames in {:.2} seconds: {}",
            hostnames.len(),
            start_time.elapsed().as_secs_f64(),
            report.summary()
        );
        report
    }
}

/// Logs progress every 10% of the batch.
fn progress_logger() -> ProgressCallback {
    Arc::new(|completed, total| {
        let step = (total / 10).max(1);
        if completed % step == 0 || completed == total {
            info!("Checked {completed}/{total} hostnames");
        }
    })
}

/// Runs a reconciliation against live DNS and the Cloudflare API.
///
/// # Errors
///
/// Fails only if the HTTP client cannot be built. Per-hostname failures are
/// reported as `Status::Unknown`.
pub async fn run_reconcile<P: Prompter + ?Sized>(
    config: Config,
    owners: &[Owner],
    prompter: &mut P,
) -> Result<ReconcileReport> {
    let client = init_client(&config).context("Failed to initialize HTTP client")?;
    let fetcher = init_fetcher(&config, client);
    let lookup: Arc<dyn DnsLookup> = Arc::new(HickoryLookup::new(init_resolver()));

    let pipeline = Pipeline::new(config, lookup, fetcher);
    Ok(pipeline.run(owners, prompter, Some(progress_logger())).await)
}
