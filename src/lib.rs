//! domain_reconcile library: checks that hostnames still point at their server
//!
//! For every hostname an owner declares, the library works out where the name
//! really resolves and compares that with the owner's server address. Names
//! whose base domain sits on Cloudflare nameservers are resolved through the
//! Cloudflare API (with credentials collected interactively, once per
//! account), since public DNS only shows Cloudflare's edge addresses for them.
//!
//! # Example
//!
//! ```no_run
//! use domain_reconcile::{load_owners, run_reconcile, Config, StdinPrompter};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config {
//!     inventory: std::path::PathBuf::from("owners.json"),
//!     include_unknown: true,
//!     ..Default::default()
//! };
//!
//! let owners = load_owners(&config.inventory)?;
//! let report = run_reconcile(config, &owners, &mut StdinPrompter).await?;
//! for result in &report.flagged {
//!     println!("{} {} {}", result.owner_id, result.hostname, result.status);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod config;
pub mod dns;
mod domain;
mod error_handling;
pub mod http;
pub mod initialization;
pub mod inventory;
mod models;
mod run;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use dns::{DnsLookup, Prompter, StdinPrompter};
pub use domain::{base_domain, normalize_hostname};
pub use error_handling::{FetchError, InitializationError, ResolveError};
pub use inventory::load_owners;
pub use models::{
    Credentials, Delegation, EvaluationResult, Hostname, NameserverGroup, Owner,
    ProviderMetadata, Status,
};
pub use run::{filter_results, render_table, run_reconcile, Pipeline, ReconcileReport};
