//! Hostname classification and resolution.
//!
//! This module covers the path from a bare hostname to a `Status`:
//! - Cloudflare delegation detection from base domain nameservers
//! - Interactive collection of Cloudflare credentials per nameserver group
//! - Address resolution via plain DNS or the Cloudflare API
//! - Bounded-concurrency status evaluation

pub mod cloudflare;
mod classifier;
mod credentials;
mod lookup;
mod resolver;
mod status;

// Re-export public API
pub use classifier::DelegationClassifier;
pub use credentials::{
    attach_credentials, domains_preview, group_by_nameservers, Prompter, StdinPrompter,
};
pub use lookup::{DnsLookup, HickoryLookup};
pub use resolver::AddressResolver;
pub use status::{classify_addresses, owners_for, ProgressCallback, StatusEvaluator};

#[cfg(test)]
pub(crate) mod test_support;
