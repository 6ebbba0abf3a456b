//! Owner inventory loading.
//!
//! The inventory is a JSON array of owners, each declaring the server its
//! hostnames should point at:
//!
//! ```json
//! [{"id": "app1", "server_name": "web-1", "server_ip": "203.0.113.10",
//!   "domains": ["example.com", "www.example.com"]}]
//! ```

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::normalize_hostname;
use crate::models::Owner;

/// Reads the owner inventory from `path`, or from stdin when `path` is `-`.
///
/// # Errors
///
/// Fails if the input cannot be read or is not a JSON array of owners.
pub fn load_owners(path: &Path) -> Result<Vec<Owner>> {
    let (source, contents) = if path == Path::new("-") {
        let mut contents = String::new();
        std::io::stdin()
            .read_to_string(&mut contents)
            .context("Failed to read owner inventory from stdin")?;
        ("stdin".to_string(), contents)
    } else {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read owner inventory {}", path.display()))?;
        (path.display().to_string(), contents)
    };

    parse_owners(&contents).with_context(|| format!("Invalid owner inventory in {source}"))
}

/// Parses an inventory document and normalizes every declared hostname.
pub fn parse_owners(contents: &str) -> Result<Vec<Owner>> {
    let mut owners: Vec<Owner> = serde_json::from_str(contents)?;
    for owner in &mut owners {
        owner.domains = owner
            .domains
            .iter()
            .map(|d| normalize_hostname(d))
            .filter(|d| !d.is_empty())
            .collect();
    }
    Ok(owners)
}

/// All declared hostnames, first-seen order, without duplicates.
pub fn hostnames_from_owners(owners: &[Owner]) -> Vec<String> {
    let mut hostnames: Vec<String> = Vec::new();
    for domain in owners.iter().flat_map(|o| &o.domains) {
        if !hostnames.contains(domain) {
            hostnames.push(domain.clone());
        }
    }
    hostnames
}
