//! Core data model shared by the classifier, the credential protocol and the
//! evaluator.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Cloudflare account credentials (account email + global API key).
///
/// Collected interactively and kept in memory for one run only.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub api_key: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            api_key: api_key.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Provider metadata attached to a hostname whose base domain is served by
/// Cloudflare nameservers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProviderMetadata {
    /// Sorted, trailing-dot-trimmed nameservers of the base domain.
    pub nameservers: Vec<String>,
    pub credentials: Option<Credentials>,
}

/// How a hostname has to be resolved, decided once at classification time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Delegation {
    /// Plain DNS shows the real target.
    #[default]
    Direct,
    /// Cloudflare hides the real target; its API has to be asked instead.
    Provider(ProviderMetadata),
}

/// A hostname tagged with its delegation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hostname {
    pub name: String,
    pub delegation: Delegation,
}

impl Hostname {
    /// A hostname that resolves through ordinary DNS.
    pub fn direct(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            delegation: Delegation::Direct,
        }
    }

    /// A hostname behind Cloudflare, without credentials yet.
    pub fn delegated(name: impl Into<String>, nameservers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            delegation: Delegation::Provider(ProviderMetadata {
                nameservers,
                credentials: None,
            }),
        }
    }

    pub fn provider(&self) -> Option<&ProviderMetadata> {
        match &self.delegation {
            Delegation::Provider(meta) => Some(meta),
            Delegation::Direct => None,
        }
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.provider().and_then(|meta| meta.credentials.as_ref())
    }
}

/// Hostnames that share one set of Cloudflare nameservers, and therefore
/// (almost certainly) one Cloudflare account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameserverGroup {
    pub nameservers: Vec<String>,
    /// Never empty; first-seen order.
    pub hostnames: Vec<String>,
    pub credentials: Option<Credentials>,
}

/// Outcome of comparing a hostname's addresses with its expected server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// At least one resolved address is the expected one.
    Ok,
    /// Resolved, but not to the expected address.
    Inactive,
    /// Resolution could not be attempted or failed.
    Unknown,
}

/// An entity that declares hostnames and the server they should point at.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Owner {
    pub id: String,
    #[serde(default)]
    pub server_name: String,
    #[serde(default)]
    pub server_ip: String,
    #[serde(default)]
    pub domains: Vec<String>,
}

/// One evaluated hostname.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationResult {
    pub owner_id: String,
    pub hostname: String,
    pub server_name: String,
    pub status: Status,
}
