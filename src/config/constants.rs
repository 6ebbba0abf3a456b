//! Configuration constants.
//!
//! Timeouts, limits and provider endpoints used as defaults throughout the
//! pipeline.

use std::time::Duration;

/// Maximum number of hostname evaluations in flight at once.
pub const SEMAPHORE_LIMIT: usize = 100;

/// Per-request HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 10;

/// DNS query timeout in seconds.
pub const DNS_TIMEOUT_SECS: u64 = 5;

/// Delay inserted before every live request after the first one.
pub const REQUEST_DELAY: Duration = Duration::from_millis(200);

/// Name of the response cache file, created under the OS temp directory.
pub const CACHE_FILENAME: &str = "domain_reconcile.cache";

/// Lifetime of the response cache file, measured from its mtime.
pub const CACHE_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

/// User-Agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("domain_reconcile/", env!("CARGO_PKG_VERSION"));

// Cloudflare
/// Base URL of the Cloudflare v4 REST API.
pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";
/// Every Cloudflare-assigned nameserver ends with this suffix.
pub const CLOUDFLARE_NS_SUFFIX: &str = "ns.cloudflare.com";
/// Page size for zone and DNS record listings (the API maximum for zones).
pub const PER_PAGE: u32 = 50;

/// Number of hostnames shown when asking for a nameserver group's credentials.
pub const CREDENTIAL_PROMPT_PREVIEW: usize = 3;
