//! Cloudflare API client for zone and record lookups.
//!
//! Used for hostnames whose public DNS only shows Cloudflare edge addresses.

mod resolver;
mod types;

pub use resolver::{name_matches, CloudflareResolver};
pub use types::{CloudflareResponse, CodedMessage, DnsRecord, RecordKind, ResultInfo, Zone};
