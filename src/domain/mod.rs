//! Base domain extraction and hostname normalization.
//!
//! Uses the Public Suffix List (PSL) so that multi-part suffixes such as
//! `co.uk` are handled correctly.
//!
//! Key functions:
//! - `normalize_hostname()` - Lowercases and strips the trailing root dot
//! - `base_domain()` - Extracts the registrable domain of a hostname

/// Lowercases a hostname and removes surrounding whitespace and any trailing
/// root dot.
pub fn normalize_hostname(host: &str) -> String {
    host.trim().trim_end_matches('.').to_ascii_lowercase()
}

/// Extracts the registrable domain (one label plus the public suffix).
///
/// `sub.example.co.uk` becomes `example.co.uk`. Names that have no registrable
/// part (a bare suffix, a single label, an IP address) are returned
/// normalized but otherwise unchanged.
pub fn base_domain(host: &str) -> String {
    let host = normalize_hostname(host);
    if host.parse::<std::net::IpAddr>().is_ok() {
        return host;
    }
    match psl::domain_str(&host) {
        Some(domain) => domain.to_string(),
        None => host,
    }
}

/// Returns true when both hostnames have the same registrable domain.
pub fn same_base_domain(a: &str, b: &str) -> bool {
    base_domain(a) == base_domain(b)
}
