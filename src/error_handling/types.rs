//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Failures of the caching, rate-limited fetcher.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The HTTP request could not be made or its body could not be read.
    #[error("could not make request to {url}: {reason}")]
    CouldNotMakeRequest { url: String, reason: String },

    /// The body was fetched but could not be written to the cache.
    #[error("could not cache response for {url}: {reason}")]
    CouldNotCache { url: String, reason: String },
}

/// Reasons a hostname could not be resolved to addresses.
///
/// Every variant is downgraded to `Status::Unknown` by the evaluator.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Transport or cache failure while talking to the Cloudflare API.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The hostname is behind Cloudflare but no credentials were supplied.
    #[error("no Cloudflare credentials for {0}")]
    NoCredentials(String),

    /// The credentials do not see a zone for the hostname's base domain.
    #[error("no zone found for domain {0}")]
    NoZoneFound(String),

    /// The API returned something that is not the expected JSON envelope.
    #[error("invalid response from Cloudflare API: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    /// The API answered with `success: false`.
    #[error("Cloudflare API error: {0}")]
    Api(String),

    /// A CNAME chain points back at a name already being resolved.
    #[error("alias loop detected while resolving {0}")]
    AliasLoop(String),

    /// Ordinary DNS resolution failed.
    #[error("DNS lookup failed for {host}: {reason}")]
    Lookup { host: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_wraps_into_resolve_error() {
        let err: ResolveError = FetchError::CouldNotMakeRequest {
            url: "https://api.example.com/zones".to_string(),
            reason: "connection refused".to_string(),
        }
        .into();
        assert!(matches!(
            err,
            ResolveError::Fetch(FetchError::CouldNotMakeRequest { .. })
        ));
        assert_eq!(
            err.to_string(),
            "could not make request to https://api.example.com/zones: connection refused"
        );
    }

    #[test]
    fn test_invalid_json_maps_to_invalid_response() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: ResolveError = parse_err.into();
        assert!(matches!(err, ResolveError::InvalidResponse(_)));
    }

    #[test]
    fn test_error_messages_name_the_host() {
        assert_eq!(
            ResolveError::NoCredentials("c.com".to_string()).to_string(),
            "no Cloudflare credentials for c.com"
        );
        assert_eq!(
            ResolveError::NoZoneFound("example.com".to_string()).to_string(),
            "no zone found for domain example.com"
        );
    }
}
