//! Error handling.
//!
//! Errors are grouped by where they occur:
//! - **Initialization**: logger and HTTP client setup (fatal)
//! - **Fetch**: transport and cache failures of the rate-limited fetcher
//! - **Resolve**: anything that stops one hostname from being resolved
//!
//! Resolve errors never abort a batch; the evaluator maps them to
//! `Status::Unknown`.

mod types;

// Re-export public API
pub use types::{FetchError, InitializationError, ResolveError};
