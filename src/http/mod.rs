//! HTTP access for the Cloudflare API.
//!
//! Every remote call goes through a `CachingFetcher`, which:
//! - answers repeated URLs from a TTL'd cache without touching the network
//! - sleeps a fixed delay before every live request after the first
//! - reports transport and cache-write failures as distinct `FetchError`s

mod cache;
mod client;

// Re-export public API
pub use cache::{Cacher, FileCache, MemoryCache};
pub use client::{CachingFetcher, DelaySleeper, Fetcher, HttpGet, ReqwestGet, Request, Sleeper};
