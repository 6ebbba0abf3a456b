//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    CACHE_FILENAME, CACHE_LIFETIME, CLOUDFLARE_API_BASE, HTTP_TIMEOUT_SECS, REQUEST_DELAY,
    SEMAPHORE_LIMIT,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Run configuration.
///
/// Parsed from the command line by the binary, or built programmatically by
/// library callers via `Default`.
///
/// # Examples
///
/// ```no_run
/// use domain_reconcile::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     inventory: PathBuf::from("owners.json"),
///     include_unknown: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "domain_reconcile",
    about = "Finds hostnames whose DNS no longer points at the server that hosts them."
)]
pub struct Config {
    /// JSON file listing owners and their domains ("-" reads stdin)
    #[arg(value_parser)]
    pub inventory: PathBuf,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Also report hostnames whose status could not be determined
    #[arg(short = 'u', long)]
    pub include_unknown: bool,

    /// Maximum number of hostnames resolved concurrently
    #[arg(long, default_value_t = SEMAPHORE_LIMIT)]
    pub max_concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = HTTP_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Delay between consecutive live API requests, in milliseconds
    #[arg(long, default_value_t = 200)]
    pub request_delay_ms: u64,

    /// Lifetime of the response cache file, in hours
    #[arg(long, default_value_t = 24)]
    pub cache_ttl_hours: u64,

    /// Response cache file (defaults to a file in the OS temp directory)
    #[arg(long)]
    pub cache_file: Option<PathBuf>,

    /// Keep API responses in memory only
    #[arg(long)]
    pub no_cache: bool,

    /// Cloudflare API base URL
    #[arg(long, default_value = CLOUDFLARE_API_BASE)]
    pub api_base: String,
}

impl Config {
    /// Location of the response cache file.
    pub fn cache_path(&self) -> PathBuf {
        self.cache_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(CACHE_FILENAME))
    }

    /// Delay inserted between live requests.
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    /// How long the cache file stays valid after its last write.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_hours * 60 * 60)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inventory: PathBuf::from("owners.json"),
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
            include_unknown: false,
            max_concurrency: SEMAPHORE_LIMIT,
            timeout_seconds: HTTP_TIMEOUT_SECS,
            #[allow(clippy::cast_possible_truncation)]
            request_delay_ms: REQUEST_DELAY.as_millis() as u64,
            cache_ttl_hours: CACHE_LIFETIME.as_secs() / 3600,
            cache_file: None,
            no_cache: false,
            api_base: CLOUDFLARE_API_BASE.to_string(),
        }
    }
}
