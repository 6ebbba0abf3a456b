//! Response cache backends.
//!
//! The fetcher stores every successful response body under its URL. The file
//! backend keeps one JSON-encoded entry per line in a single append-only file;
//! the whole file expires once its mtime is older than the configured TTL.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

/// Storage for fetched response bodies, keyed by URL.
pub trait Cacher: Send + Sync {
    /// Returns the cached value, or `None` on a miss or an expired cache.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores a value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    key: String,
    value: String,
}

/// Cache backed by a single file (normally under the OS temp directory).
#[derive(Debug, Clone)]
pub struct FileCache {
    path: PathBuf,
    ttl: Duration,
}

impl FileCache {
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_expired(&self) -> bool {
        let Ok(metadata) = std::fs::metadata(&self.path) else {
            return false;
        };
        match metadata.modified() {
            Ok(modified) => modified.elapsed().unwrap_or_default() > self.ttl,
            // No usable mtime: assume stale rather than serve it forever
            Err(_) => true,
        }
    }
}

impl Cacher for FileCache {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        if self.is_expired() {
            log::debug!("Cache file {} expired, removing it", self.path.display());
            std::fs::remove_file(&self.path).with_context(|| {
                format!("Failed to delete expired cache file {}", self.path.display())
            })?;
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read cache file {}", self.path.display()))?;

        // Last write wins if a key was ever appended twice
        for line in content.lines().rev() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<CacheEntry>(line) {
                Ok(entry) if entry.key == key => return Ok(Some(entry.value)),
                Ok(_) => {}
                Err(e) => log::warn!("Skipping corrupt cache line: {e}"),
            }
        }

        Ok(None)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).context("Failed to create cache directory")?;
            }
        }

        let entry = CacheEntry {
            key: key.to_string(),
            value: value.to_string(),
        };
        let line = serde_json::to_string(&entry).context("Failed to serialize cache entry")?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open cache file {}", self.path.display()))?;
        writeln!(file, "{line}").context("Failed to write to cache file")?;

        Ok(())
    }
}

/// Process-local cache; nothing survives the run.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cacher for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("memory cache lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("memory cache lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
