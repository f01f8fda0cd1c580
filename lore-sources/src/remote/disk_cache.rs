//! On-disk JSON cache for fetched documents.
//!
//! Keys are hashed to filenames; freshness is judged from file mtime, so
//! a stale entry is simply re-fetched and overwritten. Cache problems are
//! logged and treated as misses, never surfaced.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tracing::{debug, warn};

pub struct DiskCache {
    dir: PathBuf,
    ttl: Duration,
}

impl DiskCache {
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            dir: dir.into(),
            ttl,
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let digest = blake3::hash(key.as_bytes()).to_hex();
        self.dir.join(format!("{digest}.json"))
    }

    /// Get a fresh cached value, or `None` on miss, staleness, or error.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let path = self.path_for(key);
        if !is_fresh(&path, self.ttl) {
            return None;
        }

        match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(key, error = %e, "corrupt cache entry, ignoring");
                    None
                }
            },
            Err(e) => {
                debug!(key, error = %e, "cache read failed");
                None
            }
        }
    }

    /// Store a value. Failures are logged and swallowed.
    pub fn put(&self, key: &str, value: &serde_json::Value) {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!(key, error = %e, "cache dir creation failed");
                return;
            }
        }

        match serde_json::to_string_pretty(value) {
            Ok(contents) => {
                if let Err(e) = std::fs::write(&path, contents) {
                    warn!(key, error = %e, "cache write failed");
                }
            }
            Err(e) => warn!(key, error = %e, "cache serialization failed"),
        }
    }
}

fn is_fresh(path: &Path, ttl: Duration) -> bool {
    let Ok(meta) = std::fs::metadata(path) else {
        return false;
    };
    let Ok(modified) = meta.modified() else {
        return false;
    };
    match SystemTime::now().duration_since(modified) {
        Ok(age) => age < ttl,
        // Clock skew puts mtime in the future; treat as fresh.
        Err(_) => true,
    }
}
