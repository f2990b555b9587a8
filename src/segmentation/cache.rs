/*!
 * Segment caching.
 *
 * Remembers the segments produced for a document so that unchanged files
 * are not re-segmented on the next run. The cache is an explicit object
 * owned by the caller: load it, hand it to the pipeline, persist it.
 * Entries are keyed by file path, a SHA-256 fingerprint of the raw text
 * and the segment limit, so any change to either input misses.
 */

use anyhow::{Context, Result};
use log::debug;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::model::Segment;
use crate::file_utils::FileManager;

const CACHE_FORMAT_VERSION: u32 = 1;

/// Cache key combining file path, content fingerprint and limit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
struct CacheKey {
    filepath: String,
    fingerprint: String,
    limit: usize,
}

impl CacheKey {
    fn new(filepath: &str, raw_text: &str, limit: usize) -> Self {
        Self {
            filepath: filepath.to_string(),
            fingerprint: fingerprint(raw_text),
            limit,
        }
    }
}

/// On-disk layout of a persisted cache
#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    version: u32,
    entries: Vec<CacheEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    #[serde(flatten)]
    key: CacheKey,
    segments: Vec<Segment>,
}

/// Hex SHA-256 of a document's raw text
pub fn fingerprint(raw_text: &str) -> String {
    format!("{:x}", Sha256::digest(raw_text.as_bytes()))
}

/// Cache of segment lists per document
pub struct SegmentCache {
    /// Internal cache storage
    entries: Arc<RwLock<HashMap<CacheKey, Vec<Segment>>>>,

    hits: Arc<AtomicUsize>,
    misses: Arc<AtomicUsize>,

    /// Whether caching is enabled
    enabled: bool,
}

impl SegmentCache {
    /// Create an empty cache
    pub fn new(enabled: bool) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            hits: Arc::new(AtomicUsize::new(0)),
            misses: Arc::new(AtomicUsize::new(0)),
            enabled,
        }
    }

    /// Load a persisted cache. A missing file gives an empty, enabled cache;
    /// a file written by another format version is ignored.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let cache = Self::new(true);

        if !FileManager::file_exists(path) {
            debug!("No segment cache at {:?}, starting empty", path);
            return Ok(cache);
        }

        let content = FileManager::read_to_string(path)?;
        let file: CacheFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse segment cache: {:?}", path))?;

        if file.version != CACHE_FORMAT_VERSION {
            debug!("Ignoring segment cache with format version {}", file.version);
            return Ok(cache);
        }

        {
            let mut entries = cache.entries.write();
            for entry in file.entries {
                entries.insert(entry.key, entry.segments);
            }
        }

        debug!("Loaded {} cached documents from {:?}", cache.len(), path);
        Ok(cache)
    }

    /// Write the cache to `path`, creating parent directories as needed
    pub fn persist<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        let mut entries: Vec<CacheEntry> = self
            .entries
            .read()
            .iter()
            .map(|(key, segments)| CacheEntry {
                key: key.clone(),
                segments: segments.clone(),
            })
            .collect();
        // Stable output for identical content
        entries.sort_by(|a, b| a.key.filepath.cmp(&b.key.filepath).then(a.key.limit.cmp(&b.key.limit)));

        let file = CacheFile {
            version: CACHE_FORMAT_VERSION,
            entries,
        };
        let json = serde_json::to_string(&file).context("Failed to serialize segment cache")?;
        FileManager::write_to_file(path, &json)?;

        debug!("Persisted {} cached documents to {:?}", file.entries.len(), path);
        Ok(())
    }

    /// Cached segments for a document, if its content and limit are unchanged
    pub fn get(&self, filepath: &str, raw_text: &str, limit: usize) -> Option<Vec<Segment>> {
        if !self.enabled {
            return None;
        }

        let key = CacheKey::new(filepath, raw_text, limit);
        match self.entries.read().get(&key) {
            Some(segments) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Cache hit for {}", filepath);
                Some(segments.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store a document's segments, replacing any older entry for the same path
    pub fn store(&self, filepath: &str, raw_text: &str, limit: usize, segments: &[Segment]) {
        if !self.enabled {
            return;
        }

        let key = CacheKey::new(filepath, raw_text, limit);
        let mut entries = self.entries.write();
        entries.retain(|existing, _| existing.filepath != filepath);
        entries.insert(key, segments.to_vec());
    }

    /// Get cache statistics: hits, misses and hit rate
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;

        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        (hits, misses, hit_rate)
    }

    /// Clear the cache
    pub fn clear(&self) {
        self.entries.write().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        debug!("Segment cache cleared");
    }

    /// Get the number of entries in the cache
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for SegmentCache {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Clone for SegmentCache {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            hits: self.hits.clone(),
            misses: self.misses.clone(),
            enabled: self.enabled,
        }
    }
}
