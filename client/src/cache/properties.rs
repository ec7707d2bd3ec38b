//! Property-list cache

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::ClientError;
use crate::filesys::dir::Dir;
use crate::models::device::PropertyDescriptor;

/// Property-list cache entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyListEntry {
    pub device_type: String,
    pub feature_code: String,
    pub properties: Vec<PropertyDescriptor>,
    pub cached_at: u64,
}

/// Property lists keyed by (device type, feature code).
///
/// Entries live in memory and, when a directory is given, as one JSON file
/// per key so they survive restarts. Entries older than `max_age` are
/// ignored.
pub struct PropertyListCache {
    entries: RwLock<HashMap<String, PropertyListEntry>>,
    dir: Option<Dir>,
    max_age: Duration,
}

impl PropertyListCache {
    /// Create a cache persisted under `dir`
    pub fn new(dir: Dir, max_age: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            dir: Some(dir),
            max_age,
        }
    }

    /// Create a cache that is never written to disk
    pub fn in_memory(max_age: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            dir: None,
            max_age,
        }
    }

    /// Get a fresh property list, loading it from disk if needed
    pub async fn get(
        &self,
        device_type: &str,
        feature_code: &str,
    ) -> Option<Vec<PropertyDescriptor>> {
        let key = cache_key(device_type, feature_code);

        let cached = {
            let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
            entries.get(&key).cloned()
        };
        let entry = match cached {
            Some(entry) => entry,
            None => {
                let entry = self.load(&key).await?;
                let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
                entries.insert(key.clone(), entry.clone());
                entry
            }
        };

        if self.is_fresh(&entry) {
            debug!("Property list for {} served from cache", key);
            Some(entry.properties)
        } else {
            debug!("Property list for {} is stale", key);
            None
        }
    }

    /// Insert a property list and persist it
    pub async fn insert(
        &self,
        device_type: &str,
        feature_code: &str,
        properties: Vec<PropertyDescriptor>,
    ) {
        let key = cache_key(device_type, feature_code);
        let entry = PropertyListEntry {
            device_type: device_type.to_string(),
            feature_code: feature_code.to_string(),
            properties,
            cached_at: now_secs(),
        };

        if let Some(dir) = &self.dir {
            if let Err(e) = dir.file(&file_name(&key)).write_json(&entry).await {
                warn!("Failed to persist property list for {}: {}", key, e);
            }
        }

        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key, entry);
    }

    /// Clear the cache
    pub async fn clear(&self) -> Result<(), ClientError> {
        {
            let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
            entries.clear();
        }
        if let Some(dir) = &self.dir {
            dir.delete().await?;
        }
        Ok(())
    }

    /// Get cache size
    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.len()
    }

    /// Check if cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_fresh(&self, entry: &PropertyListEntry) -> bool {
        now_secs().saturating_sub(entry.cached_at) <= self.max_age.as_secs()
    }

    async fn load(&self, key: &str) -> Option<PropertyListEntry> {
        let file = self.dir.as_ref()?.file(&file_name(key));
        if !file.exists().await {
            return None;
        }
        match file.read_json::<PropertyListEntry>().await {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Ignoring unreadable property cache {}: {}", file.path().display(), e);
                None
            }
        }
    }
}

fn cache_key(device_type: &str, feature_code: &str) -> String {
    format!("{}-{}", device_type, feature_code)
}

fn file_name(key: &str) -> String {
    let safe: String = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    format!("{}.json", safe)
}

fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
