//! In-memory cache of live readings keyed by location
//!
//! Entries that have gone stale are dropped rather than kept around: a lookup
//! removes the stale entry it finds, and every insert sweeps the rest.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use shared::{CachedReading, StalenessPolicy};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct ReadingCache {
    entries: RwLock<HashMap<String, CachedReading>>,
}

fn cache_key(location: &str) -> String {
    location.trim().to_lowercase()
}

impl ReadingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an entry, replacing any previous one for the same location, and
    /// evict entries that are stale as of the new entry's capture time
    pub async fn put(&self, entry: CachedReading, policy: &StalenessPolicy) {
        let now = entry.captured_at;
        let key = cache_key(&entry.location);

        let mut entries = self.entries.write().await;
        entries.retain(|_, cached| !cached.is_stale_at(policy, now));
        entries.insert(key, entry);
    }

    /// Entry for a location only if it is still fresh at `now`
    pub async fn fresh(
        &self,
        location: &str,
        policy: &StalenessPolicy,
        now: DateTime<Utc>,
    ) -> Option<CachedReading> {
        let key = cache_key(location);
        let mut entries = self.entries.write().await;

        let stale = entries.get(&key)?.is_stale_at(policy, now);
        if stale {
            entries.remove(&key);
            return None;
        }
        entries.get(&key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
