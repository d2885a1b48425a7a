//! Content-addressed result cache
//!
//! Maps a SHA-256 content hash to a previously retrieved raw identification
//! payload. Keyed purely by content: the same image uploaded by any session
//! hits the same entry, so identical bytes never trigger a second external
//! call within the TTL window.
//!
//! Expiry is lazy: entries past their TTL are removed and treated as absent
//! on lookup. DashMap shards the map so gets and puts on unrelated hashes do
//! not serialize on a global lock.

use dashmap::DashMap;
use florascan_core::models::RawIdentification;
use std::time::{Duration, Instant};

struct CacheEntry {
    result: RawIdentification,
    stored_at: Instant,
}

pub struct ResultCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl ResultCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Look up a cached raw result by content hash. Expired entries are
    /// evicted on the spot and reported as a miss.
    pub fn get(&self, hash: &str) -> Option<RawIdentification> {
        if let Some(entry) = self.entries.get(hash) {
            if entry.stored_at.elapsed() < self.ttl {
                tracing::debug!(hash = %hash, "Result cache hit");
                return Some(entry.result.clone());
            }
            drop(entry);
            self.entries.remove(hash);
            tracing::debug!(hash = %hash, "Result cache entry expired");
        }
        None
    }

    /// Store a raw result under its content hash.
    pub fn put(&self, hash: String, result: RawIdentification) {
        self.entries.insert(
            hash,
            CacheEntry {
                result,
                stored_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
