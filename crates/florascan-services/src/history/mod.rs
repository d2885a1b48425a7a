//! Session-scoped identification history
//!
//! Each session maps stored filenames to normalized results in insertion
//! order. Only successful identifications (`is_plant == true`) are kept, so
//! the gallery never shows non-plant uploads. Entries expire by TTL via an
//! explicit `evict_expired(now, ...)` sweep the API layer runs once per
//! request; the sweep also deletes the backing files, best-effort.
//!
//! The per-session upload counter caps total uploads regardless of expiry;
//! only clearing the history resets it.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use florascan_core::models::NormalizedResult;
use florascan_core::AppError;
use florascan_storage::Storage;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub filename: String,
    pub result: NormalizedResult,
}

#[derive(Default)]
struct SessionHistory {
    entries: Vec<HistoryEntry>,
    upload_count: u32,
}

pub struct SessionHistoryStore {
    sessions: DashMap<String, SessionHistory>,
    storage: Arc<dyn Storage>,
    max_uploads: u32,
}

impl SessionHistoryStore {
    pub fn new(storage: Arc<dyn Storage>, max_uploads: u32) -> Self {
        Self {
            sessions: DashMap::new(),
            storage,
            max_uploads,
        }
    }

    /// Reject the upload before any file I/O when the session has exhausted
    /// its upload budget.
    pub fn check_upload_allowed(&self, session_id: &str) -> Result<(), AppError> {
        let used = self.upload_count(session_id);
        if used >= self.max_uploads {
            return Err(AppError::RateLimitExceeded {
                used,
                limit: self.max_uploads,
            });
        }
        Ok(())
    }

    /// Count a completed upload against the session budget. Eviction never
    /// decrements this; only `clear` resets it.
    pub fn record_upload(&self, session_id: &str) {
        let mut session = self.sessions.entry(session_id.to_string()).or_default();
        session.upload_count += 1;
    }

    pub fn upload_count(&self, session_id: &str) -> u32 {
        self.sessions
            .get(session_id)
            .map(|s| s.upload_count)
            .unwrap_or(0)
    }

    /// Add a result to the session history. Non-plant results are discarded;
    /// returns whether the entry was stored.
    pub fn add(&self, session_id: &str, filename: String, result: NormalizedResult) -> bool {
        if !result.is_plant {
            tracing::debug!(
                session = %session_id,
                filename = %filename,
                "Discarding non-plant result from history"
            );
            return false;
        }

        let mut session = self.sessions.entry(session_id.to_string()).or_default();
        session.entries.push(HistoryEntry { filename, result });
        true
    }

    /// List the session's entries in insertion order.
    pub fn list(&self, session_id: &str) -> Vec<HistoryEntry> {
        self.sessions
            .get(session_id)
            .map(|s| s.entries.clone())
            .unwrap_or_default()
    }

    pub fn contains(&self, session_id: &str, filename: &str) -> bool {
        self.sessions
            .get(session_id)
            .map(|s| s.entries.iter().any(|e| e.filename == filename))
            .unwrap_or(false)
    }

    pub fn get(&self, session_id: &str, filename: &str) -> Option<NormalizedResult> {
        self.sessions.get(session_id).and_then(|s| {
            s.entries
                .iter()
                .find(|e| e.filename == filename)
                .map(|e| e.result.clone())
        })
    }

    /// Remove entries older than `ttl` as of `now` and delete their backing
    /// files. Returns the number of evicted entries. File deletion is
    /// best-effort: a failure is logged, never fatal, and the entry is still
    /// dropped from history.
    #[tracing::instrument(skip(self), fields(session = %session_id))]
    pub async fn evict_expired(
        &self,
        session_id: &str,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> usize {
        let stale: Vec<String> = {
            let Some(mut session) = self.sessions.get_mut(session_id) else {
                return 0;
            };

            let (stale, fresh): (Vec<HistoryEntry>, Vec<HistoryEntry>) = session
                .entries
                .drain(..)
                .partition(|e| now.signed_duration_since(e.result.uploaded_at) >= ttl);
            session.entries = fresh;
            stale.into_iter().map(|e| e.filename).collect()
        };

        if !stale.is_empty() {
            tracing::info!(evicted = stale.len(), "Evicted expired history entries");
        }

        let count = stale.len();
        for filename in stale {
            if let Err(e) = self.storage.delete(&filename).await {
                tracing::warn!(
                    error = %e,
                    filename = %filename,
                    "Failed to delete expired upload, continuing"
                );
            }
        }

        count
    }

    /// Drop the session's entire history, delete its files, and reset the
    /// upload counter.
    pub async fn clear(&self, session_id: &str) {
        let Some((_, session)) = self.sessions.remove(session_id) else {
            return;
        };

        tracing::info!(
            session = %session_id,
            entries = session.entries.len(),
            "Cleared session history"
        );

        for entry in session.entries {
            if let Err(e) = self.storage.delete(&entry.filename).await {
                tracing::warn!(
                    error = %e,
                    filename = %entry.filename,
                    "Failed to delete upload while clearing history, continuing"
                );
            }
        }
    }
}
