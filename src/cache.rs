//! Result cache/history collaborator interface.
//!
//! Keyed by the URL fingerprint. Reads only return entries younger than the
//! freshness window; writes upsert the full result together with the
//! requesting identity (for the history view the surrounding product keeps).

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use log::debug;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::config::CACHE_FRESHNESS_HOURS;
use crate::models::PipelineResult;

/// Key-value persistence of analysis results, keyed by URL fingerprint.
#[async_trait]
pub trait AnalysisCache: Send + Sync {
    /// Returns the stored result for a fingerprint if it is fresher than the
    /// freshness window, else a miss.
    async fn get(&self, fingerprint: &str) -> Option<PipelineResult>;

    /// Upserts a result under a fingerprint, tagged with the requesting user.
    async fn put(&self, fingerprint: &str, user: &str, result: &PipelineResult);
}

struct CacheEntry {
    result: PipelineResult,
    // Kept for parity with the remote history store, which records who
    // requested each analysis.
    #[allow(dead_code)]
    user: String,
    stored_at: DateTime<Utc>,
}

/// In-memory cache for tests, local development, and single-process runs.
pub struct InMemoryCache {
    freshness: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl InMemoryCache {
    /// Creates a cache with the default 24-hour freshness window.
    pub fn new() -> Self {
        Self::with_freshness(Duration::hours(CACHE_FRESHNESS_HOURS))
    }

    /// Creates a cache with a custom freshness window.
    pub fn with_freshness(freshness: Duration) -> Self {
        InMemoryCache {
            freshness,
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalysisCache for InMemoryCache {
    async fn get(&self, fingerprint: &str) -> Option<PipelineResult> {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        if let Some(entry) = entries.get(fingerprint) {
            if Utc::now() - entry.stored_at <= self.freshness {
                debug!("Cache hit for {fingerprint}");
                return Some(entry.result.clone());
            }
        }
        if entries.remove(fingerprint).is_some() {
            debug!("Cache entry for {fingerprint} expired");
        }
        None
    }

    async fn put(&self, fingerprint: &str, user: &str, result: &PipelineResult) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.insert(
            fingerprint.to_string(),
            CacheEntry {
                result: result.clone(),
                user: user.to_string(),
                stored_at: Utc::now(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResultSource;

    fn stored_result() -> PipelineResult {
        PipelineResult {
            success: true,
            data: None,
            error: None,
            source: ResultSource::Primary,
        }
    }

    #[tokio::test]
    async fn test_fresh_entry_is_returned() {
        let cache = InMemoryCache::new();
        cache.put("abc123", "alex", &stored_result()).await;

        let hit = cache.get("abc123").await.expect("hit");
        assert!(hit.success);
        assert_eq!(hit.source, ResultSource::Primary);
    }

    #[tokio::test]
    async fn test_missing_fingerprint_is_a_miss() {
        let cache = InMemoryCache::new();
        assert!(cache.get("nothing-here").await.is_none());
    }

    #[tokio::test]
    async fn test_stale_entry_is_evicted() {
        let cache = InMemoryCache::new();
        cache.put("abc123", "alex", &stored_result()).await;

        // Age the entry past the freshness window by hand.
        {
            let mut entries = cache.entries.lock().unwrap();
            let entry = entries.get_mut("abc123").unwrap();
            entry.stored_at = Utc::now() - Duration::hours(CACHE_FRESHNESS_HOURS + 1);
        }

        assert!(cache.get("abc123").await.is_none());
        // The expired entry was removed, not left to rot.
        assert!(cache.entries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_put_overwrites_existing_entry() {
        let cache = InMemoryCache::new();
        cache.put("abc123", "alex", &stored_result()).await;

        let mut newer = stored_result();
        newer.source = ResultSource::Fallback;
        cache.put("abc123", "sam", &newer).await;

        let hit = cache.get("abc123").await.expect("hit");
        assert_eq!(hit.source, ResultSource::Fallback);
        assert_eq!(cache.entries.lock().unwrap()["abc123"].user, "sam");
    }
}
