use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use econbr_models::AssistantReply;
use moka::future::Cache;
use tracing::debug;

/// One stored answer plus its creation instant.
///
/// The reply is behind an `Arc`: a hit hands back the same object that was
/// stored, never a mutated copy.
#[derive(Clone)]
struct CachedAnswer {
    reply: Arc<AssistantReply>,
    stored_at: DateTime<Utc>,
}

/// Snapshot of the cache state for the `cache info` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheInfo {
    pub entries: u64,
    pub oldest: Option<DateTime<Utc>>,
    pub newest: Option<DateTime<Utc>>,
    pub ttl: Duration,
}

/// TTL cache for answered queries, backed by moka.
///
/// Expiry is lazy: entries past the TTL stop being returned by `get` and are
/// physically dropped by moka's housekeeping, with no background sweep of our
/// own. Growth is bounded only by `max_capacity` within the process lifetime.
pub struct AnswerCache {
    inner: Cache<String, CachedAnswer>,
    ttl: Duration,
}

impl AnswerCache {
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
            ttl,
        }
    }

    /// Look up an unexpired answer.
    pub async fn get(&self, key: &str) -> Option<Arc<AssistantReply>> {
        match self.inner.get(key).await {
            Some(entry) => {
                debug!(key, "cache hit");
                Some(entry.reply)
            }
            None => {
                debug!(key, "cache miss");
                None
            }
        }
    }

    /// Store an answer under `key`, stamped with the current time.
    pub async fn put(&self, key: String, reply: AssistantReply) {
        let entry = CachedAnswer {
            reply: Arc::new(reply),
            stored_at: Utc::now(),
        };
        self.inner.insert(key, entry).await;
    }

    /// Drop every entry.
    pub async fn clear(&self) {
        self.inner.invalidate_all();
        self.inner.run_pending_tasks().await;
        debug!("cache cleared");
    }

    /// Entry count plus oldest/newest creation timestamps.
    pub async fn info(&self) -> CacheInfo {
        self.inner.run_pending_tasks().await;

        let mut oldest: Option<DateTime<Utc>> = None;
        let mut newest: Option<DateTime<Utc>> = None;
        for (_, entry) in self.inner.iter() {
            let at = entry.stored_at;
            oldest = Some(oldest.map_or(at, |o| o.min(at)));
            newest = Some(newest.map_or(at, |n| n.max(at)));
        }

        CacheInfo {
            entries: self.inner.entry_count(),
            oldest,
            newest,
            ttl: self.ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
