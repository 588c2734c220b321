//! Single-slot TTL cache for the rendered movie list.
//!
//! `/movies` serves the same payload to every caller, so one slot is all
//! the caching this service needs. Only successful payloads get stored;
//! errors are never cached, which makes an upstream recovery visible on
//! the very next request.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug)]
struct Entry<T> {
    stored_at: Instant,
    value: T,
}

/// Time-bounded, single-slot cache shared across request handlers.
///
/// Clones are cheap and share the slot. A zero TTL disables reuse
/// entirely.
#[derive(Debug, Clone)]
pub struct ResponseCache<T> {
    ttl: Duration,
    slot: Arc<RwLock<Option<Entry<T>>>>,
}

impl<T: Clone> ResponseCache<T> {
    /// Create a cache whose entries stay fresh for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Arc::new(RwLock::new(None)),
        }
    }

    /// Get a copy of the cached value if it is still fresh.
    pub async fn get(&self) -> Option<T> {
        let slot = self.slot.read().await;
        match slot.as_ref() {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.value.clone()),
            _ => None,
        }
    }

    /// Store a value, replacing whatever was cached before.
    pub async fn put(&self, value: T) {
        let mut slot = self.slot.write().await;
        *slot = Some(Entry {
            stored_at: Instant::now(),
            value,
        });
        debug!("Cached response for the next {:?}", self.ttl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_returns_stored_value_within_ttl() {
        let cache = ResponseCache::new(Duration::from_secs(60));

        cache.put("payload".to_string()).await;

        assert_eq!(cache.get().await, Some("payload".to_string()));
    }

    #[tokio::test]
    async fn test_empty_cache_misses() {
        let cache: ResponseCache<String> = ResponseCache::new(Duration::from_secs(60));

        assert_eq!(cache.get().await, None);
    }

    #[tokio::test]
    async fn test_cache_expires_after_ttl() {
        let cache = ResponseCache::new(Duration::from_millis(20));

        cache.put(1).await;
        tokio::time::sleep(Duration::from_millis(40)).await;

        assert_eq!(cache.get().await, None, "Entries older than the TTL must miss");
    }

    #[tokio::test]
    async fn test_zero_ttl_disables_reuse() {
        let cache = ResponseCache::new(Duration::ZERO);

        cache.put(1).await;

        assert_eq!(cache.get().await, None);
    }

    #[tokio::test]
    async fn test_put_replaces_previous_value() {
        let cache = ResponseCache::new(Duration::from_secs(60));

        cache.put(1).await;
        cache.put(2).await;

        assert_eq!(cache.get().await, Some(2));
    }

    #[tokio::test]
    async fn test_clones_share_the_slot() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        let other = cache.clone();

        other.put("shared".to_string()).await;

        assert_eq!(cache.get().await, Some("shared".to_string()));
    }
}
