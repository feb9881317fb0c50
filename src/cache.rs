//! Time-bounded read-through caches for slow-changing lookups (amenity
//! catalogue, city suggestions).
//!
//! Caches are plain values held in the application state; writers that
//! change the underlying data call [`TtlCache::invalidate`].

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

struct Entry<T> {
    value: Arc<T>,
    loaded_at: Instant,
}

pub struct TtlCache<T> {
    ttl: Duration,
    slot: RwLock<Option<Entry<T>>>,
}

impl<T> TtlCache<T> {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    fn fresh(&self, entry: &Entry<T>) -> bool {
        entry.loaded_at.elapsed() < self.ttl
    }

    /// Return the cached value, running `loader` if the slot is empty or
    /// stale. Concurrent misses load once; the others wait on the lock.
    ///
    /// # Errors
    ///
    /// Returns the loader's error; the slot is left untouched in that case.
    pub async fn get_or_load<F, Fut, E>(&self, loader: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(entry) = self.slot.read().await.as_ref() {
            if self.fresh(entry) {
                return Ok(Arc::clone(&entry.value));
            }
        }

        let mut slot = self.slot.write().await;
        if let Some(entry) = slot.as_ref() {
            if self.fresh(entry) {
                return Ok(Arc::clone(&entry.value));
            }
        }

        let value = Arc::new(loader().await?);
        *slot = Some(Entry {
            value: Arc::clone(&value),
            loaded_at: Instant::now(),
        });
        Ok(value)
    }

    pub async fn invalidate(&self) {
        self.slot.write().await.take();
    }
}

impl<T> std::fmt::Debug for TtlCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn load(cache: &TtlCache<usize>, calls: &AtomicUsize) -> usize {
        let value = cache
            .get_or_load(|| async { Ok::<_, Infallible>(calls.fetch_add(1, Ordering::SeqCst) + 1) })
            .await
            .unwrap();
        *value
    }

    #[tokio::test]
    async fn test_second_read_is_served_from_cache() {
        let cache = TtlCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);
        assert_eq!(load(&cache, &calls).await, 1);
        assert_eq!(load(&cache, &calls).await, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidate_forces_reload() {
        let cache = TtlCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);
        load(&cache, &calls).await;
        cache.invalidate().await;
        assert_eq!(load(&cache, &calls).await, 2);
    }

    #[tokio::test]
    async fn test_expired_entry_is_reloaded() {
        let cache = TtlCache::new(Duration::ZERO);
        let calls = AtomicUsize::new(0);
        load(&cache, &calls).await;
        assert_eq!(load(&cache, &calls).await, 2);
    }

    #[tokio::test]
    async fn test_loader_error_leaves_slot_empty() {
        let cache: TtlCache<usize> = TtlCache::new(Duration::from_secs(60));
        let failed = cache.get_or_load(|| async { Err::<usize, _>("down") }).await;
        assert!(failed.is_err());
        let calls = AtomicUsize::new(0);
        assert_eq!(load(&cache, &calls).await, 1);
    }
}
