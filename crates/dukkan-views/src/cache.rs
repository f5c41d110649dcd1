//! # Query Cache
//!
//! Tuple-keyed fetch memoization for the list screens.
//!
//! ## Entry Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Cache Entry Lifecycle                               │
//! │                                                                         │
//! │              fetch(key)                                                 │
//! │                 │                                                       │
//! │        ┌────────┴────────┐                                              │
//! │        ▼                 ▼                                              │
//! │   fresh entry?      in-flight leader?                                   │
//! │     yes │ no          yes │ no                                          │
//! │        ▼                  ▼                                             │
//! │   return clone    join: wait for the leader, then re-check;             │
//! │   (no network)    otherwise become the leader and run the fetcher       │
//! │                                                                         │
//! │   leader Ok  ──► entry {value, fresh} ── waiters get the fresh value    │
//! │   leader Err ──► entry kept, marked stale (SWR) ── error returned       │
//! │                                                                         │
//! │   invalidate_all() ──► every entry marked stale, values kept            │
//! │                        readable via peek() until replaced               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Entries are keyed by the full query tuple, so a slow response for an
//! abandoned tuple can never overwrite a newer tuple's entry.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tracing::debug;

use dukkan_api::ApiResult;

struct Entry<V> {
    value: V,
    fresh: bool,
}

struct CacheState<K, V> {
    entries: HashMap<K, Entry<V>>,
    /// One watch channel per in-flight fetch; the sender lives in the
    /// leader's call frame and waiters hold receivers.
    inflight: HashMap<K, watch::Receiver<()>>,
}

/// Shared memoizing cache. Cloning shares the same entries.
pub struct QueryCache<K, V> {
    state: Arc<Mutex<CacheState<K, V>>>,
}

impl<K, V> Clone for QueryCache<K, V> {
    fn clone(&self) -> Self {
        QueryCache {
            state: Arc::clone(&self.state),
        }
    }
}

impl<K, V> Default for QueryCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone,
{
    fn default() -> Self {
        QueryCache::new()
    }
}

impl<K, V> QueryCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone,
{
    pub fn new() -> Self {
        QueryCache {
            state: Arc::new(Mutex::new(CacheState {
                entries: HashMap::new(),
                inflight: HashMap::new(),
            })),
        }
    }

    /// Returns the cached value for `key`, running `fetcher` at most once.
    ///
    /// ## Behavior
    /// - fresh entry: returned immediately, no network
    /// - another identical fetch in flight: waits for it and shares its
    ///   result instead of dispatching a duplicate
    /// - otherwise this call becomes the leader and runs `fetcher`; on
    ///   success the entry is stored fresh, on failure any previous value
    ///   is kept (stale) and the error is returned
    ///
    /// A leader that is dropped mid-fetch leaves a closed channel behind;
    /// the next caller for that key reclaims leadership.
    pub async fn fetch<F, Fut>(&self, key: K, fetcher: F) -> ApiResult<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<V>>,
    {
        // Phase 1: fresh hit, or join the in-flight leader.
        let _leader = loop {
            let mut waiter = {
                let mut state = self.state.lock().await;
                if let Some(entry) = state.entries.get(&key) {
                    if entry.fresh {
                        debug!(?key, "Cache hit");
                        return Ok(entry.value.clone());
                    }
                }
                match state.inflight.get(&key) {
                    Some(rx) if rx.has_changed().is_ok() => rx.clone(),
                    _ => {
                        let (tx, rx) = watch::channel(());
                        state.inflight.insert(key.clone(), rx);
                        break tx;
                    }
                }
            };
            debug!(?key, "Joining in-flight fetch");
            let _ = waiter.changed().await;
        };

        // Phase 2: this call is the leader.
        debug!(?key, "Cache miss, fetching");
        let result = fetcher().await;

        let mut state = self.state.lock().await;
        state.inflight.remove(&key);
        match &result {
            Ok(value) => {
                state.entries.insert(
                    key,
                    Entry {
                        value: value.clone(),
                        fresh: true,
                    },
                );
            }
            Err(error) => {
                // Keep whatever was there; the screen keeps showing it.
                debug!(?key, %error, "Fetch failed, keeping stale entry");
                if let Some(entry) = state.entries.get_mut(&key) {
                    entry.fresh = false;
                }
            }
        }
        // Dropping `_leader` here wakes every waiter.
        result
    }

    /// Returns the cached value regardless of freshness.
    pub async fn peek(&self, key: &K) -> Option<V> {
        self.state
            .lock()
            .await
            .entries
            .get(key)
            .map(|e| e.value.clone())
    }

    /// Marks every entry stale. Values stay readable until replaced.
    pub async fn invalidate_all(&self) {
        let mut state = self.state.lock().await;
        for entry in state.entries.values_mut() {
            entry.fresh = false;
        }
        debug!(entries = state.entries.len(), "Cache invalidated");
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use dukkan_api::ApiError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn counted() -> Arc<AtomicUsize> {
        Arc::new(AtomicUsize::new(0))
    }

    #[tokio::test]
    async fn test_identical_fetches_hit_the_network_once() {
        let cache: QueryCache<(u32, u32), Vec<u32>> = QueryCache::new();
        let calls = counted();

        for _ in 0..2 {
            let calls = calls.clone();
            let page = cache
                .fetch((2, 20), move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![1, 2, 3])
                })
                .await
                .unwrap();
            assert_eq!(page, vec![1, 2, 3]);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_distinct_keys_fetch_separately() {
        let cache: QueryCache<u32, u32> = QueryCache::new();
        let calls = counted();

        for key in [1, 2, 1] {
            let calls = calls.clone();
            cache
                .fetch(key, move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(key * 10)
                })
                .await
                .unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.peek(&2).await, Some(20));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_fetches_join_the_leader() {
        let cache: QueryCache<u32, u32> = QueryCache::new();
        let calls = counted();

        let slow = {
            let cache = cache.clone();
            let calls = calls.clone();
            tokio::spawn(async move {
                cache
                    .fetch(7, move || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(100)).await;
                        Ok(70)
                    })
                    .await
            })
        };
        // Let the leader register its in-flight channel first
        tokio::time::sleep(Duration::from_millis(1)).await;
        let joiner = {
            let cache = cache.clone();
            let calls = calls.clone();
            tokio::spawn(async move {
                // The fetcher must never run for the joining call
                cache
                    .fetch(7, move || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Ok(0)
                    })
                    .await
            })
        };

        assert_eq!(slow.await.unwrap().unwrap(), 70);
        assert_eq!(joiner.await.unwrap().unwrap(), 70);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_keeps_stale_value() {
        let cache: QueryCache<u32, u32> = QueryCache::new();

        cache.fetch(1, || async { Ok(11) }).await.unwrap();
        cache.invalidate_all().await;

        let error = cache
            .fetch(1, || async {
                Err(ApiError::MissingData {
                    endpoint: "/test".to_string(),
                })
            })
            .await
            .unwrap_err();
        assert!(matches!(error, ApiError::MissingData { .. }));

        // The previous page is still there for the screen to show
        assert_eq!(cache.peek(&1).await, Some(11));
    }

    #[tokio::test]
    async fn test_invalidation_forces_refetch_but_keeps_value() {
        let cache: QueryCache<u32, u32> = QueryCache::new();
        let calls = counted();

        for _ in 0..2 {
            let calls = calls.clone();
            cache
                .fetch(5, move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(50)
                })
                .await
                .unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        cache.invalidate_all().await;
        assert_eq!(cache.peek(&5).await, Some(50));

        let calls2 = calls.clone();
        cache
            .fetch(5, move || async move {
                calls2.fetch_add(1, Ordering::SeqCst);
                Ok(51)
            })
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.peek(&5).await, Some(51));
    }
}
