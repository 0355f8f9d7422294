//! Keyed query cache with staleness windows and request de-duplication.
//!
//! [`QueryCache`] stores the last successful result of every read under its
//! [`CacheKey`]. The outer map is behind a [`tokio::sync::RwLock`]; each slot
//! has its own [`tokio::sync::Mutex`] that is held for the duration of a
//! fetch, so concurrent readers of the same key queue behind the one
//! in-flight request and then share its result.

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::domain::{CacheEvent, CacheKey, EventBus, Resource};
use crate::error::ConsoleError;

/// Type-erased cached value.
type CachedValue = Arc<dyn Any + Send + Sync>;

/// One cache slot.
#[derive(Debug, Default)]
struct Slot {
    value: Option<CachedValue>,
    fetched_at: Option<Instant>,
    invalidated: bool,
}

impl Slot {
    /// Returns the cached value if it may be served without a fetch.
    ///
    /// A value is usable when it has not been invalidated and is either
    /// younger than `stale_after` or was fetched after `requested_at`
    /// (i.e. by the request this caller was waiting on).
    fn usable(&self, stale_after: Duration, requested_at: Instant) -> Option<CachedValue> {
        if self.invalidated {
            return None;
        }
        let fetched_at = self.fetched_at?;
        let fresh = fetched_at.elapsed() < stale_after || fetched_at >= requested_at;
        if fresh { self.value.clone() } else { None }
    }

    fn store(&mut self, value: CachedValue) {
        self.value = Some(value);
        self.fetched_at = Some(Instant::now());
        self.invalidated = false;
    }
}

/// Process-wide read cache, injected wherever reads happen.
///
/// # Concurrency
///
/// - Reads of different keys proceed concurrently.
/// - Reads of the same key share one in-flight fetch.
/// - A successful fetch replaces the slot; a failed one leaves it intact.
/// - Dropping a reader mid-fetch discards that fetch's result.
#[derive(Debug)]
pub struct QueryCache {
    slots: RwLock<HashMap<CacheKey, Arc<Mutex<Slot>>>>,
    event_bus: EventBus,
}

impl QueryCache {
    /// Creates an empty cache that reports changes on `event_bus`.
    #[must_use]
    pub fn new(event_bus: EventBus) -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            event_bus,
        }
    }

    /// Returns the cached value for `key` or runs `fetcher` to obtain it.
    ///
    /// # Errors
    ///
    /// Returns the fetcher's error unchanged, or [`ConsoleError::Internal`]
    /// if the slot already holds a value of a different type.
    pub async fn get_or_fetch<T, F, Fut>(
        &self,
        key: &CacheKey,
        stale_after: Duration,
        fetcher: F,
    ) -> Result<Arc<T>, ConsoleError>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ConsoleError>>,
    {
        let requested_at = Instant::now();
        let slot = self.slot(key).await;
        let mut slot = slot.lock().await;

        if let Some(value) = slot.usable(stale_after, requested_at) {
            debug!(%key, "cache hit");
            return downcast(value, key);
        }

        debug!(%key, "cache miss");
        let value = Arc::new(fetcher().await?);
        slot.store(Arc::clone(&value) as CachedValue);
        Ok(value)
    }

    /// Fetches `key` unconditionally and stores the result.
    ///
    /// Used by fixed-interval pollers. Publishes [`CacheEvent::Refreshed`] on
    /// success.
    ///
    /// # Errors
    ///
    /// Returns the fetcher's error unchanged; the previous value stays cached.
    pub async fn refresh<T, F, Fut>(&self, key: &CacheKey, fetcher: F) -> Result<Arc<T>, ConsoleError>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ConsoleError>>,
    {
        let slot = self.slot(key).await;
        let mut slot = slot.lock().await;
        let value = Arc::new(fetcher().await?);
        slot.store(Arc::clone(&value) as CachedValue);
        drop(slot);

        let _ = self.event_bus.publish(CacheEvent::Refreshed {
            resource: key.resource(),
            key: key.to_string(),
            timestamp: Utc::now(),
        });
        Ok(value)
    }

    /// Returns the last stored value for `key` regardless of staleness.
    ///
    /// Waits for an in-flight fetch of the same key to finish.
    pub async fn peek<T>(&self, key: &CacheKey) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        let slot = {
            let map = self.slots.read().await;
            Arc::clone(map.get(key)?)
        };
        let value = slot.lock().await.value.clone()?;
        value.downcast::<T>().ok()
    }

    /// Searches the live values of `resource` that hold a `T` and returns
    /// the match from the most recently fetched slot, with its fetch time.
    ///
    /// Invalidated slots and slots with a fetch in flight are skipped.
    pub async fn find_newest<T, R, F>(&self, resource: Resource, f: F) -> Option<(Instant, R)>
    where
        T: Send + Sync + 'static,
        F: Fn(&T) -> Option<R>,
    {
        let slots: Vec<Arc<Mutex<Slot>>> = {
            let map = self.slots.read().await;
            map.iter()
                .filter(|(key, _)| key.resource() == resource)
                .map(|(_, slot)| Arc::clone(slot))
                .collect()
        };
        slots
            .iter()
            .filter_map(|slot| {
                let (value, fetched_at) = {
                    let slot = slot.try_lock().ok()?;
                    if slot.invalidated {
                        return None;
                    }
                    (slot.value.clone()?, slot.fetched_at?)
                };
                let typed = value.downcast::<T>().ok()?;
                f(&typed).map(|found| (fetched_at, found))
            })
            .max_by_key(|(fetched_at, _)| *fetched_at)
    }

    /// Marks every entry of `resource` stale so the next read refetches.
    ///
    /// Returns the number of entries affected and publishes
    /// [`CacheEvent::Invalidated`].
    pub async fn invalidate(&self, resource: Resource) -> usize {
        let slots: Vec<Arc<Mutex<Slot>>> = {
            let map = self.slots.read().await;
            map.iter()
                .filter(|(key, _)| key.resource() == resource)
                .map(|(_, slot)| Arc::clone(slot))
                .collect()
        };
        for slot in &slots {
            slot.lock().await.invalidated = true;
        }

        debug!(%resource, entries = slots.len(), "cache invalidated");
        let _ = self.event_bus.publish(CacheEvent::Invalidated {
            resource,
            entries: slots.len(),
            timestamp: Utc::now(),
        });
        slots.len()
    }

    /// Marks a single entry stale.
    ///
    /// Returns `true` if the key was present.
    pub async fn invalidate_key(&self, key: &CacheKey) -> bool {
        let slot = {
            let map = self.slots.read().await;
            map.get(key).map(Arc::clone)
        };
        match slot {
            Some(slot) => {
                slot.lock().await.invalidated = true;
                true
            }
            None => false,
        }
    }

    /// Returns the number of keys the cache has seen.
    pub async fn len(&self) -> usize {
        self.slots.read().await.len()
    }

    /// Returns `true` if no key has been read yet.
    pub async fn is_empty(&self) -> bool {
        self.slots.read().await.is_empty()
    }

    async fn slot(&self, key: &CacheKey) -> Arc<Mutex<Slot>> {
        if let Some(slot) = self.slots.read().await.get(key) {
            return Arc::clone(slot);
        }
        let mut map = self.slots.write().await;
        Arc::clone(map.entry(key.clone()).or_default())
    }
}

fn downcast<T>(value: CachedValue, key: &CacheKey) -> Result<Arc<T>, ConsoleError>
where
    T: Send + Sync + 'static,
{
    value
        .downcast::<T>()
        .map_err(|_| ConsoleError::Internal(format!("cache entry {key} holds a different type")))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    const MINUTE: Duration = Duration::from_secs(60);

    fn make_cache() -> QueryCache {
        QueryCache::new(EventBus::new(16))
    }

    fn key(resource: Resource) -> CacheKey {
        CacheKey::new(resource).with("offset", 0)
    }

    async fn counted_fetch(calls: &AtomicUsize, value: u32) -> Result<u32, ConsoleError> {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(value)
    }

    #[tokio::test]
    async fn fresh_entry_is_served_without_fetch() {
        let cache = make_cache();
        let calls = AtomicUsize::new(0);
        let k = key(Resource::Users);

        let first = cache.get_or_fetch(&k, MINUTE, || counted_fetch(&calls, 1)).await;
        let second = cache.get_or_fetch(&k, MINUTE, || counted_fetch(&calls, 2)).await;

        let (Ok(first), Ok(second)) = (first, second) else {
            panic!("fetches should succeed");
        };
        assert_eq!(*first, 1);
        assert_eq!(*second, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn stale_entry_is_refetched() {
        let cache = make_cache();
        let calls = AtomicUsize::new(0);
        let k = key(Resource::Users);

        let _ = cache.get_or_fetch(&k, Duration::ZERO, || counted_fetch(&calls, 1)).await;
        let second = cache.get_or_fetch(&k, Duration::ZERO, || counted_fetch(&calls, 2)).await;

        let Ok(second) = second else {
            panic!("refetch should succeed");
        };
        assert_eq!(*second, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidation_forces_refetch() {
        let cache = make_cache();
        let mut events = cache.event_bus.subscribe();
        let calls = AtomicUsize::new(0);
        let k = key(Resource::Withdrawals);

        let _ = cache.get_or_fetch(&k, MINUTE, || counted_fetch(&calls, 1)).await;
        assert_eq!(cache.invalidate(Resource::Withdrawals).await, 1);
        let after = cache.get_or_fetch(&k, MINUTE, || counted_fetch(&calls, 2)).await;

        let Ok(after) = after else {
            panic!("refetch should succeed");
        };
        assert_eq!(*after, 2);

        let Ok(event) = events.recv().await else {
            panic!("expected invalidation event");
        };
        assert_eq!(event.event_type_str(), "invalidated");
        assert_eq!(event.resource(), Resource::Withdrawals);
    }

    #[tokio::test]
    async fn invalidation_only_touches_its_resource() {
        let cache = make_cache();
        let calls = AtomicUsize::new(0);
        let users = key(Resource::Users);
        let wallets = key(Resource::Wallets);

        let _ = cache.get_or_fetch(&users, MINUTE, || counted_fetch(&calls, 1)).await;
        let _ = cache.get_or_fetch(&wallets, MINUTE, || counted_fetch(&calls, 1)).await;
        let _ = cache.invalidate(Resource::Users).await;
        let _ = cache.get_or_fetch(&wallets, MINUTE, || counted_fetch(&calls, 9)).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn concurrent_reads_share_one_request() {
        let cache = Arc::new(make_cache());
        let calls = Arc::new(AtomicUsize::new(0));
        let k = key(Resource::Networks);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = Arc::clone(&cache);
            let calls = Arc::clone(&calls);
            let k = k.clone();
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_fetch(&k, Duration::ZERO, || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        Ok::<_, ConsoleError>(7_u32)
                    })
                    .await
            }));
        }

        for handle in handles {
            let Ok(Ok(value)) = handle.await else {
                panic!("reader failed");
            };
            assert_eq!(*value, 7);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_value() {
        let cache = make_cache();
        let k = key(Resource::Deposits);

        let _ = cache.get_or_fetch(&k, MINUTE, || async { Ok::<_, ConsoleError>(5_u32) }).await;
        let _ = cache.invalidate(Resource::Deposits).await;
        let failed = cache
            .get_or_fetch(&k, MINUTE, || async {
                Err::<u32, _>(ConsoleError::Transport("connection refused".to_string()))
            })
            .await;
        assert!(matches!(failed, Err(ConsoleError::Transport(_))));

        let Some(previous) = cache.peek::<u32>(&k).await else {
            panic!("previous value should survive");
        };
        assert_eq!(*previous, 5);
    }

    #[tokio::test]
    async fn refresh_publishes_event() {
        let cache = make_cache();
        let mut events = cache.event_bus.subscribe();
        let k = key(Resource::Networks);

        let result = cache.refresh(&k, || async { Ok::<_, ConsoleError>(3_u32) }).await;
        assert!(result.is_ok());

        let Ok(event) = events.recv().await else {
            panic!("expected refresh event");
        };
        assert_eq!(event.event_type_str(), "refreshed");
    }

    #[tokio::test]
    async fn type_mismatch_is_internal_error() {
        let cache = make_cache();
        let k = key(Resource::Reports);

        let _ = cache.get_or_fetch(&k, MINUTE, || async { Ok::<_, ConsoleError>(1_u32) }).await;
        let wrong = cache
            .get_or_fetch(&k, MINUTE, || async { Ok::<_, ConsoleError>("text".to_string()) })
            .await;
        assert!(matches!(wrong, Err(ConsoleError::Internal(_))));
    }

    #[tokio::test]
    async fn find_newest_searches_matching_type() {
        let cache = make_cache();
        let page_one = CacheKey::new(Resource::Withdrawals).with("offset", 0);
        let page_two = CacheKey::new(Resource::Withdrawals).with("offset", 20);
        let _ = cache
            .get_or_fetch(&page_one, MINUTE, || async { Ok::<_, ConsoleError>(vec![1_u32, 2]) })
            .await;
        let _ = cache
            .get_or_fetch(&page_two, MINUTE, || async { Ok::<_, ConsoleError>(vec![21_u32]) })
            .await;

        let found = cache
            .find_newest::<Vec<u32>, u32, _>(Resource::Withdrawals, |v| {
                v.iter().copied().find(|n| *n == 21)
            })
            .await;
        assert_eq!(found.map(|(_, n)| n), Some(21));

        let other_type = cache
            .find_newest::<String, usize, _>(Resource::Withdrawals, |s| Some(s.len()))
            .await;
        assert!(other_type.is_none());
    }

    #[tokio::test]
    async fn find_newest_prefers_latest_fetch_across_pages() {
        // Both pages hold (id, state) for the same id; the later fetch wins
        // whichever order the map iterates in.
        for _ in 0..20 {
            let cache = make_cache();
            let older = CacheKey::new(Resource::Withdrawals).with("offset", 0);
            let newer = CacheKey::new(Resource::Withdrawals).with("status", "failed");
            let _ = cache
                .get_or_fetch(&older, MINUTE, || async { Ok::<_, ConsoleError>((1_u32, "pending")) })
                .await;
            tokio::time::sleep(Duration::from_millis(2)).await;
            let _ = cache
                .get_or_fetch(&newer, MINUTE, || async { Ok::<_, ConsoleError>((1_u32, "failed")) })
                .await;

            let found = cache
                .find_newest::<(u32, &str), &str, _>(Resource::Withdrawals, |(id, state)| {
                    (*id == 1).then_some(*state)
                })
                .await;
            assert_eq!(found.map(|(_, state)| state), Some("failed"));
        }
    }

    #[tokio::test]
    async fn find_newest_skips_invalidated_slots() {
        let cache = make_cache();
        let k = key(Resource::Withdrawals);
        let _ = cache.get_or_fetch(&k, MINUTE, || async { Ok::<_, ConsoleError>(4_u32) }).await;
        let _ = cache.invalidate(Resource::Withdrawals).await;

        let found = cache
            .find_newest::<u32, u32, _>(Resource::Withdrawals, |n| Some(*n))
            .await;
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn invalidate_key_reports_presence() {
        let cache = make_cache();
        let k = key(Resource::Sar);
        assert!(!cache.invalidate_key(&k).await);
        let _ = cache.get_or_fetch(&k, MINUTE, || async { Ok::<_, ConsoleError>(1_u8) }).await;
        assert!(cache.invalidate_key(&k).await);
        assert_eq!(cache.len().await, 1);
        assert!(!cache.is_empty().await);
    }
}
