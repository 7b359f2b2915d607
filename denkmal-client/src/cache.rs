//! Memoizing entity cache with in-flight request deduplication.
//!
//! One instance exists per entity kind, plus a smaller one for translation
//! strings. Entries are append-only for the session: a value is stored on
//! first successful fetch and never mutated or evicted afterwards. The
//! in-flight tracker guarantees at most one concurrent fetch per key.

use denkmal_core::GatewayError;
use futures_util::future::{BoxFuture, Shared};
use futures_util::FutureExt;
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Mutex;

type InFlight<V> = Shared<BoxFuture<'static, Result<V, GatewayError>>>;

pub struct EntityCache<K, V> {
    values: Mutex<HashMap<K, V>>,
    in_flight: Mutex<HashMap<K, InFlight<V>>>,
}

impl<K, V> EntityCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Return the stored value for `key`, if any. Never triggers a fetch.
    pub fn get(&self, key: &K) -> Option<V> {
        self.values.lock().unwrap().get(key).cloned()
    }

    /// Store `value` unconditionally, overwriting any previous entry.
    ///
    /// Used to seed the cache from a broader listing response so a later
    /// detail lookup needs no fetch of its own.
    pub fn put(&self, key: K, value: V) {
        self.values.lock().unwrap().insert(key, value);
    }

    /// Synchronous memoization: return the stored value for `key`, or store
    /// and return `make()`.
    pub fn get_or_insert_with<F>(&self, key: K, make: F) -> V
    where
        F: FnOnce() -> V,
    {
        self.values
            .lock()
            .unwrap()
            .entry(key)
            .or_insert_with(make)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.values.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.lock().unwrap().is_empty()
    }
}

impl<K, V> EntityCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone + Send + Sync + 'static,
{
    /// Return the value for `key`, fetching it at most once.
    ///
    /// A stored value is returned without invoking `fetch`. If another call
    /// already has a fetch in flight for the same key, this call awaits that
    /// same operation instead of starting a second one. Otherwise `fetch()`
    /// runs; its success is stored, its failure is propagated and never
    /// memoized, so the next call for the key retries from scratch.
    pub async fn get_or_fetch<F, Fut>(&self, key: K, fetch: F) -> Result<V, GatewayError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, GatewayError>> + Send + 'static,
    {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }

        let operation = {
            let mut in_flight = self.in_flight.lock().unwrap();
            // A fetch for this key may have completed between the value
            // check above and taking this lock.
            if let Some(value) = self.values.lock().unwrap().get(&key) {
                return Ok(value.clone());
            }
            in_flight
                .entry(key.clone())
                .or_insert_with(|| fetch().boxed().shared())
                .clone()
        };

        let result = operation.clone().await;

        {
            let mut in_flight = self.in_flight.lock().unwrap();
            // Only clear our own tracker entry; a failed fetch may already
            // have been superseded by a retry's fresh operation.
            if in_flight
                .get(&key)
                .is_some_and(|current| current.ptr_eq(&operation))
            {
                in_flight.remove(&key);
            }
        }

        match result {
            Ok(value) => {
                let mut values = self.values.lock().unwrap();
                Ok(values.entry(key).or_insert(value).clone())
            }
            Err(err) => Err(err),
        }
    }
}

impl<K, V> Default for EntityCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn counting_fetch(
        calls: &Arc<AtomicUsize>,
        value: &'static str,
        delay: Duration,
    ) -> impl FnOnce() -> BoxFuture<'static, Result<String, GatewayError>> {
        let calls = Arc::clone(calls);
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                tokio::time::sleep(delay).await;
                Ok(value.to_string())
            }
            .boxed()
        }
    }

    fn failing_fetch(
        calls: &Arc<AtomicUsize>,
    ) -> impl FnOnce() -> BoxFuture<'static, Result<String, GatewayError>> {
        let calls = Arc::clone(calls);
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                Err(GatewayError::Status {
                    status: 404,
                    message: "not found".to_string(),
                })
            }
            .boxed()
        }
    }

    #[test]
    fn test_get_on_empty_cache_is_none() {
        let cache: EntityCache<i64, String> = EntityCache::new();
        assert!(cache.get(&1).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_put_overwrites() {
        let cache = EntityCache::new();
        cache.put(1, "first".to_string());
        cache.put(1, "second".to_string());
        assert_eq!(cache.get(&1).as_deref(), Some("second"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_or_insert_with_memoizes() {
        let cache = EntityCache::new();
        let first = cache.get_or_insert_with("Map".to_string(), || "Karte".to_string());
        let second = cache.get_or_insert_with("Map".to_string(), || "unreachable".to_string());
        assert_eq!(first, "Karte");
        assert_eq!(second, "Karte");
    }

    #[tokio::test]
    async fn test_sequential_calls_fetch_exactly_once() {
        let cache = EntityCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..5 {
            let value = cache
                .get_or_fetch(7, counting_fetch(&calls, "memorial", Duration::ZERO))
                .await
                .unwrap();
            assert_eq!(value, "memorial");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_calls_collapse_onto_one_request() {
        let cache = Arc::new(EntityCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        // The first future registers its fetch on the first poll; the second
        // joins the in-flight operation instead of starting its own.
        let first = cache.get_or_fetch(7, counting_fetch(&calls, "memorial", Duration::from_millis(20)));
        let second = cache.get_or_fetch(7, counting_fetch(&calls, "other", Duration::ZERO));
        let (a, b) = tokio::join!(first, second);

        assert_eq!(a.unwrap(), "memorial");
        assert_eq!(b.unwrap(), "memorial");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_distinct_keys_fetch_independently() {
        let cache = Arc::new(EntityCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let first = cache.get_or_fetch(1, counting_fetch(&calls, "one", Duration::from_millis(10)));
        let second = cache.get_or_fetch(2, counting_fetch(&calls, "two", Duration::ZERO));
        let (a, b) = tokio::join!(first, second);

        assert_eq!(a.unwrap(), "one");
        assert_eq!(b.unwrap(), "two");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failure_is_not_memoized() {
        let cache = EntityCache::new();
        let failed_calls = Arc::new(AtomicUsize::new(0));
        let ok_calls = Arc::new(AtomicUsize::new(0));

        let err = cache
            .get_or_fetch(7, failing_fetch(&failed_calls))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Status { status: 404, .. }));
        assert!(cache.get(&7).is_none());

        // The rejection was not cached; the next call fetches again.
        let value = cache
            .get_or_fetch(7, counting_fetch(&ok_calls, "recovered", Duration::ZERO))
            .await
            .unwrap();
        assert_eq!(value, "recovered");
        assert_eq!(failed_calls.load(Ordering::SeqCst), 1);
        assert_eq!(ok_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_failure_propagates_to_all_waiters() {
        let cache = Arc::new(EntityCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let failing = {
            let calls = Arc::clone(&calls);
            move || {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    Err::<String, _>(GatewayError::Transport {
                        reason: "connection reset".to_string(),
                    })
                }
                .boxed()
            }
        };

        let first = cache.get_or_fetch(7, failing);
        let second = cache.get_or_fetch(7, counting_fetch(&calls, "never", Duration::ZERO));
        let (a, b) = tokio::join!(first, second);

        assert!(a.is_err());
        assert!(b.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_put_preempts_fetch() {
        let cache = EntityCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        cache.put(7, "seeded".to_string());
        let value = cache
            .get_or_fetch(7, counting_fetch(&calls, "fetched", Duration::ZERO))
            .await
            .unwrap();

        assert_eq!(value, "seeded");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
