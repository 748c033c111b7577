use folio_traits::ResourceError;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard};

type InFlight<V> = Shared<BoxFuture<'static, Result<V, ResourceError>>>;

/// Memoizes the in-flight future for each key, not only its result.
///
/// Concurrent callers for one key await the same underlying operation.
/// A failed operation is evicted so that the next caller retries it.
pub struct SingleFlightCache<K, V>
where
    V: Clone,
{
    entries: Mutex<HashMap<K, InFlight<V>>>,
}

impl<K, V> Default for SingleFlightCache<K, V>
where
    V: Clone,
{
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, V> SingleFlightCache<K, V>
where
    K: Eq + Hash + Clone + Send + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<K, InFlight<V>>> {
        // The map holds no invariant a panicking holder could break.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns the cached value for `key`, starting `load` only if no
    /// operation for `key` is cached or in flight.
    pub async fn get_or_load<F, Fut>(&self, key: K, load: F) -> Result<V, ResourceError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, ResourceError>> + Send + 'static,
    {
        let in_flight = self
            .entries()
            .entry(key.clone())
            .or_insert_with(|| load().boxed().shared())
            .clone();

        let result = in_flight.clone().await;
        if result.is_err() {
            let mut entries = self.entries();
            // Only evict our own entry; a retry may already have replaced it.
            if entries.get(&key).is_some_and(|current| current.ptr_eq(&in_flight)) {
                entries.remove(&key);
            }
        }
        result
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries().clear();
    }
}
