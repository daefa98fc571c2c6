//! TTL cache module
//!
//! A keyed cache whose entries go stale a fixed duration after insertion.
//! Staleness is checked lazily on read; nothing is ever evicted in the background.
//! The process holds two instances: one for static assets, one for the dataset.

mod clock;

pub use clock::{Clock, ManualClock, SystemClock};

use dashmap::DashMap;
use std::borrow::Borrow;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Literal key under which the parsed dataset is cached
pub const DATASET_KEY: &str = "certs";

/// A stored value and the instant it was written
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub stored_at: Instant,
}

impl<V> CacheEntry<V> {
    /// An entry is valid while `now - stored_at < ttl`
    pub fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.stored_at) < ttl
    }
}

/// Concurrent cache with one TTL for every entry
pub struct TtlCache<K, V> {
    entries: DashMap<K, CacheEntry<V>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            clock,
        }
    }

    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the stored value if it is still fresh.
    ///
    /// A stale entry is reported as a miss but left in place; the next `put` overwrites it.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let now = self.clock.now();
        let entry = self.entries.get(key)?;
        entry
            .is_fresh(now, self.ttl)
            .then(|| entry.value.clone())
    }

    /// Insert or overwrite; the entry's age restarts at zero
    pub fn put(&self, key: K, value: V) {
        let entry = CacheEntry {
            value,
            stored_at: self.clock.now(),
        };
        self.entries.insert(key, entry);
    }

    /// Return the fresh value for `key`, or compute, store and return a new one.
    ///
    /// Failures are passed through and never cached. Two callers missing at the same
    /// time both compute; the later `put` wins.
    pub async fn get_or_try_insert_with<F, Fut, E>(&self, key: K, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }
        let value = compute().await?;
        self.put(key, value.clone());
        Ok(value)
    }

    /// Number of stored entries, stale ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
