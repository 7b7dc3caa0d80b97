//! Expiring hand-off store
//!
//! Holds short-lived payloads keyed by a server-issued identifier so that a
//! producer and a later consumer can rendezvous without sharing any other
//! state. Expiry is lazy:
//! - every `put` sweeps entries older than the TTL
//! - every lookup re-checks the age of the entry it finds
//!
//! Missing, expired and already-consumed keys all report `None`.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::time::Duration;

use super::key::{new_key, Stamp};

/// A stored payload with its creation stamp
struct Record<V> {
    payload: V,
    created: Stamp,
}

/// Construction-time settings for an [`ExpiringStore`]
#[derive(Debug, Clone, Copy)]
pub struct ExpiringStoreConfig {
    /// Age at which an entry is no longer visible
    pub ttl: Duration,
    /// Optional bound on live entries (oldest evicted first)
    pub max_entries: Option<usize>,
}

impl ExpiringStoreConfig {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            max_entries: None,
        }
    }
}

/// Thread-safe store with time-based expiry
///
/// Cloning is cheap and yields a handle to the same map. One mutex guards the
/// map, so `take` is an atomic check-and-remove and at most one concurrent
/// caller receives a given payload.
pub struct ExpiringStore<V> {
    inner: Arc<ExpiringStoreInner<V>>,
}

struct ExpiringStoreInner<V> {
    name: &'static str,
    config: ExpiringStoreConfig,
    entries: Mutex<HashMap<String, Record<V>>>,
}

impl<V> Clone for ExpiringStore<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: Clone> ExpiringStore<V> {
    /// Create a store; `name` only labels log lines
    pub fn new(name: &'static str, config: ExpiringStoreConfig) -> Self {
        Self {
            inner: Arc::new(ExpiringStoreInner {
                name,
                config,
                entries: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Store a payload under a fresh key and return the key
    pub fn put(&self, payload: V) -> String {
        let key = new_key();
        let mut entries = self.inner.entries.lock();

        let evicted = sweep_locked(&mut entries, self.inner.config.ttl);
        if evicted > 0 {
            tracing::debug!(store = self.inner.name, evicted, "Swept expired entries");
        }

        if let Some(max) = self.inner.config.max_entries {
            while max > 0 && entries.len() >= max {
                let oldest = entries
                    .iter()
                    .max_by_key(|(_, record)| record.created.age())
                    .map(|(key, _)| key.clone());
                match oldest {
                    Some(oldest) => {
                        entries.remove(&oldest);
                        tracing::warn!(store = self.inner.name, key = %oldest, "Store full, evicted oldest entry");
                    }
                    None => break,
                }
            }
        }

        entries.insert(
            key.clone(),
            Record {
                payload,
                created: Stamp::now(),
            },
        );

        tracing::debug!(store = self.inner.name, key = %key, live = entries.len(), "Stored entry");
        key
    }

    /// Remove and return the payload if it is present and not expired
    pub fn take(&self, key: &str) -> Option<V> {
        let mut entries = self.inner.entries.lock();
        let record = entries.remove(key)?;

        if record.created.is_expired(self.inner.config.ttl) {
            tracing::debug!(store = self.inner.name, key = %key, "Dropped expired entry on take");
            return None;
        }

        Some(record.payload)
    }

    /// Return a copy of the payload without consuming it
    pub fn peek(&self, key: &str) -> Option<V> {
        let mut entries = self.inner.entries.lock();

        let expired = entries.get(key)?.created.is_expired(self.inner.config.ttl);
        if expired {
            entries.remove(key);
            return None;
        }

        entries.get(key).map(|record| record.payload.clone())
    }

    /// Evict every expired entry, returning how many were removed
    pub fn sweep(&self) -> usize {
        let mut entries = self.inner.entries.lock();
        sweep_locked(&mut entries, self.inner.config.ttl)
    }

    /// Number of entries currently held, expired or not
    pub fn len(&self) -> usize {
        self.inner.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn sweep_locked<V>(entries: &mut HashMap<String, Record<V>>, ttl: Duration) -> usize {
    let before = entries.len();
    entries.retain(|_, record| !record.created.is_expired(ttl));
    before - entries.len()
}
