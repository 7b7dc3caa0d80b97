//! Document registry
//!
//! Maps document identifiers to their analysis records and keeps a separate
//! "latest" slot that always points at the most recently registered record.
//! Reads never consume. The map is LRU-bounded; the latest slot is not
//! subject to eviction.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;

/// Registry of analysed documents
pub struct DocumentRegistry<R> {
    inner: Arc<Mutex<RegistryInner<R>>>,
}

struct RegistryInner<R> {
    documents: LruCache<String, Arc<R>>,
    latest: Option<Arc<R>>,
}

impl<R> Clone for DocumentRegistry<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R> DocumentRegistry<R> {
    /// Create a registry holding at most `capacity` documents (`None` = unbounded)
    pub fn new(capacity: Option<NonZeroUsize>) -> Self {
        let documents = match capacity {
            Some(capacity) => LruCache::new(capacity),
            None => LruCache::unbounded(),
        };

        Self {
            inner: Arc::new(Mutex::new(RegistryInner {
                documents,
                latest: None,
            })),
        }
    }

    /// Insert or overwrite a record and make it the latest
    pub fn register(&self, document_id: impl Into<String>, record: R) -> Arc<R> {
        let document_id = document_id.into();
        let record = Arc::new(record);
        let mut inner = self.inner.lock();

        if let Some((evicted, _)) = inner.documents.push(document_id.clone(), Arc::clone(&record)) {
            if evicted != document_id {
                tracing::info!(doc_id = %evicted, "Registry full, evicted least recently used document");
            }
        }
        inner.latest = Some(Arc::clone(&record));

        record
    }

    pub fn get(&self, document_id: &str) -> Option<Arc<R>> {
        self.inner.lock().documents.get(document_id).cloned()
    }

    /// The most recently registered record, if any
    pub fn get_latest(&self) -> Option<Arc<R>> {
        self.inner.lock().latest.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
