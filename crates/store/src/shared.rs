use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use nest_core::NestError;

use crate::metric::Metric;
use crate::store::{Ranked, SearchHit, StoreStats, VectorStore};

/// Thread-safe handle to a [`VectorStore`].
///
/// Any number of readers may rank concurrently; `append` holds the write lock
/// for the whole batch, so a reader never sees a chunk without its vector.
#[derive(Debug, Clone, Default)]
pub struct SharedVectorStore {
    inner: Arc<RwLock<VectorStore>>,
}

impl SharedVectorStore {
    pub fn new(store: VectorStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub fn with_metric(metric: Metric) -> Self {
        Self::new(VectorStore::with_metric(metric))
    }

    // Appends validate before mutating, so a poisoned lock still guards a
    // consistent corpus.
    fn read(&self) -> RwLockReadGuard<'_, VectorStore> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, VectorStore> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn append(&self, chunks: Vec<String>, vectors: Vec<Vec<f32>>) -> Result<(), NestError> {
        self.write().append(chunks, vectors)
    }

    pub fn rank(&self, query: &[f32], k: usize) -> Result<Vec<Ranked>, NestError> {
        self.read().rank(query, k)
    }

    pub fn rank_with(&self, query: &[f32], k: usize, metric: Metric) -> Result<Vec<Ranked>, NestError> {
        self.read().rank_with(query, k, metric)
    }

    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>, NestError> {
        self.read().search(query, k)
    }

    pub fn chunk(&self, index: usize) -> Option<String> {
        self.read().chunk(index).map(str::to_string)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn stats(&self) -> StoreStats {
        self.read().stats()
    }

    /// Run `f` against a consistent view of the corpus.
    pub fn with_snapshot<R>(&self, f: impl FnOnce(&VectorStore) -> R) -> R {
        f(&self.read())
    }
}
