use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use super::cache::EmbeddingCache;
use super::traits::{Embedder, EmbeddingError};

/// Embeds arbitrarily many texts through a provider in bounded batches,
/// serving repeated texts from an LRU cache.
pub struct EmbeddingBatcher {
    embedder: Arc<dyn Embedder>,
    batch_size: usize,
    cache: Mutex<EmbeddingCache>,
}

impl EmbeddingBatcher {
    pub fn new(embedder: Arc<dyn Embedder>, batch_size: usize, cache_capacity: usize) -> Self {
        Self {
            embedder,
            batch_size: batch_size.max(1),
            cache: Mutex::new(EmbeddingCache::new(cache_capacity)),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.embedder.dimensions()
    }

    fn cache(&self) -> MutexGuard<'_, EmbeddingCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cache (hits, misses) so far.
    pub fn cache_stats(&self) -> (u64, u64) {
        let cache = self.cache();
        (cache.hits(), cache.misses())
    }

    /// Embed `texts`, returning exactly one vector per text in input order.
    ///
    /// Each distinct uncached text is sent once. A provider answer with the
    /// wrong number of vectors fails the whole call with `CountMismatch`.
    pub async fn embed_all(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut out: Vec<Option<Vec<f32>>> = vec![None; texts.len()];
        let mut pending: Vec<&str> = Vec::new();
        let mut slots: HashMap<&str, Vec<usize>> = HashMap::new();

        {
            let mut cache = self.cache();
            for (i, text) in texts.iter().enumerate() {
                if let Some(vector) = cache.get(text) {
                    out[i] = Some(vector);
                    continue;
                }
                slots
                    .entry(text.as_str())
                    .or_insert_with(|| {
                        pending.push(text.as_str());
                        Vec::new()
                    })
                    .push(i);
            }
        }

        debug!(
            total = texts.len(),
            uncached = pending.len(),
            batch_size = self.batch_size,
            "embedding texts"
        );

        for batch in pending.chunks(self.batch_size) {
            let vectors = self.embedder.embed_batch(batch).await?;
            if vectors.len() != batch.len() {
                return Err(EmbeddingError::CountMismatch {
                    expected: batch.len(),
                    actual: vectors.len(),
                });
            }

            let mut cache = self.cache();
            for (text, vector) in batch.iter().zip(vectors) {
                for &slot in slots.get(text).map(Vec::as_slice).unwrap_or_default() {
                    out[slot] = Some(vector.clone());
                }
                cache.put(text, vector);
            }
        }

        let filled = out.iter().filter(|v| v.is_some()).count();
        out.into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or(EmbeddingError::CountMismatch {
                expected: texts.len(),
                actual: filled,
            })
    }

    pub async fn embed_one(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.embed_all(&[text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or(EmbeddingError::CountMismatch {
                expected: 1,
                actual: 0,
            })
    }
}
