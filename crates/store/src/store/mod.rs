use std::cmp::Ordering;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use nest_core::NestError;

use crate::metric::{score, Metric};


/// Corpus size at which scoring fans out across the rayon pool.
const PARALLEL_THRESHOLD: usize = 4_096;

/// One ranked corpus entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ranked {
    /// Position of the entry in insertion order.
    pub index: usize,
    pub score: f32,
}

/// A ranked entry resolved back to its chunk text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub index: usize,
    pub score: f32,
    pub chunk: String,
}

/// Summary statistics for the vector store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStats {
    pub chunk_count: usize,
    /// `None` until the first vector is appended.
    pub dimension: Option<usize>,
    pub metric: Metric,
}

/// In-memory corpus of chunks and their embeddings, searched by exact
/// brute-force ranking.
///
/// `chunks[i]` is the text whose embedding is `vectors[i]`. [`append`] is the
/// only mutator and extends both sequences together, so they never drift
/// apart. The dimension is fixed by the first appended vector.
///
/// [`append`]: VectorStore::append
#[derive(Debug, Default, Clone)]
pub struct VectorStore {
    chunks: Vec<String>,
    vectors: Vec<Vec<f32>>,
    dimension: Option<usize>,
    metric: Metric,
}

impl VectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metric(metric: Metric) -> Self {
        Self {
            metric,
            ..Self::default()
        }
    }

    /// Append a batch of chunks with one embedding each.
    ///
    /// The whole batch is validated before anything is stored: a count
    /// mismatch or a vector of the wrong dimension leaves the store untouched.
    pub fn append(&mut self, chunks: Vec<String>, vectors: Vec<Vec<f32>>) -> Result<(), NestError> {
        if chunks.len() != vectors.len() {
            return Err(NestError::BatchLengthMismatch {
                chunks: chunks.len(),
                vectors: vectors.len(),
            });
        }
        let Some(first) = vectors.first() else {
            return Ok(());
        };

        let expected = self.dimension.unwrap_or(first.len());
        if let Some(bad) = vectors.iter().find(|v| v.len() != expected) {
            return Err(NestError::DimensionMismatch {
                expected,
                actual: bad.len(),
            });
        }

        let added = chunks.len();
        self.dimension = Some(expected);
        self.chunks.extend(chunks);
        self.vectors.extend(vectors);

        debug!(added, total = self.chunks.len(), dimension = expected, "appended to vector store");
        Ok(())
    }

    /// Top `k` entries for `query` under the store's metric.
    pub fn rank(&self, query: &[f32], k: usize) -> Result<Vec<Ranked>, NestError> {
        self.rank_with(query, k, self.metric)
    }

    /// Top `k` entries for `query` under an explicit metric.
    ///
    /// Results are ordered by descending score; equal scores keep insertion
    /// order and NaN scores sort last. Returns `min(k, len)` entries, and an
    /// empty store always yields an empty result.
    pub fn rank_with(&self, query: &[f32], k: usize, metric: Metric) -> Result<Vec<Ranked>, NestError> {
        let Some(dimension) = self.dimension else {
            return Ok(Vec::new());
        };
        if query.len() != dimension {
            return Err(NestError::DimensionMismatch {
                expected: dimension,
                actual: query.len(),
            });
        }
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut scored = self.score_all(query, metric)?;
        if k < scored.len() {
            scored.select_nth_unstable_by(k - 1, compare_ranked);
            scored.truncate(k);
        }
        scored.sort_by(compare_ranked);
        Ok(scored)
    }

    /// [`rank`](Self::rank) with indices resolved to chunk text.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>, NestError> {
        Ok(self
            .rank(query, k)?
            .into_iter()
            .map(|r| SearchHit {
                index: r.index,
                score: r.score,
                chunk: self.chunks[r.index].clone(),
            })
            .collect())
    }

    fn score_all(&self, query: &[f32], metric: Metric) -> Result<Vec<Ranked>, NestError> {
        let rank_entry = |(index, vector): (usize, &Vec<f32>)| {
            score(metric, vector, query).map(|score| Ranked { index, score })
        };
        if self.vectors.len() >= PARALLEL_THRESHOLD {
            self.vectors.par_iter().enumerate().map(rank_entry).collect()
        } else {
            self.vectors.iter().enumerate().map(rank_entry).collect()
        }
    }

    pub fn chunk(&self, index: usize) -> Option<&str> {
        self.chunks.get(index).map(String::as_str)
    }

    pub fn vector(&self, index: usize) -> Option<&[f32]> {
        self.vectors.get(index).map(Vec::as_slice)
    }

    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            chunk_count: self.len(),
            dimension: self.dimension,
            metric: self.metric,
        }
    }
}

/// NaN never outranks a real score.
fn sort_key(score: f32) -> f32 {
    if score.is_nan() {
        f32::NEG_INFINITY
    } else {
        score
    }
}

/// Descending score, then ascending insertion index.
fn compare_ranked(a: &Ranked, b: &Ranked) -> Ordering {
    sort_key(b.score)
        .partial_cmp(&sort_key(a.score))
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.index.cmp(&b.index))
}
