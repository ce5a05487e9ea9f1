//! Ingestion and retrieval: split, embed, append; embed, rank.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use nest_core::{Config, NestError};
use nest_store::{SearchHit, SharedVectorStore};

use crate::document::chunker::{build_splitter, split_document, TextSplitter};
use crate::document::{extract_file, ExtractionError};
use crate::embedding::{Embedder, EmbeddingBatcher, EmbeddingError};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
    #[error(transparent)]
    Store(#[from] NestError),
    #[error("Background task failed: {0}")]
    Task(String),
}

/// Outcome of one indexing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexReport {
    /// Chunks added by this call.
    pub chunks: usize,
    /// Corpus size afterwards.
    pub total_chunks: usize,
}

/// Owns the splitter, the embedding batcher and a handle to the corpus.
pub struct Indexer {
    splitter: Box<dyn TextSplitter>,
    batcher: EmbeddingBatcher,
    store: SharedVectorStore,
}

impl Indexer {
    pub fn new(
        splitter: Box<dyn TextSplitter>,
        batcher: EmbeddingBatcher,
        store: SharedVectorStore,
    ) -> Self {
        Self {
            splitter,
            batcher,
            store,
        }
    }

    /// Wire an indexer from configuration around an existing embedder.
    pub fn from_config(config: &Config, embedder: Arc<dyn Embedder>) -> Result<Self, IngestError> {
        let splitter = build_splitter(&config.splitter)?;
        let batcher = EmbeddingBatcher::new(
            embedder,
            config.embedding.batch_size,
            config.embedding.cache_capacity,
        );
        Ok(Self::new(splitter, batcher, SharedVectorStore::with_metric(config.search.metric)))
    }

    pub fn store(&self) -> &SharedVectorStore {
        &self.store
    }

    pub fn batcher(&self) -> &EmbeddingBatcher {
        &self.batcher
    }

    pub async fn index_text(&self, text: &str) -> Result<IndexReport, IngestError> {
        let chunks = self.splitter.split(text);
        self.index_chunks(chunks).await
    }

    /// Extract `path` off the async runtime, then index it page by page.
    pub async fn index_file(&self, path: impl AsRef<Path>) -> Result<IndexReport, IngestError> {
        let path: PathBuf = path.as_ref().to_path_buf();
        let doc = tokio::task::spawn_blocking(move || extract_file(path))
            .await
            .map_err(|e| IngestError::Task(e.to_string()))??;

        let chunks = split_document(&doc, self.splitter.as_ref());
        let report = self.index_chunks(chunks).await?;
        info!(
            file = %doc.filename,
            chunks = report.chunks,
            total = report.total_chunks,
            "indexed document"
        );
        Ok(report)
    }

    async fn index_chunks(&self, chunks: Vec<String>) -> Result<IndexReport, IngestError> {
        if chunks.is_empty() {
            return Ok(IndexReport {
                chunks: 0,
                total_chunks: self.store.len(),
            });
        }

        let vectors = self.batcher.embed_all(&chunks).await?;
        let added = chunks.len();
        self.store.append(chunks, vectors)?;

        let total_chunks = self.store.len();
        debug!(added, total_chunks, "appended chunks");
        Ok(IndexReport {
            chunks: added,
            total_chunks,
        })
    }

    /// The `k` chunks most similar to `question`.
    pub async fn query(&self, question: &str, k: usize) -> Result<Vec<SearchHit>, IngestError> {
        if self.store.is_empty() || k == 0 {
            return Ok(Vec::new());
        }
        let vector = self.batcher.embed_one(question).await?;
        let hits = self.store.search(&vector, k)?;
        debug!(k, hits = hits.len(), "query ranked");
        Ok(hits)
    }
}
