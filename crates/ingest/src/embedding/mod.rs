pub mod batcher;
pub mod cache;
pub mod ollama;
pub mod openai;
pub mod traits;

use std::sync::Arc;

use tracing::info;

use nest_core::Config;

pub use batcher::EmbeddingBatcher;
pub use cache::EmbeddingCache;
pub use ollama::OllamaEmbedder;
pub use openai::OpenAiEmbedder;
pub use traits::{Embedder, EmbeddingError};

/// Build the embedder selected by `EMBEDDING_PROVIDER`.
pub fn create_embedder(config: &Config) -> Result<Arc<dyn Embedder>, EmbeddingError> {
    let dims = config.embedding.dimensions;
    match config.embedding.provider.as_str() {
        "openai" => {
            let embedder = OpenAiEmbedder::from_config(&config.openai, dims)?;
            info!(model = %config.openai.embedding_model, dims, "embedding provider ready: openai");
            Ok(Arc::new(embedder))
        }
        "ollama" => {
            info!(model = %config.ollama.embedding_model, dims, "embedding provider ready: ollama");
            Ok(Arc::new(OllamaEmbedder::from_config(&config.ollama, dims)))
        }
        other => Err(EmbeddingError::NotConfigured(format!(
            "unknown embedding provider '{other}'"
        ))),
    }
}
