use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use nest_core::config::OpenAiConfig;

use super::traits::{check_dimensions, Embedder, EmbeddingError};

/// OpenAI-compatible `/v1/embeddings` backend.
pub struct OpenAiEmbedder {
    client: Client,
    api_key: String,
    organization: Option<String>,
    model: String,
    base_url: String,
    dimensions: usize,
}

impl OpenAiEmbedder {
    pub fn new(api_key: String, model: String, base_url: String, dimensions: usize) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_key,
            organization: None,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            dimensions,
        }
    }

    pub fn from_config(config: &OpenAiConfig, dimensions: usize) -> Result<Self, EmbeddingError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| EmbeddingError::NotConfigured("OPENAI_API_KEY is not set".into()))?;
        let mut embedder = Self::new(
            api_key,
            config.embedding_model.clone(),
            config.base_url.clone(),
            dimensions,
        );
        embedder.organization = config.organization.clone();
        Ok(embedder)
    }
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedItem>,
}

#[derive(Deserialize)]
struct EmbedItem {
    embedding: Vec<f32>,
    index: usize,
}

/// Vectors in input order. The API may answer out of order; `index` is
/// authoritative.
fn into_embeddings(mut resp: EmbedResponse) -> Vec<Vec<f32>> {
    resp.data.sort_by_key(|item| item.index);
    resp.data.into_iter().map(|item| item.embedding).collect()
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        debug!(model = %self.model, batch = texts.len(), "requesting OpenAI embeddings");
        let request = EmbedRequest {
            model: &self.model,
            input: texts,
        };

        let mut builder = self
            .client
            .post(format!("{}/v1/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request);
        if let Some(org) = &self.organization {
            builder = builder.header("OpenAI-Organization", org);
        }
        let response = builder.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Api(format!("{status}: {body}")));
        }

        let resp: EmbedResponse = response.json().await?;
        let embeddings = into_embeddings(resp);

        check_dimensions(&embeddings, self.dimensions)?;
        Ok(embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
