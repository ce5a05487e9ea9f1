pub mod ollama;
pub mod openai;

use nest_core::Config;
use tracing::info;

use crate::provider::{LlmError, LlmProvider};

/// Create the chat provider selected by `LLM_PROVIDER`.
pub fn create_provider(config: &Config) -> Result<Box<dyn LlmProvider>, LlmError> {
    match config.llm.provider.as_str() {
        "openai" => {
            let api_key = config
                .openai
                .api_key
                .clone()
                .ok_or_else(|| LlmError::NotConfigured("OPENAI_API_KEY not set".into()))?;
            info!(model = %config.openai.chat_model, "LLM provider ready: openai");
            Ok(Box::new(
                openai::OpenAiProvider::new(
                    api_key,
                    config.openai.chat_model.clone(),
                    config.openai.base_url.clone(),
                )
                .with_organization(config.openai.organization.clone()),
            ))
        }
        "ollama" => {
            info!(model = %config.ollama.model, "LLM provider ready: ollama");
            Ok(Box::new(ollama::OllamaProvider::new(
                config.ollama.url.clone(),
                config.ollama.model.clone(),
            )))
        }
        other => Err(LlmError::NotConfigured(format!(
            "unknown LLM provider: '{other}'"
        ))),
    }
}
