use nest_core::config::LlmConfig;
use nest_store::SearchHit;
use tracing::debug;

use crate::prompt::build_prompt;
use crate::provider::{LlmError, LlmProvider, Message};

/// Ask `provider` to answer `question` from the retrieved `hits`.
pub async fn answer(
    provider: &dyn LlmProvider,
    question: &str,
    hits: &[SearchHit],
    config: &LlmConfig,
) -> Result<String, LlmError> {
    let prompt = build_prompt(question, hits);
    debug!(hits = hits.len(), prompt_chars = prompt.len(), "asking LLM");
    let reply = provider
        .complete(vec![Message::user(prompt)], config.temperature, config.max_tokens)
        .await?;
    Ok(reply.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records its inputs and echoes a canned reply.
    struct RecordingProvider {
        seen: Mutex<Vec<(Vec<Message>, f32, u32)>>,
    }

    #[async_trait]
    impl LlmProvider for RecordingProvider {
        async fn complete(
            &self,
            messages: Vec<Message>,
            temperature: f32,
            max_tokens: u32,
        ) -> Result<String, LlmError> {
            self.seen.lock().unwrap().push((messages, temperature, max_tokens));
            Ok("  Paris.\n".to_string())
        }
    }

    #[tokio::test]
    async fn sends_one_user_prompt_with_configured_sampling() {
        let provider = RecordingProvider {
            seen: Mutex::new(Vec::new()),
        };
        let config = LlmConfig {
            provider: "openai".into(),
            temperature: 0.0,
            max_tokens: 256,
        };
        let hits = vec![SearchHit {
            index: 0,
            score: 0.9,
            chunk: "The capital of France is Paris.".into(),
        }];

        let reply = answer(&provider, "Capital of France?", &hits, &config)
            .await
            .unwrap();

        assert_eq!(reply, "Paris.");
        let seen = provider.seen.lock().unwrap();
        let (messages, temperature, max_tokens) = &seen[0];
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0], Message::user(build_prompt("Capital of France?", &hits)));
        assert_eq!(*temperature, 0.0);
        assert_eq!(*max_tokens, 256);
    }
}
