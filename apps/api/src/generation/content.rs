//! Content Generator: one chat-completion call with fixed generation parameters.

use tracing::info;

use crate::generation::prompt_builder::PromptPair;
use crate::llm_client::{ChatMessage, CompletionRequest, LlmError, TextGenerationClient, MODEL};

/// Output budget for one resume.
pub const MAX_COMPLETION_TOKENS: u32 = 30_000;
/// Leans towards consistency over creativity.
pub const TEMPERATURE: f64 = 0.7;
pub const TOP_P: f64 = 0.9;

/// Sends the prompt pair and returns the first completion's raw text.
/// An empty completion is an error; the text is not otherwise inspected.
pub async fn generate_raw_content(
    llm: &dyn TextGenerationClient,
    prompts: &PromptPair,
) -> Result<String, LlmError> {
    let request = CompletionRequest {
        model: MODEL,
        messages: vec![
            ChatMessage::system(&prompts.system),
            ChatMessage::user(&prompts.user),
        ],
        max_completion_tokens: MAX_COMPLETION_TOKENS,
        temperature: TEMPERATURE,
        top_p: TOP_P,
    };

    let text = llm.complete(&request).await?;
    if text.trim().is_empty() {
        return Err(LlmError::EmptyContent);
    }

    info!("Model returned {} characters of resume content", text.len());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::Role;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records the last request and answers with a canned completion.
    struct RecordingClient {
        reply: String,
        seen: Mutex<Option<(Vec<(Role, String)>, u32, f64, f64, String)>>,
    }

    #[async_trait]
    impl TextGenerationClient for RecordingClient {
        async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, LlmError> {
            let messages = request
                .messages
                .iter()
                .map(|m| (m.role, m.content.to_string()))
                .collect();
            *self.seen.lock().unwrap() = Some((
                messages,
                request.max_completion_tokens,
                request.temperature,
                request.top_p,
                request.model.to_string(),
            ));
            Ok(self.reply.clone())
        }
    }

    fn prompts() -> PromptPair {
        PromptPair {
            system: "system text".to_string(),
            user: "user text".to_string(),
        }
    }

    #[tokio::test]
    async fn test_sends_system_then_user_with_fixed_parameters() {
        let client = RecordingClient {
            reply: "{}".to_string(),
            seen: Mutex::new(None),
        };

        let text = generate_raw_content(&client, &prompts()).await.unwrap();
        assert_eq!(text, "{}");

        let (messages, max_tokens, temperature, top_p, model) =
            client.seen.lock().unwrap().take().unwrap();
        assert_eq!(
            messages,
            vec![
                (Role::System, "system text".to_string()),
                (Role::User, "user text".to_string())
            ]
        );
        assert_eq!(max_tokens, MAX_COMPLETION_TOKENS);
        assert_eq!(temperature, 0.7);
        assert_eq!(top_p, 0.9);
        assert_eq!(model, MODEL);
    }

    #[tokio::test]
    async fn test_whitespace_completion_is_an_error() {
        let client = RecordingClient {
            reply: "  \n ".to_string(),
            seen: Mutex::new(None),
        };
        let err = generate_raw_content(&client, &prompts()).await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }

    /// Captures the serialized request body exactly as it would be posted.
    struct WireClient(Mutex<Option<serde_json::Value>>);

    #[async_trait]
    impl TextGenerationClient for WireClient {
        async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, LlmError> {
            *self.0.lock().unwrap() = Some(serde_json::to_value(request).unwrap());
            Ok("{}".to_string())
        }
    }

    #[tokio::test]
    async fn test_wire_body_uses_sampling_capable_model_and_exact_values() {
        let client = WireClient(Mutex::new(None));
        generate_raw_content(&client, &prompts()).await.unwrap();

        let body = client.0.lock().unwrap().take().unwrap();
        assert_eq!(body["model"], "gpt-4.1");
        assert_ne!(body["model"], "gpt-5");
        assert_eq!(body["max_completion_tokens"], 30_000);
        assert_eq!(body["temperature"].as_f64(), Some(0.7));
        assert_eq!(body["top_p"].as_f64(), Some(0.9));
        assert_eq!(body["temperature"].to_string(), "0.7");
        assert_eq!(body["top_p"].to_string(), "0.9");
    }
}
