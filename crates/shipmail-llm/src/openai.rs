//! OpenAI Provider Implementation
//!
//! Sends a two-message chat exchange (system persona, user prompt) to a hosted
//! chat-completions endpoint and returns the first choice's text.
//!
//! # Features
//!
//! - Async HTTP communication via `reqwest`
//! - Configurable endpoint, model and request timeout
//! - Typed errors for authentication, rate limiting and unknown models
//!
//! Requests are not retried: a failed call is reported to the caller as is.
//!
//! # Examples
//!
//! ```no_run
//! use shipmail_llm::{OpenAiProvider, ProviderConfig};
//!
//! # async fn example() -> Result<(), shipmail_llm::LlmError> {
//! let provider = OpenAiProvider::new(ProviderConfig::with_api_key("sk-..."))?;
//! let reply = provider
//!     .complete("You are a helpful assistant.", "Say hello")
//!     .await?;
//! println!("{}", reply);
//! # Ok(())
//! # }
//! ```

use crate::config::ProviderConfig;
use crate::LlmError;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use shipmail_domain::LlmProvider as LlmProviderTrait;
use tracing::debug;

/// Chat-completions API provider
pub struct OpenAiProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

/// Request body for the chat-completions API
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response from the chat-completions API
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a new provider
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingApiKey`] when no key is configured and
    /// [`LlmError::InvalidConfig`] for other unusable settings.
    pub fn new(config: ProviderConfig) -> Result<Self, LlmError> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Model identifier requests are sent to
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Run one chat completion
    ///
    /// # Returns
    ///
    /// The trimmed content of the first returned choice
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The endpoint cannot be reached
    /// - The credential is rejected
    /// - The model is unknown or the request is rate limited
    /// - The response has no choice with text content
    pub async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        let url = self.config.completions_url();
        let body = build_request(&self.config, system, prompt);

        debug!(model = %self.config.model, prompt_len = prompt.len(), "Sending completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(status_error(status, error_text, &self.config.model));
        }

        let chat_response = response
            .json::<ChatResponse>()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        first_choice_text(chat_response)
    }
}

impl LlmProviderTrait for OpenAiProvider {
    type Error = LlmError;

    fn generate(&self, system: &str, prompt: &str) -> Result<String, Self::Error> {
        // Blocking wrapper for async function
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to start runtime: {}", e)))?
            .block_on(self.complete(system, prompt))
    }
}

fn build_request<'a>(config: &'a ProviderConfig, system: &'a str, prompt: &'a str) -> ChatRequest<'a> {
    ChatRequest {
        model: &config.model,
        messages: [
            ChatMessage {
                role: "system",
                content: system,
            },
            ChatMessage {
                role: "user",
                content: prompt,
            },
        ],
        temperature: config.temperature,
    }
}

fn status_error(status: StatusCode, body: String, model: &str) -> LlmError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            LlmError::Authentication(format!("HTTP {}: {}", status.as_u16(), body))
        }
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
        StatusCode::NOT_FOUND => LlmError::ModelNotAvailable(model.to_string()),
        _ => LlmError::Api {
            status: status.as_u16(),
            body,
        },
    }
}

fn first_choice_text(response: ChatResponse) -> Result<String, LlmError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| LlmError::InvalidResponse("Response contained no message content".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_provider_requires_api_key() {
        let result = OpenAiProvider::new(ProviderConfig::default());
        assert!(matches!(result, Err(LlmError::MissingApiKey)));
    }

    #[test]
    fn test_provider_creation() {
        let provider = OpenAiProvider::new(ProviderConfig::with_api_key("sk-test")).unwrap();
        assert_eq!(provider.model(), "gpt-4");
    }

    #[test]
    fn test_request_shape() {
        let config = ProviderConfig::with_api_key("sk-test");
        let request = build_request(&config, "persona", "the prompt");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "model": "gpt-4",
                "messages": [
                    {"role": "system", "content": "persona"},
                    {"role": "user", "content": "the prompt"}
                ]
            })
        );
    }

    #[test]
    fn test_request_includes_temperature_when_set() {
        let mut config = ProviderConfig::with_api_key("sk-test");
        config.temperature = Some(0.5);
        let value = serde_json::to_value(build_request(&config, "s", "p")).unwrap();
        assert_eq!(value["temperature"], json!(0.5));
    }

    #[test]
    fn test_first_choice_is_trimmed() {
        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [
                {"message": {"role": "assistant", "content": "  {\"a\": 1}\n"}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ]
        }))
        .unwrap();

        assert_eq!(first_choice_text(response).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn test_missing_choices_is_invalid_response() {
        let response: ChatResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(matches!(
            first_choice_text(response),
            Err(LlmError::InvalidResponse(_))
        ));

        let response: ChatResponse =
            serde_json::from_value(json!({"choices": [{"message": {"content": null}}]})).unwrap();
        assert!(matches!(
            first_choice_text(response),
            Err(LlmError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, "bad key".into(), "gpt-4"),
            LlmError::Authentication(_)
        ));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, String::new(), "gpt-4"),
            LlmError::RateLimitExceeded
        ));
        match status_error(StatusCode::NOT_FOUND, String::new(), "gpt-x") {
            LlmError::ModelNotAvailable(model) => assert_eq!(model, "gpt-x"),
            other => panic!("Expected ModelNotAvailable, got {:?}", other),
        }
        match status_error(StatusCode::INTERNAL_SERVER_ERROR, "boom".into(), "gpt-4") {
            LlmError::Api { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_communication_error() {
        let mut config = ProviderConfig::with_api_key("sk-test");
        config.endpoint = "http://127.0.0.1:1".to_string();
        config.timeout_secs = 5;
        let provider = OpenAiProvider::new(config).unwrap();

        let result = provider.complete("system", "test").await;

        match result {
            Err(LlmError::Communication(_)) => {} // Expected
            other => panic!("Expected Communication error, got {:?}", other),
        }
    }

    // Integration tests (requires a real API key)
    #[tokio::test]
    #[ignore]
    async fn test_openai_complete_integration() {
        let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
        let provider = OpenAiProvider::new(ProviderConfig::with_api_key(api_key)).unwrap();
        let reply = provider
            .complete("You are terse.", "Say 'hello' and nothing else")
            .await
            .unwrap();
        assert!(!reply.is_empty());
    }
}
