//! Shipmail LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `shipmail-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OpenAiProvider`: Hosted chat-completions API
//!
//! # Examples
//!
//! ```
//! use shipmail_llm::MockProvider;
//! use shipmail_domain::LlmProvider;
//!
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("system", "test prompt").unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod openai;

use shipmail_domain::LlmProvider as LlmProviderTrait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use config::ProviderConfig;
pub use openai::OpenAiProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// No API key was configured
    #[error("Missing API key: set OPENAI_API_KEY or provide llm.api_key in the config file")]
    MissingApiKey,

    /// Provider configuration is unusable
    #[error("Invalid provider configuration: {0}")]
    InvalidConfig(String),

    /// Network or transport failure
    #[error("Communication error: {0}")]
    Communication(String),

    /// Credential rejected by the provider
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Non-success HTTP status not covered above
    #[error("API error (HTTP {status}): {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body as returned by the provider
        body: String,
    },

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Lookup order for each call: queued responses, prompt-specific errors,
/// prompt-specific responses, then the default response.
///
/// # Examples
///
/// ```
/// use shipmail_llm::MockProvider;
/// use shipmail_domain::LlmProvider;
///
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// assert_eq!(provider.generate("sys", "prompt1").unwrap(), "response1");
///
/// let provider = MockProvider::new("fallback").with_queue(["first", "second"]);
/// assert_eq!(provider.generate("sys", "a").unwrap(), "first");
/// assert_eq!(provider.generate("sys", "b").unwrap(), "second");
/// assert_eq!(provider.generate("sys", "c").unwrap(), "fallback");
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    errors: Arc<Mutex<HashSet<String>>>,
    queue: Arc<Mutex<VecDeque<String>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            errors: Arc::new(Mutex::new(HashSet::new())),
            queue: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue responses returned in order, one per call, before any other lookup
    pub fn with_queue<I, S>(self, responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.queue
            .lock()
            .unwrap()
            .extend(responses.into_iter().map(Into::into));
        self
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), response.into());
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        self.errors.lock().unwrap().insert(prompt.into());
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// User prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, prompt)| prompt.clone())
            .collect()
    }

    /// System messages received so far, in call order
    pub fn system_messages(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(system, _)| system.clone())
            .collect()
    }

    /// Reset the recorded calls
    pub fn reset_call_count(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, system: &str, prompt: &str) -> Result<String, Self::Error> {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), prompt.to_string()));

        if let Some(response) = self.queue.lock().unwrap().pop_front() {
            return Ok(response);
        }

        if self.errors.lock().unwrap().contains(prompt) {
            return Err(LlmError::Other("Mock error".to_string()));
        }

        if let Some(response) = self.responses.lock().unwrap().get(prompt) {
            return Ok(response.clone());
        }

        Ok(self.default_response.clone())
    }
}
