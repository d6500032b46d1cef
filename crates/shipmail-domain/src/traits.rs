//! Trait interfaces for external interactions
//!
//! Infrastructure crates implement these; the domain never talks to the
//! network itself.

/// Trait for chat-style completion providers
///
/// Implemented by the infrastructure layer (shipmail-llm). A call sends one
/// system message and one user message and returns the text of the first
/// choice. Providers do not retry or cache.
pub trait LlmProvider {
    /// Error type for completion calls
    type Error;

    /// Run one completion with the given system persona and user prompt
    fn generate(&self, system: &str, prompt: &str) -> Result<String, Self::Error>;
}
