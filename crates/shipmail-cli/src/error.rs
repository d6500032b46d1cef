//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No API key in the config file or environment
    #[error("Missing API key: set OPENAI_API_KEY (or add it to .env) or llm.api_key in the config file")]
    MissingApiKey,

    /// Completion provider error
    #[error(transparent)]
    Llm(#[from] shipmail_llm::LlmError),

    /// Batch processing error
    #[error(transparent)]
    Extractor(#[from] shipmail_extractor::ExtractorError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}
