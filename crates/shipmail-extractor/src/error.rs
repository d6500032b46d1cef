//! Error types for the batch pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a batch run
///
/// Undecodable model replies are not errors; they degrade to an empty
/// shipment and are reported through the observer.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Completion call failed
    #[error("LLM error: {0}")]
    Llm(String),

    /// Input file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Email body exceeds the configured limit
    #[error("Email {email} too long: {len} chars (max: {max})")]
    EmailTooLong {
        /// 1-based email index
        email: usize,
        /// Length of the trimmed body in characters
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
