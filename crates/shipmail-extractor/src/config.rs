//! Configuration for the batch pipeline

use crate::prompt::SYSTEM_PERSONA;
use serde::{Deserialize, Serialize};

/// Configuration for the [`BatchProcessor`](crate::BatchProcessor)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// System message sent with every completion request
    #[serde(default = "default_system_persona")]
    pub system_persona: String,

    /// Ask the model to explain its techniques after the JSON object.
    /// The explanation is never parsed.
    #[serde(default)]
    pub explain_techniques: bool,

    /// Maximum email body length in characters; 0 disables the check
    #[serde(default)]
    pub max_email_chars: usize,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.system_persona.trim().is_empty() {
            return Err("system_persona must not be empty".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            system_persona: default_system_persona(),
            explain_techniques: false,
            max_email_chars: 0,
        }
    }
}

fn default_system_persona() -> String {
    SYSTEM_PERSONA.to_string()
}
