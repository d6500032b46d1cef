//! Configuration management for the CLI.
//!
//! Settings are layered: built-in defaults, then `~/.shipmail/config.toml`
//! (or `--config`), then environment variables, then command-line flags.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use shipmail_extractor::ExtractorConfig;
use shipmail_llm::{LlmError, ProviderConfig};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable holding the provider credential
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Completion provider settings
    #[serde(default)]
    pub llm: ProviderConfig,

    /// Batch pipeline settings
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pipe-delimited markdown table
    Markdown,
    /// Boxed terminal table
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".shipmail").join("config.toml"))
    }

    /// Load the default configuration file, or defaults when it does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path, which must exist.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.extractor.validate().map_err(CliError::Config)?;
        Ok(config)
    }

    /// Resolve the provider settings, taking the API key from the environment
    /// when set there.
    ///
    /// `lookup` reads an environment variable; it is a parameter so tests do not
    /// depend on the process environment.
    pub fn provider_config<F>(&self, lookup: F) -> Result<ProviderConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut provider = self.llm.clone();

        if let Some(api_key) = lookup(API_KEY_ENV).filter(|key| !key.trim().is_empty()) {
            provider.api_key = api_key;
        }

        provider.validate().map_err(|e| match e {
            LlmError::MissingApiKey => CliError::MissingApiKey,
            other => CliError::Config(other.to_string()),
        })?;

        Ok(provider)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Markdown,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Markdown
}
