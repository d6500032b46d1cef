//! CLI argument parsing.

use crate::config::Config;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Batch file read when no input is given
pub const DEFAULT_INPUT: &str = "test_emails.txt";

/// Shipmail - Extract shipment details from notification emails into a report.
#[derive(Debug, Parser)]
#[command(name = "shipmail")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Batch file with emails separated by ---EMAIL_SEPARATOR---
    #[arg(default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<CliFormat>,

    /// Completion model
    #[arg(short, long, env = "SHIPMAIL_MODEL")]
    pub model: Option<String>,

    /// API base URL
    #[arg(long, env = "SHIPMAIL_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Only print the report (no per-email narration)
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Ask the model to explain its extraction techniques
    #[arg(long)]
    pub explain_techniques: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Pipe-delimited markdown table (default)
    Markdown,
    /// Boxed terminal table
    Table,
    /// JSON array of rows
    Json,
}

impl Cli {
    /// Apply command-line overrides on top of file configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(model) = &self.model {
            config.llm.model = model.clone();
        }
        if let Some(endpoint) = &self.endpoint {
            config.llm.endpoint = endpoint.clone();
        }
        if self.explain_techniques {
            config.extractor.explain_techniques = true;
        }
    }

    /// Tracing filter directive for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Markdown => crate::config::OutputFormat::Markdown,
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}
