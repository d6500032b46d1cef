//! Extract command implementation.

use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;
use crate::observer::ConsoleObserver;
use crate::output::Formatter;
use shipmail_extractor::{BatchProcessor, TracingObserver};
use shipmail_llm::OpenAiProvider;
use tracing::info;

/// Execute the extract command.
///
/// The API key is resolved before the input file is read, so a missing
/// credential fails fast.
pub async fn execute_extract(cli: &Cli, config: &Config, formatter: &Formatter) -> Result<()> {
    let provider_config = config.provider_config(|name| std::env::var(name).ok())?;
    let model = provider_config.model.clone();
    let provider = OpenAiProvider::new(provider_config)?;

    info!("Using model {} for {}", model, cli.input.display());

    let processor = BatchProcessor::new(provider, config.extractor.clone()).with_model_name(model);

    let report = if cli.quiet {
        processor.process_file(&cli.input, &mut TracingObserver).await?
    } else {
        let mut observer = ConsoleObserver::stdout();
        processor.process_file(&cli.input, &mut observer).await?
    };

    println!("{}", formatter.format_rows(&report.rows)?);

    if !cli.quiet {
        eprintln!("{}", formatter.batch_summary(&report));
    }

    Ok(())
}
