//! Core batch processor

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::observer::BatchObserver;
use crate::parser::parse_reply;
use crate::prompt::PromptBuilder;
use crate::types::{BatchMetadata, BatchReport, EmailFailure};
use shipmail_domain::{shipment_rows, split_emails, LlmProvider, OutputRow};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Turns a batch of shipment emails into report rows.
///
/// Emails are handled strictly one after another: the next prompt is not
/// built until the previous reply has been parsed. A completion failure
/// aborts the batch; an undecodable reply only blanks that email's row.
pub struct BatchProcessor<L>
where
    L: LlmProvider,
{
    llm_provider: Arc<L>,
    config: ExtractorConfig,
    model_name: String,
}

impl<L> BatchProcessor<L>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create a new BatchProcessor
    pub fn new(llm_provider: L, config: ExtractorConfig) -> Self {
        Self {
            llm_provider: Arc::new(llm_provider),
            config,
            model_name: "llm".to_string(),
        }
    }

    /// Set the model name reported in batch metadata
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    /// Read a batch file and process every email in it
    pub async fn process_file(
        &self,
        path: impl AsRef<Path>,
        observer: &mut dyn BatchObserver,
    ) -> Result<BatchReport, ExtractorError> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ExtractorError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        info!("Read {} bytes from {}", text.len(), path.display());

        self.process_text(&text, &path.display().to_string(), observer)
            .await
    }

    /// Process the contents of a batch file
    ///
    /// `source` is only used to label the report metadata.
    pub async fn process_text(
        &self,
        text: &str,
        source: &str,
        observer: &mut dyn BatchObserver,
    ) -> Result<BatchReport, ExtractorError> {
        self.config.validate().map_err(ExtractorError::Config)?;

        let start_time = Instant::now();
        let segments = split_emails(text);

        info!("Split batch into {} emails", segments.len());

        let mut rows = Vec::new();
        let mut failures = Vec::new();
        let mut empty_emails = 0;
        let mut model_calls = 0;

        for (idx, segment) in segments.iter().enumerate() {
            let email = idx + 1;
            let body = segment.trim();

            if body.is_empty() {
                observer.empty_email(email);
                rows.push(OutputRow::blank(email));
                empty_emails += 1;
                continue;
            }

            self.check_length(email, body)?;

            observer.email_started(email);

            let prompt = PromptBuilder::new(body)
                .with_technique_note(self.config.explain_techniques)
                .build();

            debug!("Email {}: prompt length {} chars", email, prompt.len());

            let reply = self.call_llm(&prompt).await?;
            model_calls += 1;
            observer.raw_response(email, &reply);

            let parsed = parse_reply(&reply);
            if let Some(reason) = parsed.failure {
                observer.extraction_failed(email, &reason);
                failures.push(EmailFailure { email, reason });
            }
            observer.shipment_extracted(email, &parsed.entities);

            rows.extend(shipment_rows(email, &parsed.shipment));
        }

        let report = BatchReport {
            rows,
            failures,
            metadata: BatchMetadata {
                source: source.to_string(),
                model_name: self.model_name.clone(),
                emails: segments.len(),
                empty_emails,
                model_calls,
                processing_time_ms: start_time.elapsed().as_millis() as u64,
            },
        };

        observer.batch_finished(&report);

        Ok(report)
    }

    fn check_length(&self, email: usize, body: &str) -> Result<(), ExtractorError> {
        let max = self.config.max_email_chars;
        if max == 0 {
            return Ok(());
        }
        let len = body.chars().count();
        if len > max {
            return Err(ExtractorError::EmailTooLong { email, len, max });
        }
        Ok(())
    }

    /// Call the LLM provider
    async fn call_llm(&self, prompt: &str) -> Result<String, ExtractorError> {
        let llm = Arc::clone(&self.llm_provider);
        let system = self.config.system_persona.clone();
        let prompt = prompt.to_string();

        // Call in a blocking context since LlmProvider is not async
        tokio::task::spawn_blocking(move || {
            llm.generate(&system, &prompt)
                .map_err(|e| ExtractorError::Llm(e.to_string()))
        })
        .await
        .map_err(|e| ExtractorError::Llm(format!("Task join error: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NullObserver;
    use shipmail_llm::MockProvider;

    fn create_test_processor(reply: &str) -> BatchProcessor<MockProvider> {
        BatchProcessor::new(MockProvider::new(reply), ExtractorConfig::default())
    }

    #[tokio::test]
    async fn test_empty_batch_is_one_blank_row() {
        let processor = create_test_processor("{}");

        let report = processor
            .process_text("   \n", "test", &mut NullObserver)
            .await
            .unwrap();

        assert_eq!(report.rows, vec![OutputRow::blank(1)]);
        assert_eq!(report.metadata.emails, 1);
        assert_eq!(report.metadata.empty_emails, 1);
        assert_eq!(report.metadata.model_calls, 0);
    }

    #[tokio::test]
    async fn test_email_too_long() {
        let config = ExtractorConfig {
            max_email_chars: 10,
            ..Default::default()
        };
        let processor = BatchProcessor::new(MockProvider::new("{}"), config);

        let result = processor
            .process_text("this body is longer than ten", "test", &mut NullObserver)
            .await;

        assert!(matches!(
            result,
            Err(ExtractorError::EmailTooLong { email: 1, max: 10, .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let config = ExtractorConfig {
            system_persona: String::new(),
            ..Default::default()
        };
        let processor = BatchProcessor::new(MockProvider::new("{}"), config);

        let result = processor.process_text("body", "test", &mut NullObserver).await;
        assert!(matches!(result, Err(ExtractorError::Config(_))));
    }

    #[tokio::test]
    async fn test_model_name_in_metadata() {
        let processor = create_test_processor("{}").with_model_name("gpt-4");

        let report = processor
            .process_text("body", "inline", &mut NullObserver)
            .await
            .unwrap();

        assert_eq!(report.metadata.model_name, "gpt-4");
        assert_eq!(report.metadata.source, "inline");
        assert_eq!(report.metadata.model_calls, 1);
    }
}
