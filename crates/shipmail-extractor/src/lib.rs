//! Shipmail Extractor
//!
//! Turns batches of shipment-notification emails into report rows using an
//! LLM completion per email.
//!
//! # Architecture
//!
//! ```text
//! batch file → split → (PromptBuilder → LlmProvider → parse_reply → shipment_rows) → rows
//! ```
//!
//! # Key Features
//!
//! - **Prompting**: fixed template asking for six shipment fields as JSON
//! - **Lenient parsing**: first `{` to last `}`; undecodable replies become blank rows
//! - **Row padding**: ragged list fields are equalized with blank cells
//! - **Observer hooks**: progress and diagnostics without touching stdout
//!
//! # Example Usage
//!
//! ```no_run
//! use shipmail_extractor::{BatchProcessor, ExtractorConfig, TracingObserver};
//! use shipmail_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(r#"{"po_numbers": ["PO1"], "source": "Vendor"}"#);
//! let processor = BatchProcessor::new(llm, ExtractorConfig::default());
//!
//! let report = processor
//!     .process_file("test_emails.txt", &mut TracingObserver)
//!     .await?;
//!
//! println!("Rows: {}", report.rows.len());
//! println!("Decode failures: {}", report.failures.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
pub mod observer;
pub mod parser;
mod processor;
pub mod prompt;
mod types;


pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use observer::{BatchObserver, NullObserver, TracingObserver};
pub use parser::{extract_json_object, parse_reply, ExtractionFailure, ParsedReply};
pub use processor::BatchProcessor;
pub use prompt::{PromptBuilder, SYSTEM_PERSONA};
pub use types::{BatchMetadata, BatchReport, EmailFailure};
