//! Result types for a batch run

use crate::parser::ExtractionFailure;
use shipmail_domain::OutputRow;

/// Result of processing one batch file
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Report rows for all emails, in email order
    pub rows: Vec<OutputRow>,

    /// Emails whose reply could not be decoded
    pub failures: Vec<EmailFailure>,

    /// Metadata about the run
    pub metadata: BatchMetadata,
}

/// A reply that degraded to an empty shipment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailFailure {
    /// 1-based email index
    pub email: usize,

    /// Why decoding failed
    pub reason: ExtractionFailure,
}

/// Metadata about a batch run
#[derive(Debug, Clone)]
pub struct BatchMetadata {
    /// Where the batch came from (file path, or a caller-chosen label)
    pub source: String,

    /// Name of the completion model used
    pub model_name: String,

    /// Number of segments in the batch, blank ones included
    pub emails: usize,

    /// Number of blank segments
    pub empty_emails: usize,

    /// Number of completion calls made
    pub model_calls: usize,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}
