//! Progress and diagnostic hooks for a batch run

use crate::parser::ExtractionFailure;
use crate::types::BatchReport;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Receives progress and diagnostics while a batch is processed.
///
/// All hooks default to doing nothing. Email indices are 1-based.
pub trait BatchObserver {
    /// A non-empty email is about to be sent to the model
    fn email_started(&mut self, _email: usize) {}

    /// The model replied for this email
    fn raw_response(&mut self, _email: usize, _reply: &str) {}

    /// The reply could not be decoded; an empty shipment is used instead
    fn extraction_failed(&mut self, _email: usize, _failure: &ExtractionFailure) {}

    /// Entities decoded for this email (an empty object after a failure)
    fn shipment_extracted(&mut self, _email: usize, _entities: &Value) {}

    /// The segment was blank and produced a blank row without a model call
    fn empty_email(&mut self, _email: usize) {}

    /// Every segment has been processed
    fn batch_finished(&mut self, _report: &BatchReport) {}
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl BatchObserver for NullObserver {}

/// Observer that forwards events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl BatchObserver for TracingObserver {
    fn email_started(&mut self, email: usize) {
        info!(email, "Processing email");
    }

    fn raw_response(&mut self, email: usize, reply: &str) {
        debug!(email, reply, "Raw model response");
    }

    fn extraction_failed(&mut self, email: usize, failure: &ExtractionFailure) {
        warn!(email, %failure, "Failed to parse JSON response");
    }

    fn shipment_extracted(&mut self, email: usize, entities: &Value) {
        debug!(email, %entities, "Extracted entities");
    }

    fn empty_email(&mut self, email: usize) {
        debug!(email, "Empty email, emitting blank row");
    }

    fn batch_finished(&mut self, report: &BatchReport) {
        info!(
            "Batch complete: {} emails, {} rows, {} decode failures",
            report.metadata.emails,
            report.rows.len(),
            report.failures.len()
        );
    }
}
