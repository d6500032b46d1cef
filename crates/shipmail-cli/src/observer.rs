//! Console narration for a batch run.

use serde_json::Value;
use shipmail_extractor::{BatchObserver, ExtractionFailure};
use std::io::{self, Write};

/// Prints per-email progress and model diagnostics.
///
/// Output goes to stdout by default, interleaved with the final report.
/// Write failures are ignored; narration never aborts a batch.
pub struct ConsoleObserver<W: Write> {
    out: W,
}

impl ConsoleObserver<io::Stdout> {
    /// Observer writing to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleObserver<W> {
    /// Observer writing to the given sink.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the observer and return its sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> BatchObserver for ConsoleObserver<W> {
    fn email_started(&mut self, email: usize) {
        writeln!(self.out, "Processing email {}...", email).ok();
    }

    fn raw_response(&mut self, _email: usize, reply: &str) {
        writeln!(self.out, "GPT raw response: {}", reply).ok();
    }

    fn extraction_failed(&mut self, _email: usize, _failure: &ExtractionFailure) {
        writeln!(self.out, "Failed to parse JSON response from GPT.").ok();
    }

    fn shipment_extracted(&mut self, _email: usize, entities: &Value) {
        let pretty = serde_json::to_string_pretty(entities).unwrap_or_else(|_| entities.to_string());
        writeln!(self.out, "Extracted Entities: {}", pretty).ok();
    }
}
