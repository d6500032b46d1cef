//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use shipmail_domain::{OutputRow, REPORT_HEADERS};
use shipmail_extractor::BatchReport;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Render rows as a pipe-delimited markdown table.
///
/// Produces a header line, a `---` separator per column and one line per row.
/// Cells are neither padded nor escaped, so a `|` inside a value is emitted
/// as is.
pub fn render_markdown(rows: &[OutputRow], headers: &[&str]) -> String {
    let mut table = String::new();

    table.push_str(&markdown_line(headers.iter().copied()));
    table.push_str(&markdown_line(headers.iter().map(|_| "---")));
    for row in rows {
        let cells = row.cells();
        table.push_str(&markdown_line(cells.iter().map(String::as_str)));
    }

    table
}

fn markdown_line<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    format!("| {} |\n", cells.collect::<Vec<_>>().join(" | "))
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format report rows.
    pub fn format_rows(&self, rows: &[OutputRow]) -> Result<String> {
        match self.format {
            OutputFormat::Markdown => Ok(render_markdown(rows, &REPORT_HEADERS)),
            OutputFormat::Table => Ok(self.format_rows_table(rows)),
            OutputFormat::Json => self.format_rows_json(rows),
        }
    }

    /// Format rows as JSON objects keyed by column header.
    fn format_rows_json(&self, rows: &[OutputRow]) -> Result<String> {
        let json_rows: Vec<serde_json::Value> = rows
            .iter()
            .map(|row| {
                let object: serde_json::Map<String, serde_json::Value> = REPORT_HEADERS
                    .iter()
                    .zip(row.cells())
                    .map(|(header, cell)| (header.to_string(), serde_json::Value::String(cell)))
                    .collect();
                serde_json::Value::Object(object)
            })
            .collect();

        Ok(serde_json::to_string_pretty(&json_rows)?)
    }

    /// Format rows as a boxed table.
    fn format_rows_table(&self, rows: &[OutputRow]) -> String {
        let mut builder = Builder::default();
        builder.push_record(REPORT_HEADERS);

        for row in rows {
            builder.push_record(row.cells());
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// One-line summary of a finished batch.
    pub fn batch_summary(&self, report: &BatchReport) -> String {
        let meta = &report.metadata;
        let message = format!(
            "Processed {} email(s) from {} into {} row(s) using {} ({} ms)",
            meta.emails,
            meta.source,
            report.rows.len(),
            meta.model_name,
            meta.processing_time_ms
        );

        if report.failures.is_empty() {
            self.success(&message)
        } else {
            let emails: Vec<String> = report.failures.iter().map(|f| f.email.to_string()).collect();
            format!(
                "{}\n{}",
                self.success(&message),
                self.warning(&format!(
                    "Could not decode the model reply for email(s) {}",
                    emails.join(", ")
                ))
            )
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
