//! Output formatting for the CLI.

use crate::error::Result;
use crate::report::ReportEntry;
use colored::*;
use policylens_classifier::ClassificationError;
use policylens_domain::{Classification, ClassificationResult};
use std::fmt;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
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

    /// Format a classification result.
    pub fn format_result(&self, result: &ClassificationResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&result_json(result))?),
            OutputFormat::Table => Ok(self.format_result_table(result)),
        }
    }

    fn format_result_table(&self, result: &ClassificationResult) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Classification", "Reason"]);
        builder.push_record([self.label(result.classification()), result.reason().to_string()]);

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format an evaluation report.
    pub fn format_report(&self, entries: &[ReportEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(entries)?),
            OutputFormat::Table => Ok(self.format_report_table(entries)),
        }
    }

    fn format_report_table(&self, entries: &[ReportEntry]) -> String {
        if entries.is_empty() {
            return self.colorize("No models evaluated.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Provider", "Model", "Accuracy", "Correct", "Total", "Failures"]);

        for entry in entries {
            match entry {
                ReportEntry::Metrics(m) => builder.push_record([
                    m.provider.clone(),
                    m.model.clone(),
                    format!("{:.2}%", m.accuracy),
                    m.correct_predictions.to_string(),
                    m.total_samples.to_string(),
                    m.failures.to_string(),
                ]),
                ReportEntry::Failed {
                    provider,
                    model,
                    error,
                } => builder.push_record([
                    provider.clone(),
                    model.clone(),
                    self.colorize(error, "red"),
                    "-".to_string(),
                    "-".to_string(),
                    "-".to_string(),
                ]),
            }
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a failed classification: kind, detail and the raw model output.
    pub fn classification_failure<E: fmt::Display>(&self, err: &ClassificationError<E>) -> String {
        let mut out = self.error(&format!("{} failure: {}", err.kind(), err));
        if let Some(raw) = err.raw_output() {
            out.push('\n');
            out.push_str(&self.colorize("Raw model output:", "yellow"));
            out.push('\n');
            out.push_str(raw);
        }
        out
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn label(&self, classification: Classification) -> String {
        match classification {
            Classification::Weak => self.colorize(classification.as_str(), "red"),
            Classification::Strong => self.colorize(classification.as_str(), "green"),
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// JSON form of a result: `{"classification": ..., "reason": ...}`.
pub fn result_json(result: &ClassificationResult) -> serde_json::Value {
    serde_json::json!({
        "classification": result.classification().as_str(),
        "reason": result.reason(),
    })
}
