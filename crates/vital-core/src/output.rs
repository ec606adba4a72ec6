//! Report rendering for completed analyses.
//!
//! A `Report` is the displayable form of one analysis call. It renders as
//! plain text for terminals or serializes through `OutputWriter` as JSON or
//! JSON Lines.

use serde::Serialize;
use std::io::{self, Write};

use crate::analysis::{Analysis, AnalysisSettings};
use crate::error::AnalysisError;
use crate::prompt::MEDICAL_DISCLAIMER;

/// Outcome of one analysis, tagged by status.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ReportOutcome {
    Success {
        analysis: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        tokens_used: Option<u32>,
        latency_ms: u64,
    },
    Error {
        /// "transport", "response" or "unexpected"
        category: String,
        message: String,
        /// Marker-prefixed text shown in place of an analysis
        display: String,
    },
}

/// Displayable result of analysing one uploaded image.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub file_name: String,
    pub model: String,
    pub endpoint: String,
    #[serde(flatten)]
    pub outcome: ReportOutcome,
}

impl Report {
    pub fn new(
        file_name: impl Into<String>,
        settings: &AnalysisSettings,
        result: &Result<Analysis, AnalysisError>,
    ) -> Self {
        let (model, outcome) = match result {
            Ok(analysis) => (
                analysis.model.clone(),
                ReportOutcome::Success {
                    analysis: analysis.text.clone(),
                    tokens_used: analysis.tokens_used,
                    latency_ms: analysis.latency_ms,
                },
            ),
            Err(e) => (
                settings.model.clone(),
                ReportOutcome::Error {
                    category: e.category().to_string(),
                    message: e.message().to_string(),
                    display: e.to_display_text(),
                },
            ),
        };

        Self {
            file_name: file_name.into(),
            model,
            endpoint: settings.endpoint.clone(),
            outcome,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ReportOutcome::Success { .. })
    }

    /// Text for the output area: the analysis, or the error display string.
    pub fn body(&self) -> &str {
        match &self.outcome {
            ReportOutcome::Success { analysis, .. } => analysis,
            ReportOutcome::Error { display, .. } => display,
        }
    }

    /// Lines printed before the body.
    pub fn header(&self) -> String {
        format!(
            "📷 Uploaded Medical Image: {}\n\n📋 Medical Image Analysis Results\n\n",
            self.file_name
        )
    }

    /// Lines printed after the body: status line and disclaimer.
    pub fn footer(&self) -> String {
        let status = match &self.outcome {
            ReportOutcome::Success { latency_ms, .. } => {
                format!("✅ Analysis completed successfully! ({latency_ms} ms, {})", self.model)
            }
            ReportOutcome::Error { category, .. } => {
                format!("Analysis failed ({category} error)")
            }
        };
        format!("\n\n{status}\n\n⚠️ {MEDICAL_DISCLAIMER}\n")
    }

    /// Full plain-text rendering.
    pub fn to_text(&self) -> String {
        format!("{}{}{}", self.header(), self.body(), self.footer())
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable report
    Text,
    /// Single JSON object
    Json,
    /// One JSON object per line (newline-delimited JSON)
    JsonLines,
}

/// A writer that serializes reports in the chosen format.
pub struct OutputWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    pretty: bool,
}

impl<W: Write> OutputWriter<W> {
    /// `pretty` only affects the JSON format.
    pub fn new(writer: W, format: OutputFormat, pretty: bool) -> Self {
        Self {
            writer,
            format,
            pretty,
        }
    }

    pub fn write(&mut self, report: &Report) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => {
                self.writer.write_all(report.to_text().as_bytes())?;
            }
            OutputFormat::Json => {
                if self.pretty {
                    serde_json::to_writer_pretty(&mut self.writer, report)
                        .map_err(io::Error::other)?;
                } else {
                    serde_json::to_writer(&mut self.writer, report).map_err(io::Error::other)?;
                }
                writeln!(self.writer)?;
            }
            OutputFormat::JsonLines => {
                // JSONL is never pretty-printed (one object per line)
                serde_json::to_writer(&mut self.writer, report).map_err(io::Error::other)?;
                writeln!(self.writer)?;
            }
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
