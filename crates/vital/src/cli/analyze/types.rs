//! CLI enum types for the analyze command.

use clap::ValueEnum;

/// Supported output formats.
#[derive(Clone, Copy, Debug, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable report (default)
    #[default]
    Text,
    /// Single JSON object
    Json,
    /// One JSON object per line (newline-delimited)
    Jsonl,
}

impl From<OutputFormat> for vital_core::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => vital_core::OutputFormat::Text,
            OutputFormat::Json => vital_core::OutputFormat::Json,
            OutputFormat::Jsonl => vital_core::OutputFormat::JsonLines,
        }
    }
}
