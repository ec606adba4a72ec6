//! Error types for Vital.
//!
//! Analysis failures are deliberately coarse: three categories that mirror the
//! places a single remote call can go wrong. Callers branch on the variant
//! instead of inspecting display text.

use std::path::PathBuf;
use thiserror::Error;

/// Marker that prefixes every analysis failure rendered as display text.
pub const ERROR_MARKER: &str = "❌";

/// Top-level error type for Vital operations.
#[derive(Error, Debug)]
pub enum VitalError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Upload validation errors
    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    /// Remote analysis errors
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors raised while accepting an image upload.
#[derive(Error, Debug)]
pub enum UploadError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Extension is not one of the accepted image types
    #[error("Unsupported format for {path}: {format} (accepted: {accepted})")]
    UnsupportedFormat {
        path: PathBuf,
        format: String,
        accepted: String,
    },

    /// File exceeds size limit
    #[error("File too large: {path} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    /// File could not be read
    #[error("Failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },
}

/// Failure of a single analysis call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Connection failure or non-2xx status from the endpoint.
    #[error("transport error: {message}")]
    Transport {
        message: String,
        status_code: Option<u16>,
    },

    /// The body did not have the expected `choices[0].message.content` shape.
    #[error("malformed response: {message}")]
    Response { message: String },

    /// Any other runtime fault.
    #[error("unexpected error: {message}")]
    Unexpected { message: String },
}

impl AnalysisError {
    /// Short machine-readable category name.
    pub fn category(&self) -> &'static str {
        match self {
            AnalysisError::Transport { .. } => "transport",
            AnalysisError::Response { .. } => "response",
            AnalysisError::Unexpected { .. } => "unexpected",
        }
    }

    /// Underlying detail message without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            AnalysisError::Transport { message, .. }
            | AnalysisError::Response { message }
            | AnalysisError::Unexpected { message } => message,
        }
    }

    /// HTTP status code, if the failure carried one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AnalysisError::Transport { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// Render as the text shown in place of an analysis.
    ///
    /// Each category has its own marker-prefixed lead-in so the output area
    /// reads the same as a failed call always has.
    pub fn to_display_text(&self) -> String {
        let lead = match self {
            AnalysisError::Transport { .. } => "Error calling Together AI API",
            AnalysisError::Response { .. } => "Error parsing API response",
            AnalysisError::Unexpected { .. } => "Unexpected error",
        };
        format!("{ERROR_MARKER} {lead}: {}", self.message())
    }
}

/// Convenience type alias for Vital results.
pub type Result<T> = std::result::Result<T, VitalError>;
