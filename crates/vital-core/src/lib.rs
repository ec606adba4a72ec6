//! Vital Core - medical image analysis through a hosted vision model.
//!
//! Takes an uploaded image, attaches a fixed clinical-analysis prompt, sends
//! one chat-completions request and hands back the model's text.
//!
//! ```text
//! Upload → Validate → Build request (base64 data URI) → POST → choices[0].message.content
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use vital_core::{Config, Vital};
//!
//! #[tokio::main]
//! async fn main() -> vital_core::Result<()> {
//!     let vital = Vital::new(Config::load()?);
//!     let report = vital.analyze_file("./chest-xray.jpg".as_ref()).await?;
//!     println!("{}", report.body());
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod output;
pub mod prompt;
pub mod upload;

pub use analysis::{Analysis, AnalysisClient, AnalysisRequest, AnalysisSettings, ImageInput};
pub use config::Config;
pub use error::{AnalysisError, ConfigError, Result, UploadError, VitalError, ERROR_MARKER};
pub use output::{OutputFormat, OutputWriter, Report, ReportOutcome};
pub use upload::{ImageUpload, UploadValidator};

use std::path::Path;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Vital analyzer - upload validation plus one analysis client.
pub struct Vital {
    config: Config,
    client: AnalysisClient,
    validator: UploadValidator,
}

impl Vital {
    /// Create an analyzer using the key configured in `api.api_key`.
    pub fn new(config: Config) -> Self {
        let api_key = config.api.resolved_api_key();
        Self::with_api_key(config, api_key)
    }

    /// Create an analyzer with an explicit credential.
    pub fn with_api_key(config: Config, api_key: Option<String>) -> Self {
        tracing::debug!("Initializing Vital v{}", VERSION);
        let client = AnalysisClient::new(AnalysisSettings::from_config(&config), api_key);
        let validator = UploadValidator::new(config.limits.clone());
        Self {
            config,
            client,
            validator,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn client(&self) -> &AnalysisClient {
        &self.client
    }

    /// Validate and read `path`, then analyse it.
    ///
    /// Upload problems are returned as errors; a failed remote call is not an
    /// error here but an error-status `Report`.
    pub async fn analyze_file(&self, path: &Path) -> Result<Report> {
        let upload = self.validator.load(path).await?;
        Ok(self.analyze_upload(&upload).await)
    }

    /// Analyse an already accepted upload.
    pub async fn analyze_upload(&self, upload: &ImageUpload) -> Report {
        let result = self.client.analyze_image(&upload.bytes).await;
        match &result {
            Ok(analysis) => tracing::info!(
                file = %upload.file_name,
                latency_ms = analysis.latency_ms,
                "Analysis completed"
            ),
            Err(e) => tracing::error!(
                file = %upload.file_name,
                category = e.category(),
                "Analysis failed: {}",
                e.message()
            ),
        }
        Report::new(upload.file_name.clone(), self.client.settings(), &result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_vital_with_explicit_key() {
        let vital = Vital::with_api_key(Config::default(), Some("k".to_string()));
        assert!(vital.client().has_api_key());
        assert_eq!(vital.config().generation.max_tokens, 4096);
    }

    #[tokio::test]
    async fn test_analyze_file_rejects_unsupported_upload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        let vital = Vital::with_api_key(Config::default(), None);
        let err = vital.analyze_file(&path).await.unwrap_err();
        assert!(matches!(
            err,
            VitalError::Upload(UploadError::UnsupportedFormat { .. })
        ));
    }

    #[tokio::test]
    async fn test_failed_call_becomes_error_report() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut config = Config::default();
        config.api.endpoint = format!("http://{addr}/v1/chat/completions");
        let vital = Vital::with_api_key(config, Some("k".to_string()));

        let upload = ImageUpload {
            file_name: "scan.jpg".to_string(),
            bytes: vec![0xFF, 0xD8, 0xFF],
        };
        let report = vital.analyze_upload(&upload).await;
        assert!(!report.is_success());
        assert!(report.body().starts_with(ERROR_MARKER));
    }
}
