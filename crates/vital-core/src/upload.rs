//! Upload acceptance: the checks a file picker would apply before the bytes
//! ever reach the request builder.

use std::path::Path;

use crate::config::LimitsConfig;
use crate::error::UploadError;

/// An accepted image upload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Just the filename portion
    pub file_name: String,
    /// Raw file contents, not decoded or sniffed
    pub bytes: Vec<u8>,
}

/// Validates and reads uploads against the configured limits.
pub struct UploadValidator {
    limits: LimitsConfig,
}

impl UploadValidator {
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Check the path without reading it.
    ///
    /// Checks:
    /// - File exists
    /// - Extension is one of the accepted formats (case-insensitive)
    /// - File size is within limits
    pub fn validate(&self, path: &Path) -> Result<(), UploadError> {
        if !path.is_file() {
            return Err(UploadError::FileNotFound(path.to_path_buf()));
        }

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let accepted = self
            .limits
            .supported_formats
            .iter()
            .any(|f| f.eq_ignore_ascii_case(&extension));
        if !accepted {
            return Err(UploadError::UnsupportedFormat {
                path: path.to_path_buf(),
                format: if extension.is_empty() {
                    "(none)".to_string()
                } else {
                    extension
                },
                accepted: self.limits.supported_formats.join(", "),
            });
        }

        let metadata = std::fs::metadata(path).map_err(|e| UploadError::Read {
            path: path.to_path_buf(),
            message: format!("Cannot read metadata: {e}"),
        })?;

        let max_bytes = self.limits.max_file_size_mb.saturating_mul(1024 * 1024);
        if metadata.len() > max_bytes {
            return Err(UploadError::FileTooLarge {
                path: path.to_path_buf(),
                size_mb: metadata.len() / (1024 * 1024),
                max_mb: self.limits.max_file_size_mb,
            });
        }

        Ok(())
    }

    /// Validate, then read the whole file.
    pub async fn load(&self, path: &Path) -> Result<ImageUpload, UploadError> {
        self.validate(path)?;

        let bytes = tokio::fs::read(path).await.map_err(|e| UploadError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        tracing::debug!(file = %file_name, bytes = bytes.len(), "Upload accepted");
        Ok(ImageUpload { file_name, bytes })
    }
}
