//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.api.endpoint.trim();
        if endpoint.is_empty() {
            return Err(ConfigError::ValidationError(
                "api.endpoint must not be empty".into(),
            ));
        }
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ConfigError::ValidationError(
                "api.endpoint must be an http(s) URL".into(),
            ));
        }
        if self.api.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "api.model must not be empty".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.generation.temperature) {
            return Err(ConfigError::ValidationError(
                "generation.temperature must be between 0.0 and 2.0".into(),
            ));
        }
        if self.generation.top_p <= 0.0 || self.generation.top_p > 1.0 {
            return Err(ConfigError::ValidationError(
                "generation.top_p must be in (0.0, 1.0]".into(),
            ));
        }
        if self.generation.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "generation.max_tokens must be > 0".into(),
            ));
        }
        if self.generation.stream {
            return Err(ConfigError::ValidationError(
                "generation.stream is not supported; responses are read in one piece".into(),
            ));
        }
        if self.limits.max_file_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_file_size_mb must be > 0".into(),
            ));
        }
        if self.limits.supported_formats.is_empty() {
            return Err(ConfigError::ValidationError(
                "limits.supported_formats must list at least one extension".into(),
            ));
        }
        Ok(())
    }
}
