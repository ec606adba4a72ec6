//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

use crate::prompt::{DEFAULT_SYSTEM_PROMPT, DEFAULT_USER_INSTRUCTION};

/// Remote inference endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Chat completions URL
    pub endpoint: String,

    /// Vision model identifier
    pub model: String,

    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.together.xyz/v1/chat/completions".to_string(),
            model: "meta-llama/Llama-Vision-Free".to_string(),
            api_key: "${TOGETHER_API_KEY}".to_string(),
        }
    }
}

impl ApiConfig {
    /// Resolve the configured key, expanding `${ENV_VAR}` references.
    ///
    /// Returns `None` when the key is empty or names an unset variable.
    pub fn resolved_api_key(&self) -> Option<String> {
        resolve_env_var(&self.api_key)
    }
}

/// Sampling parameters sent with every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Sampling temperature
    pub temperature: f32,

    /// Nucleus sampling proportion
    pub top_p: f32,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// Request a streamed response (the client only handles `false`)
    pub stream: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.4,
            top_p: 1.0,
            max_tokens: 4096,
            stream: false,
        }
    }
}

/// Instruction text attached to every image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// System-role persona prompt
    pub system: String,

    /// User-role instruction that accompanies the image
    pub user: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            system: DEFAULT_SYSTEM_PROMPT.to_string(),
            user: DEFAULT_USER_INSTRUCTION.to_string(),
        }
    }
}

/// Upload limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum file size in megabytes
    pub max_file_size_mb: u64,

    /// Accepted file extensions
    pub supported_formats: Vec<String>,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 200,
            supported_formats: vec!["jpg".to_string(), "png".to_string(), "jpeg".to_string()],
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok().filter(|v| !v.is_empty())
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
