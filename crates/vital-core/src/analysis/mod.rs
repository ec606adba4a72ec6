//! Remote image analysis.
//!
//! Two pieces: a request builder that turns image bytes into the provider's
//! chat-completions body, and a client that performs one POST per call and
//! reduces the response to a tagged result.

pub(crate) mod client;
pub(crate) mod request;

pub use client::{Analysis, AnalysisClient};
pub use request::{AnalysisRequest, ChatContent, ChatMessage, ImageInput, ImageUrl};

use crate::config::{Config, GenerationConfig, PromptConfig};

/// Immutable settings shared by every request a client sends.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    /// Chat completions URL
    pub endpoint: String,
    /// Model identifier placed in every body
    pub model: String,
    /// System and user instruction text
    pub prompts: PromptConfig,
    /// Sampling parameters
    pub generation: GenerationConfig,
}

impl AnalysisSettings {
    /// Extract analysis settings from a loaded config.
    pub fn from_config(config: &Config) -> Self {
        Self {
            endpoint: config.api.endpoint.clone(),
            model: config.api.model.clone(),
            prompts: config.prompts.clone(),
            generation: config.generation.clone(),
        }
    }

    /// Same settings pointed at a different endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
