//! Request builder for the chat-completions analysis call.
//!
//! Performs no I/O and no validation: whatever bytes arrive are encoded and
//! embedded as-is.

use base64::Engine;
use serde::{Deserialize, Serialize};

use super::AnalysisSettings;
#[cfg(test)]
use crate::config::GenerationConfig;

/// MIME type written into every data URI.
///
/// Uploads are never sniffed, so PNG files are labelled JPEG as well.
pub const DATA_URI_MEDIA_TYPE: &str = "image/jpeg";

/// Base64-encoded image ready to embed in a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    /// Base64-encoded image bytes
    pub data: String,
}

impl ImageInput {
    /// Encode raw bytes with the standard padded alphabet.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }

    /// Return the `data:` URI embedded in the user message.
    pub fn data_url(&self) -> String {
        format!("data:{DATA_URI_MEDIA_TYPE};base64,{}", self.data)
    }
}

/// Body of a chat-completions analysis request.
///
/// Serializes to exactly the JSON the endpoint expects. Fields are private so
/// a built request cannot be altered before it is sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
    stream: bool,
}

/// One message in the conversation, tagged by role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ChatMessage {
    System { content: String },
    User { content: Vec<ChatContent> },
}

/// A part of a multimodal user message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChatContent {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

impl AnalysisRequest {
    /// Build a request for one image.
    ///
    /// Always two messages: the system persona, then a user message holding
    /// the instruction text followed by the image data URI.
    pub fn build(image_bytes: &[u8], settings: &AnalysisSettings) -> Self {
        let image = ImageInput::from_bytes(image_bytes);
        let generation = &settings.generation;

        Self {
            model: settings.model.clone(),
            messages: vec![
                ChatMessage::System {
                    content: settings.prompts.system.clone(),
                },
                ChatMessage::User {
                    content: vec![
                        ChatContent::Text {
                            text: settings.prompts.user.clone(),
                        },
                        ChatContent::ImageUrl {
                            image_url: ImageUrl {
                                url: image.data_url(),
                            },
                        },
                    ],
                },
            ],
            temperature: generation.temperature,
            top_p: generation.top_p,
            max_tokens: generation.max_tokens,
            stream: generation.stream,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    #[cfg(test)]
    pub(crate) fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Sampling parameters carried by this request.
    #[cfg(test)]
    pub(crate) fn generation(&self) -> GenerationConfig {
        GenerationConfig {
            temperature: self.temperature,
            top_p: self.top_p,
            max_tokens: self.max_tokens,
            stream: self.stream,
        }
    }

    /// The embedded image data URI, if the user message carries one.
    pub fn image_data_url(&self) -> Option<&str> {
        self.messages.iter().find_map(|message| match message {
            ChatMessage::User { content } => content.iter().find_map(|part| match part {
                ChatContent::ImageUrl { image_url } => Some(image_url.url.as_str()),
                ChatContent::Text { .. } => None,
            }),
            ChatMessage::System { .. } => None,
        })
    }
}
