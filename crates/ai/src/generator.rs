//! Backend-agnostic seams for text and image generation.
//!
//! The HTTP client in [`crate::openai`] implements both traits; tests plug
//! in in-process fakes.

use async_trait::async_trait;

use crate::error::AiError;

/// Which kind of text a completion produces. Backends use it to pick a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTask {
    Ideas,
    Draft,
    Rewrite,
}

/// A single chat-style completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub task: TextTask,
    /// System message.
    pub instructions: String,
    /// User message.
    pub prompt: String,
    /// When set, the backend must answer with JSON matching this schema.
    pub json_schema: Option<serde_json::Value>,
}

/// An image as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedImage {
    /// Raw image bytes that still need to be uploaded.
    Bytes { data: Vec<u8>, content_type: String },
    /// An image already hosted by the backend.
    Url(String),
}

/// Produces text from a prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run one completion and return the raw message content.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AiError>;
}

/// Produces a single image from a prompt.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, AiError>;
}
