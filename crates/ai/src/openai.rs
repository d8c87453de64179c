//! HTTP client for OpenAI-compatible chat and image endpoints.
//!
//! Wraps `POST /chat/completions` (with optional `response_format` JSON
//! schema) and `POST /images/generations` using [`reqwest`].

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::AiError;
use crate::generator::{CompletionRequest, GeneratedImage, ImageGenerator, TextGenerator, TextTask};

/// Requested size for generated images.
pub const IMAGE_SIZE: &str = "1024x1024";

/// Default API base URL.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// Default per-call timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 90;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Model names used per task.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub ideas: String,
    pub draft: String,
    pub rewrite: String,
    pub image: String,
}

impl ModelConfig {
    fn for_task(&self, task: TextTask) -> &str {
        match task {
            TextTask::Ideas => &self.ideas,
            TextTask::Draft => &self.draft,
            TextTask::Rewrite => &self.rewrite,
        }
    }
}

/// Connection settings for the generation backend.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub models: ModelConfig,
}

impl OpenAiConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var           | Required | Default                      |
    /// |-------------------|----------|------------------------------|
    /// | `OPENAI_API_KEY`  | **yes**  | --                           |
    /// | `OPENAI_BASE_URL` | no       | `https://api.openai.com/v1`  |
    /// | `AI_TIMEOUT_SECS` | no       | `90`                         |
    /// | `IDEAS_MODEL`     | no       | `gpt-4.1-mini`               |
    /// | `DRAFT_MODEL`     | no       | `gpt-4.1`                    |
    /// | `REWRITE_MODEL`   | no       | `gpt-4.1-mini`               |
    /// | `IMAGE_MODEL`     | no       | `gpt-image-1`                |
    ///
    /// # Panics
    ///
    /// Panics if `OPENAI_API_KEY` is missing or empty, or the timeout is not a number.
    pub fn from_env() -> Self {
        let api_key =
            std::env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY must be set in the environment");
        assert!(!api_key.is_empty(), "OPENAI_API_KEY must not be empty");

        let base_url =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());

        let timeout_secs: u64 = std::env::var("AI_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("AI_TIMEOUT_SECS must be a valid u64");

        let model = |key: &str, default: &str| std::env::var(key).unwrap_or_else(|_| default.into());

        Self {
            api_key,
            base_url,
            timeout_secs,
            models: ModelConfig {
                ideas: model("IDEAS_MODEL", "gpt-4.1-mini"),
                draft: model("DRAFT_MODEL", "gpt-4.1"),
                rewrite: model("REWRITE_MODEL", "gpt-4.1-mini"),
                image: model("IMAGE_MODEL", "gpt-image-1"),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat<'a>>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    format_type: &'static str,
    json_schema: JsonSchemaFormat<'a>,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat<'a> {
    name: &'static str,
    strict: bool,
    schema: &'a serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'static str,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageDatum>,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    #[serde(default)]
    b64_json: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for one OpenAI-compatible backend.
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    models: ModelConfig,
}

impl OpenAiClient {
    /// Build a client with the configured per-call timeout.
    pub fn new(config: &OpenAiConfig) -> Result<Self, AiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            models: config.models.clone(),
        })
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or [`AiError::Api`] with the
    /// status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, AiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(AiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, AiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AiError> {
        let model = self.models.for_task(request.task);
        let body = ChatCompletionRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.instructions,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            response_format: request.json_schema.as_ref().map(|schema| ResponseFormat {
                format_type: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: "response",
                    strict: true,
                    schema,
                },
            }),
        };

        tracing::debug!(model, task = ?request.task, "Sending chat completion");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let completion: ChatCompletionResponse = Self::parse_response(response).await?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AiError::Parse("completion has no message content".to_string()))
    }
}

#[async_trait]
impl ImageGenerator for OpenAiClient {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, AiError> {
        let body = ImageRequest {
            model: &self.models.image,
            prompt,
            n: 1,
            size: IMAGE_SIZE,
        };

        tracing::debug!(model = %self.models.image, "Sending image generation");

        let response = self
            .client
            .post(format!("{}/images/generations", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let images: ImageResponse = Self::parse_response(response).await?;
        let datum = images
            .data
            .into_iter()
            .next()
            .ok_or_else(|| AiError::Parse("image response has no data".to_string()))?;

        if let Some(encoded) = datum.b64_json {
            let data = base64::engine::general_purpose::STANDARD
                .decode(encoded.as_bytes())
                .map_err(|e| AiError::Parse(format!("invalid base64 image: {e}")))?;
            return Ok(GeneratedImage::Bytes {
                data,
                content_type: "image/png".to_string(),
            });
        }

        datum
            .url
            .filter(|url| !url.trim().is_empty())
            .map(GeneratedImage::Url)
            .ok_or_else(|| AiError::Parse("image response has neither b64_json nor url".to_string()))
    }
}
