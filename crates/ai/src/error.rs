/// Errors from the text and image generation backends.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("AI API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The backend answered with a body we could not interpret.
    #[error("Unexpected AI response: {0}")]
    Parse(String),

    /// Idea or draft generation produced nothing usable.
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// A rewrite call failed or returned empty text.
    #[error("Rewrite failed: {0}")]
    RewriteFailed(String),

    /// Image generation failed or returned no image.
    #[error("Image generation failed: {0}")]
    ImageGenerationFailed(String),
}
