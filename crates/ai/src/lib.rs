//! Text and image generation for Posty.
//!
//! - [`generator`] -- the `TextGenerator` / `ImageGenerator` seams.
//! - [`openai`] -- OpenAI-compatible HTTP implementation of both.
//! - [`content`] -- idea, draft, rewrite, and image operations.

pub mod content;
pub mod error;
pub mod generator;
pub mod openai;

pub use error::AiError;
pub use generator::{CompletionRequest, GeneratedImage, ImageGenerator, TextGenerator, TextTask};
