//! Language model access for answering questions and reading images.
//!
//! Handlers and the background extractor talk to an [`InferenceService`],
//! which wraps any [`InferenceProvider`] with timing and logging. The
//! production provider is [`GeminiProvider`]; tests use `MockProvider`.

mod config;
mod gemini;
#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
mod mock;
mod ocr_client;
mod prompt;
mod service;

pub use config::LlmConfig;
pub use gemini::GeminiProvider;
#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub use mock::MockProvider;
pub use ocr_client::OcrClient;
pub use prompt::build_prompt;
pub use service::InferenceService;

use crate::Result;

/// Backend able to answer prompts and transcribe images.
#[async_trait::async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Sends a single-turn prompt and returns the model's text answer.
    async fn answer(&self, prompt: &str) -> Result<String>;

    /// Returns the text visible in an image.
    ///
    /// `media_type` is the image's MIME type, e.g. `image/png`.
    async fn extract_image_text(&self, image: &[u8], media_type: &str) -> Result<String>;
}
