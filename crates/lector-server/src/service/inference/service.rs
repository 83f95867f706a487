//! Provider wrapper with request logging.

use std::fmt;
use std::sync::Arc;

use jiff::Timestamp;

use super::{GeminiProvider, InferenceProvider, LlmConfig};
use crate::Result;
use crate::utility::tracing_targets::TRACING_TARGET_INFERENCE as TRACING_TARGET;

/// Shared handle to an [`InferenceProvider`] that logs every call.
#[derive(Clone)]
pub struct InferenceService {
    provider: Arc<dyn InferenceProvider>,
}

impl fmt::Debug for InferenceService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceService").finish_non_exhaustive()
    }
}

impl InferenceService {
    pub fn from_provider<P>(provider: P) -> Self
    where
        P: InferenceProvider + 'static,
    {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Validates `config` and connects a [`GeminiProvider`].
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        config.validate()?;
        let provider = GeminiProvider::new(config)?;

        tracing::info!(
            target: TRACING_TARGET,
            model = provider.model_name(),
            ocr_model = %config.gemini_ocr_model,
            "language model provider configured"
        );

        Ok(Self::from_provider(provider))
    }

    /// Asks the model a single-turn question.
    pub async fn answer(&self, prompt: &str) -> Result<String> {
        let started_at = Timestamp::now();

        tracing::debug!(
            target: TRACING_TARGET,
            prompt_len = prompt.len(),
            "Processing completion request"
        );

        let result = self.provider.answer(prompt).await;
        let elapsed = Timestamp::now().duration_since(started_at);

        match &result {
            Ok(answer) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    answer_len = answer.len(),
                    elapsed_ms = elapsed.as_millis(),
                    "Completion successful"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Completion failed"
                );
            }
        }

        result
    }

    /// Transcribes the text in an image.
    pub async fn extract_image_text(&self, image: &[u8], media_type: &str) -> Result<String> {
        let started_at = Timestamp::now();

        tracing::debug!(
            target: TRACING_TARGET,
            image_size = image.len(),
            media_type,
            "Processing OCR request"
        );

        let result = self.provider.extract_image_text(image, media_type).await;
        let elapsed = Timestamp::now().duration_since(started_at);

        match &result {
            Ok(text) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    text_len = text.len(),
                    elapsed_ms = elapsed.as_millis(),
                    "OCR successful"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "OCR failed"
                );
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::inference::MockProvider;

    #[tokio::test]
    async fn answers_come_from_provider() {
        let provider = MockProvider::new().with_answer("The total is 42.");
        let service = InferenceService::from_provider(provider.clone());

        let answer = service.answer("What is the total?").await.unwrap();
        assert_eq!(answer, "The total is 42.");
        assert_eq!(provider.prompts(), vec!["What is the total?".to_owned()]);
    }

    #[tokio::test]
    async fn provider_errors_are_returned() {
        let service = InferenceService::from_provider(MockProvider::new().unavailable());
        assert!(service.answer("hello").await.is_err());
        assert!(service.extract_image_text(b"img", "image/png").await.is_err());
    }

    #[tokio::test]
    async fn image_text_comes_from_provider() {
        let service =
            InferenceService::from_provider(MockProvider::new().with_image_text("RECEIPT"));
        let text = service.extract_image_text(b"img", "image/jpeg").await.unwrap();
        assert_eq!(text, "RECEIPT");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = LlmConfig::new("").unwrap();
        assert!(InferenceService::from_config(&config).is_err());
    }
}
