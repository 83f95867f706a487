//! Google Gemini provider.

use std::time::Duration;

use rig::completion::{AssistantContent, CompletionModel as RigCompletionModel};
use rig::one_or_many::OneOrMany;
use rig::prelude::CompletionClient;
use rig::providers::gemini;

use super::{InferenceProvider, LlmConfig, OcrClient};
use crate::{Error, Result};

const SERVICE: &str = "gemini";

/// Answers prompts with a rig Gemini completion model and reads images with
/// an [`OcrClient`].
pub struct GeminiProvider {
    model: gemini::completion::CompletionModel,
    model_name: String,
    ocr_client: OcrClient,
    timeout: Duration,
}

impl GeminiProvider {
    /// Creates the provider from a validated configuration.
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = gemini::Client::new(&config.google_api_key)
            .map_err(|err| Error::external(SERVICE, err.to_string()))?;

        Ok(Self {
            model: client.completion_model(config.gemini_model.as_str()),
            model_name: config.gemini_model.clone(),
            ocr_client: OcrClient::new(config)?,
            timeout: config.timeout(),
        })
    }

    #[inline]
    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[async_trait::async_trait]
impl InferenceProvider for GeminiProvider {
    async fn answer(&self, prompt: &str) -> Result<String> {
        let request = self.model.completion_request(prompt).send();
        let response = tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| Error::external(SERVICE, "completion request timed out"))?
            .map_err(|err| Error::external(SERVICE, err.to_string()))?;

        let answer = extract_text_content(&response.choice);
        if answer.trim().is_empty() {
            return Err(Error::external(SERVICE, "model returned an empty answer"));
        }

        Ok(answer)
    }

    async fn extract_image_text(&self, image: &[u8], media_type: &str) -> Result<String> {
        self.ocr_client.extract_text(image, media_type).await
    }
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("model_name", &self.model_name)
            .field("ocr_client", &self.ocr_client)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Joins the text parts of an assistant reply.
fn extract_text_content(choice: &OneOrMany<AssistantContent>) -> String {
    choice
        .iter()
        .filter_map(|content| match content {
            AssistantContent::Text(text) => Some(text.text()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("")
}
