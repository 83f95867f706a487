//! In-memory provider for tests.
//!
//! Available under `cfg(test)` and with the `test-utils` feature.

use std::sync::{Arc, Mutex};

use super::{InferenceProvider, InferenceService};
use crate::{Error, Result};

/// Provider returning canned text, optionally failing every call.
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    answer: Option<String>,
    image_text: Option<String>,
    unavailable: bool,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer returned for every prompt.
    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        self.answer = Some(answer.into());
        self
    }

    /// Text returned for every image.
    pub fn with_image_text(mut self, text: impl Into<String>) -> Self {
        self.image_text = Some(text.into());
        self
    }

    /// Makes every call fail as if the model were unreachable.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable {
            return Err(Error::external("mock", "language model unavailable"));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl InferenceProvider for MockProvider {
    async fn answer(&self, prompt: &str) -> Result<String> {
        self.check_available()?;
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_owned());
        }

        Ok(self
            .answer
            .clone()
            .unwrap_or_else(|| format!("Mock answer for a {}-character prompt.", prompt.len())))
    }

    async fn extract_image_text(&self, image: &[u8], _media_type: &str) -> Result<String> {
        self.check_available()?;
        Ok(self
            .image_text
            .clone()
            .unwrap_or_else(|| format!("Mock text for a {}-byte image.", image.len())))
    }
}

impl InferenceService {
    /// Creates a service backed by a default [`MockProvider`].
    pub fn mock() -> Self {
        Self::from_provider(MockProvider::new())
    }
}
