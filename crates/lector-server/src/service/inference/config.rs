//! Language model configuration.

use std::fmt;
use std::time::Duration;

#[cfg(any(test, feature = "config"))]
use clap::Args;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Result};

const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const MAX_TIMEOUT_SECS: u64 = 600;

/// Gemini credentials, model names and request limits.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(any(test, feature = "config"), derive(Args))]
pub struct LlmConfig {
    /// Google AI Studio API key.
    #[cfg_attr(any(test, feature = "config"), arg(long, env = "GOOGLE_API_KEY"))]
    #[serde(skip_serializing)]
    pub google_api_key: String,

    /// Model answering questions about documents.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)
    )]
    pub gemini_model: String,

    /// Model transcribing uploaded images.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long, env = "GEMINI_OCR_MODEL", default_value = DEFAULT_MODEL)
    )]
    pub gemini_ocr_model: String,

    /// Base URL of the Generative Language REST API, used for image OCR.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)
    )]
    pub gemini_base_url: Url,

    /// Upper bound for a single model request, in seconds.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long, env = "LLM_TIMEOUT_SECS", default_value = "60")
    )]
    pub llm_timeout_secs: u64,
}

impl LlmConfig {
    /// Creates a configuration with the default models and endpoint.
    pub fn new(google_api_key: impl Into<String>) -> Result<Self> {
        let gemini_base_url = Url::parse(DEFAULT_BASE_URL)
            .map_err(|err| Error::config(format!("invalid default Gemini URL: {err}")))?;

        Ok(Self {
            google_api_key: google_api_key.into(),
            gemini_model: DEFAULT_MODEL.to_owned(),
            gemini_ocr_model: DEFAULT_MODEL.to_owned(),
            gemini_base_url,
            llm_timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    /// Checks that the key and model names are present and the timeout is sane.
    pub fn validate(&self) -> Result<()> {
        if self.google_api_key.trim().is_empty() {
            return Err(Error::config("GOOGLE_API_KEY must not be empty"));
        }

        if self.gemini_model.trim().is_empty() || self.gemini_ocr_model.trim().is_empty() {
            return Err(Error::config("Gemini model names must not be empty"));
        }

        if !matches!(self.gemini_base_url.scheme(), "http" | "https") {
            return Err(Error::config("GEMINI_BASE_URL must be an http(s) URL"));
        }

        if !(1..=MAX_TIMEOUT_SECS).contains(&self.llm_timeout_secs) {
            return Err(Error::config(format!(
                "LLM timeout must be between 1 and {MAX_TIMEOUT_SECS} seconds"
            )));
        }

        Ok(())
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("google_api_key", &"***")
            .field("gemini_model", &self.gemini_model)
            .field("gemini_ocr_model", &self.gemini_ocr_model)
            .field("gemini_base_url", &self.gemini_base_url.as_str())
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        llm: LlmConfig,
    }

    #[test]
    fn defaults_are_valid() {
        let config = LlmConfig::new("test-key").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.gemini_model, "gemini-1.5-flash");
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn empty_key_is_rejected() {
        let config = LlmConfig::new("  ").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn timeout_range_is_enforced() {
        let mut config = LlmConfig::new("test-key").unwrap();
        config.llm_timeout_secs = 0;
        assert!(config.validate().is_err());
        config.llm_timeout_secs = MAX_TIMEOUT_SECS + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn debug_redacts_key() {
        let config = LlmConfig::new("very-secret-key").unwrap();
        assert!(!format!("{config:?}").contains("very-secret-key"));
    }

    #[test]
    fn parses_from_arguments() {
        let cli = TestCli::try_parse_from([
            "lector",
            "--google-api-key",
            "test-key",
            "--gemini-model",
            "gemini-2.0-flash",
        ])
        .unwrap();

        assert_eq!(cli.llm.gemini_model, "gemini-2.0-flash");
        assert_eq!(cli.llm.gemini_ocr_model, DEFAULT_MODEL);
        assert_eq!(cli.llm.gemini_base_url.as_str(), "https://generativelanguage.googleapis.com/");
        assert_eq!(cli.llm.llm_timeout_secs, 60);
    }
}
