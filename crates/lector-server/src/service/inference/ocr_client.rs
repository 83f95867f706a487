//! Image transcription through the Gemini `generateContent` REST endpoint.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use super::LlmConfig;
use crate::utility::tracing_targets::TRACING_TARGET_INFERENCE as TRACING_TARGET;
use crate::{Error, Result};

const SERVICE: &str = "gemini-ocr";
const USER_AGENT: &str = concat!("lector/", env!("CARGO_PKG_VERSION"));

/// Instruction sent alongside every image.
const OCR_INSTRUCTION: &str = "Transcribe all text visible in this image exactly as written. \
    Keep the original line breaks and reading order. Reply with the transcribed text only, \
    without commentary or formatting. If the image contains no text, reply with an empty message.";

/// HTTP client for image OCR with a multimodal Gemini model.
#[derive(Clone)]
pub struct OcrClient {
    http_client: Client,
    endpoint: Url,
    api_key: String,
}

impl OcrClient {
    /// Creates a client for the OCR model named in `config`.
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let endpoint = Self::endpoint(&config.gemini_base_url, &config.gemini_ocr_model)?;
        let http_client = Client::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| Error::config(format!("failed to build HTTP client: {err}")))?;

        tracing::debug!(
            target: TRACING_TARGET,
            model = %config.gemini_ocr_model,
            timeout = ?config.timeout(),
            "OCR client initialized"
        );

        Ok(Self {
            http_client,
            endpoint,
            api_key: config.google_api_key.clone(),
        })
    }

    fn endpoint(base_url: &Url, model: &str) -> Result<Url> {
        let base = base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/v1beta/models/{model}:generateContent"))
            .map_err(|err| Error::config(format!("invalid Gemini endpoint: {err}")))
    }

    /// Sends the image to the model and returns the transcribed text.
    pub async fn extract_text(&self, image: &[u8], media_type: &str) -> Result<String> {
        let request = GenerateContentRequest::for_image(image, media_type);

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| Error::external(SERVICE, err.to_string()).with_source(err))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            tracing::warn!(
                target: TRACING_TARGET,
                status = status.as_u16(),
                body = %body,
                "OCR request rejected"
            );
            return Err(Error::external(
                SERVICE,
                format!("request failed with status {status}"),
            ));
        }

        let response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| Error::external(SERVICE, err.to_string()).with_source(err))?;

        response.into_text()
    }
}

impl std::fmt::Debug for OcrClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OcrClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum RequestPart {
    InlineData { mime_type: String, data: String },
    Text(String),
}

impl GenerateContentRequest {
    fn for_image(image: &[u8], media_type: &str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![
                    RequestPart::InlineData {
                        mime_type: media_type.to_owned(),
                        data: BASE64.encode(image),
                    },
                    RequestPart::Text(OCR_INSTRUCTION.to_owned()),
                ],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Joins the text parts of the first candidate.
    fn into_text(self) -> Result<String> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(Error::external(
                SERVICE,
                format!("image was blocked by the model: {reason}"),
            ));
        }

        let Some(content) = self.candidates.into_iter().next().and_then(|c| c.content) else {
            return Err(Error::external(SERVICE, "model returned no candidates"));
        };

        Ok(content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect::<Vec<_>>()
            .join(""))
    }
}
