//! Document request types.

use std::borrow::Cow;

use lector_postgres::types::constants::interaction::MAX_PROMPT_LENGTH;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::service::report::ReportFormat;

/// Request payload for asking a question about a document.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueryDocument {
    /// Question about the document, 1 to 4000 characters.
    #[validate(custom(function = "validate_prompt"))]
    pub prompt: String,
}

impl QueryDocument {
    /// Prompt without surrounding whitespace.
    #[inline]
    pub fn trimmed_prompt(&self) -> &str {
        self.prompt.trim()
    }
}

fn validate_prompt(prompt: &str) -> Result<(), ValidationError> {
    let length = prompt.trim().chars().count();
    if length == 0 || length > MAX_PROMPT_LENGTH {
        let message = format!("must be between 1 and {MAX_PROMPT_LENGTH} characters long");
        return Err(ValidationError::new("length").with_message(Cow::Owned(message)));
    }
    Ok(())
}

/// Query parameters for report downloads.
#[must_use]
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DownloadReport {
    /// Report format, `txt` when omitted.
    #[serde(default)]
    pub format: ReportFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_prompt_is_rejected() {
        let request = QueryDocument {
            prompt: "   \n".to_owned(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn prompt_length_is_counted_after_trimming() {
        let request = QueryDocument {
            prompt: format!("  {}  ", "a".repeat(MAX_PROMPT_LENGTH)),
        };
        assert!(request.validate().is_ok());
        assert_eq!(request.trimmed_prompt().len(), MAX_PROMPT_LENGTH);

        let request = QueryDocument {
            prompt: "a".repeat(MAX_PROMPT_LENGTH + 1),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn download_format_defaults_to_txt() {
        let query: DownloadReport = serde_json::from_str("{}").unwrap();
        assert_eq!(query.format, ReportFormat::Txt);

        let query: DownloadReport = serde_json::from_str(r#"{"format":"pdf"}"#).unwrap();
        assert_eq!(query.format, ReportFormat::Pdf);
    }
}
