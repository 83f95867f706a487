//! Document response types.

use axum::http::header;
use axum::response::{IntoResponse, Response};
use jiff::Timestamp;
use lector_postgres::model;
use lector_postgres::types::DocumentStatus;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Returned when an upload is accepted for processing.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUploaded {
    /// Human-readable confirmation.
    pub message: String,
    /// ID of the new document.
    pub document_id: Uuid,
    /// Always `PROCESSING` at this point.
    pub status: DocumentStatus,
}

impl From<&model::Document> for DocumentUploaded {
    fn from(document: &model::Document) -> Self {
        Self {
            message: "File received and is being processed.".to_owned(),
            document_id: document.id,
            status: document.status,
        }
    }
}

/// A question asked about a document and the model's answer.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    /// ID of the interaction.
    pub interaction_id: Uuid,
    /// Question as submitted.
    pub prompt: String,
    /// Answer returned by the model.
    pub answer: String,
    /// Timestamp when the answer was recorded.
    pub timestamp: Timestamp,
}

impl From<model::DocumentInteraction> for Interaction {
    fn from(interaction: model::DocumentInteraction) -> Self {
        Self {
            interaction_id: interaction.id,
            prompt: interaction.prompt,
            answer: interaction.answer,
            timestamp: interaction.created_at.into(),
        }
    }
}

/// A document with its extracted text and interaction history.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// ID of the document.
    pub document_id: Uuid,
    /// Original file name.
    pub file_name: String,
    /// MIME type of the upload.
    pub content_type: String,
    /// Upload size in bytes.
    pub file_size: i64,
    /// Extraction status.
    pub status: DocumentStatus,
    /// Extracted text, present once the document is completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
    /// Why extraction failed, present once the document is failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    /// Questions asked about the document, oldest first.
    pub interactions: Vec<Interaction>,
    /// Timestamp when the document was uploaded.
    pub created_at: Timestamp,
    /// Timestamp of the last status change.
    pub updated_at: Timestamp,
}

impl Document {
    pub fn new(document: model::Document, interactions: Vec<model::DocumentInteraction>) -> Self {
        Self {
            document_id: document.id,
            file_name: document.file_name,
            content_type: document.content_type,
            file_size: document.file_size,
            status: document.status,
            extracted_text: document.extracted_text,
            failure_reason: document.failure_reason,
            interactions: interactions.into_iter().map(Into::into).collect(),
            created_at: document.created_at.into(),
            updated_at: document.updated_at.into(),
        }
    }
}

/// A document in a listing, without text or interactions.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    /// ID of the document.
    pub document_id: Uuid,
    /// Original file name.
    pub file_name: String,
    /// MIME type of the upload.
    pub content_type: String,
    /// Upload size in bytes.
    pub file_size: i64,
    /// Extraction status.
    pub status: DocumentStatus,
    /// Timestamp when the document was uploaded.
    pub created_at: Timestamp,
    /// Timestamp of the last status change.
    pub updated_at: Timestamp,
}

impl From<model::Document> for DocumentSummary {
    fn from(document: model::Document) -> Self {
        Self {
            document_id: document.id,
            file_name: document.file_name,
            content_type: document.content_type,
            file_size: document.file_size,
            status: document.status,
            created_at: document.created_at.into(),
            updated_at: document.updated_at.into(),
        }
    }
}

/// Response for listing the caller's documents.
pub type Documents = Vec<DocumentSummary>;

/// Answer to a question about a document.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueryAnswer {
    /// Answer returned by the model.
    pub answer: String,
    /// The stored interaction.
    pub interaction: Interaction,
}

impl From<model::DocumentInteraction> for QueryAnswer {
    fn from(interaction: model::DocumentInteraction) -> Self {
        Self {
            answer: interaction.answer.clone(),
            interaction: interaction.into(),
        }
    }
}

/// A rendered report sent as a file attachment.
#[must_use]
#[derive(Debug, Clone)]
pub struct ReportFile {
    /// Value of the `Content-Type` header.
    pub content_type: &'static str,
    /// File name offered to the client.
    pub file_name: String,
    /// Rendered report.
    pub body: Vec<u8>,
}

impl ReportFile {
    fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.file_name)
    }
}

impl IntoResponse for ReportFile {
    fn into_response(self) -> Response {
        let headers = [
            (header::CONTENT_TYPE, self.content_type.to_owned()),
            (header::CONTENT_DISPOSITION, self.content_disposition()),
        ];

        (headers, self.body).into_response()
    }
}

impl aide::OperationOutput for ReportFile {
    type Inner = Vec<u8>;
}

#[cfg(test)]
mod tests {
    use jiff_diesel::Timestamp as DbTimestamp;

    use super::*;

    fn model_document() -> model::Document {
        let now = DbTimestamp::from(Timestamp::now());
        model::Document {
            id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            file_name: "receipt.jpg".to_owned(),
            content_type: "image/jpeg".to_owned(),
            file_size: 1234,
            status: DocumentStatus::Processing,
            extracted_text: None,
            failure_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn uploaded_response_is_camel_case() {
        let document = model_document();
        let json = serde_json::to_value(DocumentUploaded::from(&document)).unwrap();

        assert_eq!(json["message"], "File received and is being processed.");
        assert_eq!(json["documentId"], document.id.to_string());
        assert_eq!(json["status"], "PROCESSING");
    }

    #[test]
    fn absent_text_is_omitted() {
        let json = serde_json::to_value(Document::new(model_document(), Vec::new())).unwrap();

        assert!(json.get("extractedText").is_none());
        assert!(json.get("failureReason").is_none());
        assert_eq!(json["interactions"], serde_json::json!([]));
        assert_eq!(json["fileSize"], 1234);
    }

    #[test]
    fn interactions_keep_order_and_timestamp() {
        let document = model_document();
        let interaction = model::DocumentInteraction {
            id: Uuid::new_v4(),
            document_id: document.id,
            prompt: "Total?".to_owned(),
            answer: "42".to_owned(),
            created_at: document.created_at,
        };

        let answer = QueryAnswer::from(interaction.clone());
        assert_eq!(answer.answer, "42");
        assert_eq!(answer.interaction.interaction_id, interaction.id);

        let response = Document::new(document, vec![interaction]);
        assert_eq!(response.interactions.len(), 1);
        assert_eq!(response.interactions[0].prompt, "Total?");
    }

    #[test]
    fn report_file_is_an_attachment() {
        let report = ReportFile {
            content_type: "application/pdf",
            file_name: "report-1.pdf".to_owned(),
            body: b"%PDF-1.5".to_vec(),
        };

        let response = report.into_response();
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"report-1.pdf\""
        );
    }
}
