//! Downloadable document reports.
//!
//! A report lists a document's metadata, its extracted text and every
//! question asked about it. Reports are rendered on request and never stored.

mod pdf;
mod text;

use lector_postgres::model::{Document, DocumentInteraction};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::utility::tracing_targets::TRACING_TARGET_REPORT as TRACING_TARGET;

/// Placeholder for documents without extracted text.
const NO_TEXT: &str = "No text extracted.";

/// Placeholder for documents nobody has asked about.
const NO_INTERACTIONS: &str = "No interactions recorded.";

/// File format of a downloaded report.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Plain UTF-8 text.
    #[default]
    Txt,
    /// PDF using the standard Type 1 fonts.
    Pdf,
}

impl ReportFormat {
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Txt => "text/plain; charset=utf-8",
            Self::Pdf => "application/pdf",
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Pdf => "pdf",
        }
    }
}

/// A document together with its interaction history, ready to render.
#[derive(Debug, Clone, Copy)]
pub struct DocumentReport<'a> {
    document: &'a Document,
    interactions: &'a [DocumentInteraction],
}

impl<'a> DocumentReport<'a> {
    pub fn new(document: &'a Document, interactions: &'a [DocumentInteraction]) -> Self {
        Self {
            document,
            interactions,
        }
    }

    /// Attachment name, e.g. `report-<document id>.pdf`.
    pub fn file_name(&self, format: ReportFormat) -> String {
        format!("report-{}.{}", self.document.id, format.extension())
    }

    /// Renders the report in the requested format.
    pub fn render(&self, format: ReportFormat) -> Result<Vec<u8>> {
        let bytes = match format {
            ReportFormat::Txt => text::render(self).into_bytes(),
            ReportFormat::Pdf => pdf::render(self)?,
        };

        tracing::debug!(
            target: TRACING_TARGET,
            document_id = %self.document.id,
            format = format.extension(),
            size = bytes.len(),
            interactions = self.interactions.len(),
            "report rendered"
        );

        Ok(bytes)
    }

    fn created_at(&self) -> String {
        self.document
            .created_at()
            .strftime("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
    }

    fn extracted_text(&self) -> &str {
        self.document
            .extracted_text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .unwrap_or(NO_TEXT)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use jiff_diesel::Timestamp;
    use lector_postgres::types::DocumentStatus;
    use uuid::Uuid;

    use super::*;

    pub(crate) fn document(status: DocumentStatus, text: Option<&str>) -> Document {
        let created_at: jiff::Timestamp = "2025-03-14T09:26:53Z".parse().unwrap();
        Document {
            id: Uuid::nil(),
            account_id: Uuid::new_v4(),
            file_name: "invoice.pdf".to_owned(),
            content_type: "application/pdf".to_owned(),
            file_size: 2048,
            status,
            extracted_text: text.map(str::to_owned),
            failure_reason: None,
            created_at: Timestamp::from(created_at),
            updated_at: Timestamp::from(created_at),
        }
    }

    pub(crate) fn interaction(prompt: &str, answer: &str) -> DocumentInteraction {
        DocumentInteraction {
            id: Uuid::new_v4(),
            document_id: Uuid::nil(),
            prompt: prompt.to_owned(),
            answer: answer.to_owned(),
            created_at: Timestamp::from(jiff::Timestamp::now()),
        }
    }

    #[test]
    fn formats_parse_from_lowercase() {
        let format: ReportFormat = serde_json::from_str("\"pdf\"").unwrap();
        assert_eq!(format, ReportFormat::Pdf);
        assert!(serde_json::from_str::<ReportFormat>("\"docx\"").is_err());
        assert_eq!(ReportFormat::default(), ReportFormat::Txt);
    }

    #[test]
    fn file_name_uses_document_id() {
        let document = document(DocumentStatus::Completed, Some("text"));
        let report = DocumentReport::new(&document, &[]);
        assert_eq!(
            report.file_name(ReportFormat::Txt),
            "report-00000000-0000-0000-0000-000000000000.txt"
        );
        assert!(report.file_name(ReportFormat::Pdf).ends_with(".pdf"));
    }

    #[test]
    fn every_format_renders() {
        let document = document(DocumentStatus::Failed, None);
        let report = DocumentReport::new(&document, &[]);
        for format in [ReportFormat::Txt, ReportFormat::Pdf] {
            assert!(!report.render(format).unwrap().is_empty());
        }
    }
}
