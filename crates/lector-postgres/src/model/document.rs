//! Document model tracking an upload through text extraction.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::documents;
use crate::types::DocumentStatus;

/// An uploaded file and the text extracted from it.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Document {
    /// Unique document identifier.
    pub id: Uuid,
    /// Account that uploaded the document.
    pub account_id: Uuid,
    /// Sanitized original file name.
    pub file_name: String,
    /// One of the supported MIME types.
    pub content_type: String,
    /// Upload size in bytes.
    pub file_size: i64,
    /// Extraction lifecycle state.
    pub status: DocumentStatus,
    /// Extracted text, present only when completed.
    pub extracted_text: Option<String>,
    /// Why extraction failed, present only when failed.
    pub failure_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Data for creating a new document. Status defaults to processing.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewDocument {
    pub account_id: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub file_size: i64,
}

/// Data for moving a document out of processing.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateDocument {
    pub status: Option<DocumentStatus>,
    pub extracted_text: Option<Option<String>>,
    pub failure_reason: Option<Option<String>>,
}

impl UpdateDocument {
    /// Marks the document completed with the given text.
    pub fn completed(extracted_text: impl Into<String>) -> Self {
        Self {
            status: Some(DocumentStatus::Completed),
            extracted_text: Some(Some(extracted_text.into())),
            failure_reason: Some(None),
        }
    }

    /// Marks the document failed and clears any text.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            status: Some(DocumentStatus::Failed),
            extracted_text: Some(None),
            failure_reason: Some(Some(reason.into())),
        }
    }
}

impl Document {
    /// Returns whether `account_id` uploaded this document.
    #[inline]
    pub fn is_owned_by(&self, account_id: Uuid) -> bool {
        self.account_id == account_id
    }

    /// Returns the extracted text if the document can be queried.
    pub fn queryable_text(&self) -> Option<&str> {
        if !self.status.is_completed() {
            return None;
        }

        self.extracted_text.as_deref().filter(|t| !t.trim().is_empty())
    }

    #[inline]
    pub fn created_at(&self) -> jiff::Timestamp {
        jiff::Timestamp::from(self.created_at)
    }

    #[inline]
    pub fn updated_at(&self) -> jiff::Timestamp {
        jiff::Timestamp::from(self.updated_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(status: DocumentStatus, text: Option<&str>) -> Document {
        let now = Timestamp::from(jiff::Timestamp::now());
        Document {
            id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            file_name: "scan.png".to_owned(),
            content_type: "image/png".to_owned(),
            file_size: 1024,
            status,
            extracted_text: text.map(str::to_owned),
            failure_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn only_completed_documents_are_queryable() {
        assert_eq!(
            document(DocumentStatus::Completed, Some("invoice total 42")).queryable_text(),
            Some("invoice total 42")
        );
        assert_eq!(document(DocumentStatus::Processing, None).queryable_text(), None);
        assert_eq!(document(DocumentStatus::Failed, None).queryable_text(), None);
        assert_eq!(document(DocumentStatus::Completed, Some("  ")).queryable_text(), None);
    }

    #[test]
    fn ownership_check() {
        let doc = document(DocumentStatus::Processing, None);
        assert!(doc.is_owned_by(doc.account_id));
        assert!(!doc.is_owned_by(Uuid::new_v4()));
    }

    #[test]
    fn terminal_updates_are_exclusive() {
        let done = UpdateDocument::completed("text");
        assert_eq!(done.status, Some(DocumentStatus::Completed));
        assert_eq!(done.failure_reason, Some(None));

        let failed = UpdateDocument::failed("no text");
        assert_eq!(failed.status, Some(DocumentStatus::Failed));
        assert_eq!(failed.extracted_text, Some(None));
    }
}
