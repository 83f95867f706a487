//! Document status enumeration for the text extraction lifecycle.

use diesel_derive_enum::DbEnum;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Where a document is in its text extraction lifecycle.
///
/// Corresponds to the `document_status` PostgreSQL enum. A document starts in
/// [`Processing`] and moves exactly once to [`Completed`] or [`Failed`].
///
/// [`Processing`]: DocumentStatus::Processing
/// [`Completed`]: DocumentStatus::Completed
/// [`Failed`]: DocumentStatus::Failed
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::DocumentStatus"]
pub enum DocumentStatus {
    /// Text extraction is queued or running.
    #[db_rename = "processing"]
    #[serde(rename = "PROCESSING")]
    #[strum(serialize = "PROCESSING")]
    #[default]
    Processing,

    /// Text was extracted and the document can be queried.
    #[db_rename = "completed"]
    #[serde(rename = "COMPLETED")]
    #[strum(serialize = "COMPLETED")]
    Completed,

    /// Extraction failed or produced no text.
    #[db_rename = "failed"]
    #[serde(rename = "FAILED")]
    #[strum(serialize = "FAILED")]
    Failed,
}

impl DocumentStatus {
    #[inline]
    pub fn is_processing(self) -> bool {
        matches!(self, DocumentStatus::Processing)
    }

    #[inline]
    pub fn is_completed(self) -> bool {
        matches!(self, DocumentStatus::Completed)
    }

    #[inline]
    pub fn is_failed(self) -> bool {
        matches!(self, DocumentStatus::Failed)
    }

    /// Returns whether no further transition is possible.
    #[inline]
    pub fn is_final(self) -> bool {
        !self.is_processing()
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn display_matches_wire_format() {
        for status in DocumentStatus::iter() {
            let json = serde_json::to_string(&status).expect("status serializes");
            assert_eq!(json, format!("\"{status}\""));
        }
    }

    #[test]
    fn only_processing_is_not_final() {
        assert!(!DocumentStatus::Processing.is_final());
        assert!(DocumentStatus::Completed.is_final());
        assert!(DocumentStatus::Failed.is_final());
        assert_eq!(DocumentStatus::default(), DocumentStatus::Processing);
    }

    #[test]
    fn parses_from_uppercase() {
        assert_eq!("FAILED".parse::<DocumentStatus>().ok(), Some(DocumentStatus::Failed));
        assert!("failed".parse::<DocumentStatus>().is_err());
    }
}
