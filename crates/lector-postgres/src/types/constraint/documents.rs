//! Documents table constraint violations.

use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Document table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Display, EnumIter, EnumString)]
pub enum DocumentConstraints {
    // Upload validation
    #[strum(serialize = "documents_file_name_not_empty")]
    FileNameNotEmpty,
    #[strum(serialize = "documents_file_name_length_max")]
    FileNameLengthMax,
    #[strum(serialize = "documents_content_type_supported")]
    ContentTypeSupported,
    #[strum(serialize = "documents_file_size_range")]
    FileSizeRange,

    // Lifecycle
    #[strum(serialize = "documents_text_only_when_completed")]
    TextOnlyWhenCompleted,

    #[strum(serialize = "documents_updated_after_created")]
    UpdatedAfterCreated,
}

impl DocumentConstraints {
    /// Creates a new [`DocumentConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            DocumentConstraints::FileNameNotEmpty
            | DocumentConstraints::FileNameLengthMax
            | DocumentConstraints::ContentTypeSupported
            | DocumentConstraints::FileSizeRange => ConstraintCategory::Validation,
            DocumentConstraints::TextOnlyWhenCompleted => ConstraintCategory::BusinessLogic,
            DocumentConstraints::UpdatedAfterCreated => ConstraintCategory::Chronological,
        }
    }
}
