//! Named database constraints, parsed from PostgreSQL error reports.

mod accounts;
mod document_interactions;
mod documents;

use std::fmt;

pub use self::accounts::AccountConstraints;
pub use self::document_interactions::DocumentInteractionConstraints;
pub use self::documents::DocumentConstraints;

/// Any constraint defined by the schema migrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintViolation {
    Account(AccountConstraints),
    Document(DocumentConstraints),
    DocumentInteraction(DocumentInteractionConstraints),
}

/// What kind of rule a constraint enforces.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConstraintCategory {
    /// Format, length and range checks.
    Validation,
    /// Ordering between timestamps.
    Chronological,
    /// Domain rules spanning several columns.
    BusinessLogic,
    /// Unique indexes.
    Uniqueness,
}

impl ConstraintViolation {
    /// Parses a constraint name as reported by PostgreSQL.
    ///
    /// ```
    /// use lector_postgres::types::{AccountConstraints, ConstraintViolation};
    ///
    /// let violation = ConstraintViolation::new("accounts_email_address_unique_idx");
    /// assert_eq!(
    ///     violation,
    ///     Some(ConstraintViolation::Account(AccountConstraints::EmailAddressUnique))
    /// );
    /// assert!(ConstraintViolation::new("unknown_constraint").is_none());
    /// ```
    pub fn new(constraint: &str) -> Option<Self> {
        if constraint.starts_with("accounts_") {
            AccountConstraints::new(constraint).map(Self::Account)
        } else if constraint.starts_with("documents_") {
            DocumentConstraints::new(constraint).map(Self::Document)
        } else if constraint.starts_with("document_interactions_") {
            DocumentInteractionConstraints::new(constraint).map(Self::DocumentInteraction)
        } else {
            None
        }
    }

    /// Returns the table the constraint is defined on.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConstraintViolation::Account(_) => "accounts",
            ConstraintViolation::Document(_) => "documents",
            ConstraintViolation::DocumentInteraction(_) => "document_interactions",
        }
    }

    pub fn constraint_category(&self) -> ConstraintCategory {
        match self {
            ConstraintViolation::Account(c) => c.categorize(),
            ConstraintViolation::Document(c) => c.categorize(),
            ConstraintViolation::DocumentInteraction(c) => c.categorize(),
        }
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintViolation::Account(c) => write!(f, "{c}"),
            ConstraintViolation::Document(c) => write!(f, "{c}"),
            ConstraintViolation::DocumentInteraction(c) => write!(f, "{c}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_by_table_prefix() {
        assert_eq!(
            ConstraintViolation::new("documents_file_size_range"),
            Some(ConstraintViolation::Document(DocumentConstraints::FileSizeRange))
        );
        assert_eq!(
            ConstraintViolation::new("document_interactions_prompt_length_max"),
            Some(ConstraintViolation::DocumentInteraction(
                DocumentInteractionConstraints::PromptLengthMax
            ))
        );
        assert_eq!(ConstraintViolation::new("documents_unknown"), None);
    }

    #[test]
    fn reports_table_and_category() {
        let violation = ConstraintViolation::Account(AccountConstraints::EmailAddressUnique);
        assert_eq!(violation.table_name(), "accounts");
        assert_eq!(violation.constraint_category(), ConstraintCategory::Uniqueness);

        let violation = ConstraintViolation::Document(DocumentConstraints::UpdatedAfterCreated);
        assert_eq!(violation.constraint_category(), ConstraintCategory::Chronological);
    }

    #[test]
    fn display_round_trips_through_new() {
        let name = "documents_text_only_when_completed";
        let violation = ConstraintViolation::new(name).expect("known constraint");
        assert_eq!(violation.to_string(), name);
        assert_eq!(
            violation.constraint_category(),
            ConstraintCategory::BusinessLogic
        );
    }
}
