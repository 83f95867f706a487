//! Constraints on the `accounts` table.

use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Checks and indexes that can reject an account insert.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Display, EnumIter, EnumString)]
pub enum AccountConstraints {
    #[strum(serialize = "accounts_email_length_max")]
    EmailLengthMax,
    #[strum(serialize = "accounts_email_format")]
    EmailFormat,
    #[strum(serialize = "accounts_password_hash_not_empty")]
    PasswordHashNotEmpty,
    #[strum(serialize = "accounts_updated_after_created")]
    UpdatedAfterCreated,

    /// Case-insensitive, on `lower(email_address)`.
    #[strum(serialize = "accounts_email_address_unique_idx")]
    EmailAddressUnique,
}

impl AccountConstraints {
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            Self::EmailAddressUnique => ConstraintCategory::Uniqueness,
            Self::UpdatedAfterCreated => ConstraintCategory::Chronological,
            Self::EmailLengthMax | Self::EmailFormat | Self::PasswordHashNotEmpty => {
                ConstraintCategory::Validation
            }
        }
    }
}
