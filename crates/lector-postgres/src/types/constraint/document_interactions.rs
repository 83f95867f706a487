//! Document interactions table constraint violations.

use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Display, EnumIter, EnumString)]
pub enum DocumentInteractionConstraints {
    #[strum(serialize = "document_interactions_prompt_not_empty")]
    PromptNotEmpty,
    #[strum(serialize = "document_interactions_prompt_length_max")]
    PromptLengthMax,
}

impl DocumentInteractionConstraints {
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    pub fn categorize(&self) -> ConstraintCategory {
        ConstraintCategory::Validation
    }
}
