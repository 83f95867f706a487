use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::document_interactions;

/// A question asked about a document and the answer it received.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = document_interactions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DocumentInteraction {
    pub id: Uuid,
    pub document_id: Uuid,
    pub prompt: String,
    pub answer: String,
    /// When the answer was recorded.
    pub created_at: Timestamp,
}

#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = document_interactions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewDocumentInteraction {
    pub document_id: Uuid,
    pub prompt: String,
    pub answer: String,
}

impl DocumentInteraction {
    #[inline]
    pub fn created_at(&self) -> jiff::Timestamp {
        jiff::Timestamp::from(self.created_at)
    }
}
