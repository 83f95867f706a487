//! Interaction repository for prompts and answers.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{DocumentInteraction, NewDocumentInteraction};
use crate::{PgConnection, PgError, PgResult, schema};

pub trait DocumentInteractionRepository {
    /// Appends an interaction to a document's history.
    fn create_document_interaction(
        &mut self,
        new_interaction: NewDocumentInteraction,
    ) -> impl Future<Output = PgResult<DocumentInteraction>> + Send;

    /// Lists a document's interactions in the order they were recorded.
    fn list_document_interactions(
        &mut self,
        document_id: Uuid,
    ) -> impl Future<Output = PgResult<Vec<DocumentInteraction>>> + Send;
}

impl DocumentInteractionRepository for PgConnection {
    async fn create_document_interaction(
        &mut self,
        new_interaction: NewDocumentInteraction,
    ) -> PgResult<DocumentInteraction> {
        use schema::document_interactions;

        diesel::insert_into(document_interactions::table)
            .values(&new_interaction)
            .returning(DocumentInteraction::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn list_document_interactions(
        &mut self,
        document_id: Uuid,
    ) -> PgResult<Vec<DocumentInteraction>> {
        use schema::document_interactions::{self, dsl};

        document_interactions::table
            .filter(dsl::document_id.eq(document_id))
            .order((dsl::created_at.asc(), dsl::id.asc()))
            .select(DocumentInteraction::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }
}
