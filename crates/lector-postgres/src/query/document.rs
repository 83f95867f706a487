//! Document repository covering upload, extraction results and listing.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use super::Pagination;
use crate::model::{Document, NewDocument, UpdateDocument};
use crate::types::DocumentStatus;
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for document database operations.
pub trait DocumentRepository {
    /// Inserts a document in the processing state.
    fn create_document(
        &mut self,
        new_document: NewDocument,
    ) -> impl Future<Output = PgResult<Document>> + Send;

    fn find_document_by_id(
        &mut self,
        document_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Document>>> + Send;

    /// Lists documents uploaded by an account, newest first.
    fn list_account_documents(
        &mut self,
        account_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<Document>>> + Send;

    /// Stores extracted text and marks the document completed.
    ///
    /// Only applies to documents still processing; returns `None` otherwise.
    fn complete_document(
        &mut self,
        document_id: Uuid,
        extracted_text: String,
    ) -> impl Future<Output = PgResult<Option<Document>>> + Send;

    /// Records a failure reason and marks the document failed.
    ///
    /// Only applies to documents still processing; returns `None` otherwise.
    fn fail_document(
        &mut self,
        document_id: Uuid,
        reason: String,
    ) -> impl Future<Output = PgResult<Option<Document>>> + Send;

    /// Fails every document still processing and returns how many were updated.
    ///
    /// Used at startup, before any extraction task for this process exists.
    fn fail_stale_documents(
        &mut self,
        reason: &str,
    ) -> impl Future<Output = PgResult<usize>> + Send;
}

impl DocumentRepository for PgConnection {
    async fn create_document(&mut self, new_document: NewDocument) -> PgResult<Document> {
        use schema::documents;

        diesel::insert_into(documents::table)
            .values(&new_document)
            .returning(Document::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_document_by_id(&mut self, document_id: Uuid) -> PgResult<Option<Document>> {
        use schema::documents::{self, dsl};

        documents::table
            .filter(dsl::id.eq(document_id))
            .select(Document::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn list_account_documents(
        &mut self,
        account_id: Uuid,
        pagination: Pagination,
    ) -> PgResult<Vec<Document>> {
        use schema::documents::{self, dsl};

        documents::table
            .filter(dsl::account_id.eq(account_id))
            .order((dsl::created_at.desc(), dsl::id.desc()))
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(Document::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn complete_document(
        &mut self,
        document_id: Uuid,
        extracted_text: String,
    ) -> PgResult<Option<Document>> {
        use schema::documents::{self, dsl};

        diesel::update(
            documents::table
                .filter(dsl::id.eq(document_id))
                .filter(dsl::status.eq(DocumentStatus::Processing)),
        )
        .set(&UpdateDocument::completed(extracted_text))
        .returning(Document::as_returning())
        .get_result(self)
        .await
        .optional()
        .map_err(PgError::from)
    }

    async fn fail_document(
        &mut self,
        document_id: Uuid,
        reason: String,
    ) -> PgResult<Option<Document>> {
        use schema::documents::{self, dsl};

        diesel::update(
            documents::table
                .filter(dsl::id.eq(document_id))
                .filter(dsl::status.eq(DocumentStatus::Processing)),
        )
        .set(&UpdateDocument::failed(reason))
        .returning(Document::as_returning())
        .get_result(self)
        .await
        .optional()
        .map_err(PgError::from)
    }

    async fn fail_stale_documents(&mut self, reason: &str) -> PgResult<usize> {
        use schema::documents::{self, dsl};

        diesel::update(documents::table.filter(dsl::status.eq(DocumentStatus::Processing)))
            .set(&UpdateDocument::failed(reason))
            .execute(self)
            .await
            .map_err(PgError::from)
    }
}
