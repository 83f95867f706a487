//! Document upload, retrieval, question answering and report download.
//!
//! Every route requires a bearer token, and a document is only visible to
//! the account that uploaded it. Uploads return as soon as the row exists;
//! text extraction continues in the background.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use lector_postgres::model::{self, NewDocument, NewDocumentInteraction};
use lector_postgres::query::{DocumentInteractionRepository, DocumentRepository};
use lector_postgres::types::constants::document::MAX_FILE_SIZE;
use lector_postgres::{PgClient, PgConn};
use uuid::Uuid;
use validator::Validate;

use crate::extract::{AuthState, Json, Multipart, Path, PgPool, Query, ValidateJson};
use crate::handler::request::{DocumentPathParams, DownloadReport, Pagination, QueryDocument};
use crate::handler::response::{
    Document, DocumentSummary, DocumentUploaded, Documents, ErrorResponse, QueryAnswer, ReportFile,
};
use crate::handler::{ErrorKind, Result};
use crate::service::extraction::{MediaType, sanitize_file_name};
use crate::service::inference::build_prompt;
use crate::service::report::DocumentReport;
use crate::service::{DocumentExtractor, InferenceService, ServiceState};

/// Tracing target for document operations.
const TRACING_TARGET: &str = "lector_server::handler::documents";

/// Multipart field that carries the upload.
const FILE_FIELD: &str = "file";

/// Finds a document and checks that `account_id` uploaded it.
async fn find_owned_document(
    conn: &mut PgConn,
    document_id: Uuid,
    account_id: Uuid,
) -> Result<model::Document> {
    let Some(document) = conn.find_document_by_id(document_id).await? else {
        tracing::debug!(target: TRACING_TARGET, "document not found");
        return Err(ErrorKind::NotFound
            .with_message("Document not found.")
            .with_resource("document"));
    };

    if !document.is_owned_by(account_id) {
        tracing::warn!(
            target: TRACING_TARGET,
            owner_id = %document.account_id,
            "access to another account's document"
        );
        return Err(ErrorKind::Forbidden
            .with_message("You do not have access to this document.")
            .with_resource("document"));
    }

    Ok(document)
}

/// Accepts a document and queues its text extraction.
#[tracing::instrument(skip_all, fields(account_id = %auth_state.account_id))]
async fn upload_document(
    State(pg_client): State<PgClient>,
    State(extractor): State<DocumentExtractor>,
    AuthState(auth_state): AuthState,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<DocumentUploaded>)> {
    let Some(upload) = multipart.read_file(FILE_FIELD, MAX_FILE_SIZE as usize).await? else {
        return Err(ErrorKind::BadRequest
            .with_message("No file uploaded.")
            .with_context("Send the document in the `file` form field"));
    };

    if upload.bytes.is_empty() {
        return Err(ErrorKind::BadRequest
            .with_message("The uploaded file is empty.")
            .with_resource("document"));
    }

    let Some(media_type) = MediaType::resolve(upload.content_type.as_deref(), &upload.bytes)
    else {
        tracing::debug!(
            target: TRACING_TARGET,
            declared_type = ?upload.content_type,
            "unsupported upload type"
        );
        return Err(ErrorKind::UnsupportedMediaType
            .with_message("Only PDF, JPEG and PNG files are supported.")
            .with_resource("document"));
    };

    let file_size = upload.bytes.len() as i64;
    let new_document = NewDocument {
        account_id: auth_state.account_id,
        file_name: sanitize_file_name(upload.file_name.as_deref()),
        content_type: media_type.as_str().to_owned(),
        file_size,
    };

    let mut conn = pg_client.get_connection().await?;
    let document = conn.create_document(new_document).await?;
    drop(conn);

    extractor.spawn(document.id, upload.bytes.freeze(), media_type);

    tracing::info!(
        target: TRACING_TARGET,
        document_id = %document.id,
        media_type = %media_type,
        file_size,
        "document accepted"
    );

    Ok((StatusCode::ACCEPTED, Json(DocumentUploaded::from(&document))))
}

fn upload_document_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Upload document")
        .description(
            "Uploads a PDF, JPEG or PNG file of at most 5 MB in the `file` form field. \
             Text extraction runs in the background; poll the document until its status \
             is COMPLETED or FAILED.",
        )
        .response::<202, Json<DocumentUploaded>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<413, Json<ErrorResponse>>()
        .response::<415, Json<ErrorResponse>>()
}

/// Returns a document with its extracted text and interactions.
#[tracing::instrument(
    skip_all,
    fields(
        account_id = %auth_state.account_id,
        document_id = %path_params.document_id,
    )
)]
async fn get_document(
    AuthState(auth_state): AuthState,
    PgPool(mut conn): PgPool,
    Path(path_params): Path<DocumentPathParams>,
) -> Result<(StatusCode, Json<Document>)> {
    let document =
        find_owned_document(&mut conn, path_params.document_id, auth_state.account_id).await?;
    let interactions = conn.list_document_interactions(document.id).await?;

    tracing::debug!(
        target: TRACING_TARGET,
        status = %document.status,
        interaction_count = interactions.len(),
        "document read"
    );

    Ok((StatusCode::OK, Json(Document::new(document, interactions))))
}

fn get_document_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get document")
        .description("Returns the document status, extracted text and question history.")
        .response::<200, Json<Document>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Lists the caller's documents, newest first.
#[tracing::instrument(skip_all, fields(account_id = %auth_state.account_id))]
async fn list_documents(
    AuthState(auth_state): AuthState,
    PgPool(mut conn): PgPool,
    Query(pagination): Query<Pagination>,
) -> Result<(StatusCode, Json<Documents>)> {
    pagination.validate()?;

    let documents = conn
        .list_account_documents(auth_state.account_id, pagination.into())
        .await?;

    tracing::debug!(
        target: TRACING_TARGET,
        document_count = documents.len(),
        "documents listed"
    );

    let response: Documents = documents.into_iter().map(DocumentSummary::from).collect();
    Ok((StatusCode::OK, Json(response)))
}

fn list_documents_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List documents")
        .description("Lists documents uploaded by the caller with offset pagination.")
        .response::<200, Json<Documents>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
}

/// Answers a question about a document and records the exchange.
#[tracing::instrument(
    skip_all,
    fields(
        account_id = %auth_state.account_id,
        document_id = %path_params.document_id,
    )
)]
async fn query_document(
    State(pg_client): State<PgClient>,
    State(inference): State<InferenceService>,
    AuthState(auth_state): AuthState,
    Path(path_params): Path<DocumentPathParams>,
    ValidateJson(request): ValidateJson<QueryDocument>,
) -> Result<(StatusCode, Json<QueryAnswer>)> {
    let document = {
        let mut conn = pg_client.get_connection().await?;
        find_owned_document(&mut conn, path_params.document_id, auth_state.account_id).await?
    };

    let Some(extracted_text) = document.queryable_text() else {
        tracing::debug!(
            target: TRACING_TARGET,
            status = %document.status,
            "document has no queryable text"
        );
        return Err(ErrorKind::NotFound
            .with_message("Document text has not been extracted yet or processing failed.")
            .with_resource("document"));
    };

    let prompt = request.trimmed_prompt();
    let answer = inference
        .answer(&build_prompt(extracted_text, prompt))
        .await
        .map_err(|error| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %error,
                "language model request failed"
            );
            ErrorKind::ServiceUnavailable.with_message("The language model is unavailable")
        })?;

    let new_interaction = NewDocumentInteraction {
        document_id: document.id,
        prompt: prompt.to_owned(),
        answer,
    };

    let mut conn = pg_client.get_connection().await?;
    let interaction = conn.create_document_interaction(new_interaction).await?;

    tracing::info!(
        target: TRACING_TARGET,
        interaction_id = %interaction.id,
        answer_len = interaction.answer.len(),
        "question answered"
    );

    Ok((StatusCode::OK, Json(QueryAnswer::from(interaction))))
}

fn query_document_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Ask a question")
        .description(
            "Sends the extracted text and the question to the language model and stores \
             the answer in the document history. Only completed documents can be queried.",
        )
        .response::<200, Json<QueryAnswer>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
        .response::<503, Json<ErrorResponse>>()
}

/// Renders a report of a document and its interactions.
#[tracing::instrument(
    skip_all,
    fields(
        account_id = %auth_state.account_id,
        document_id = %path_params.document_id,
        format = ?query.format,
    )
)]
async fn download_report(
    AuthState(auth_state): AuthState,
    PgPool(mut conn): PgPool,
    Path(path_params): Path<DocumentPathParams>,
    Query(query): Query<DownloadReport>,
) -> Result<ReportFile> {
    let document =
        find_owned_document(&mut conn, path_params.document_id, auth_state.account_id).await?;
    let interactions = conn.list_document_interactions(document.id).await?;
    drop(conn);

    let report = DocumentReport::new(&document, &interactions);
    let body = report.render(query.format).map_err(|error| {
        tracing::error!(
            target: TRACING_TARGET,
            error = %error,
            "report rendering failed"
        );
        ErrorKind::InternalServerError
            .with_message("The report could not be generated")
            .with_resource("report")
    })?;

    tracing::debug!(
        target: TRACING_TARGET,
        size = body.len(),
        "report rendered"
    );

    Ok(ReportFile {
        content_type: query.format.content_type(),
        file_name: report.file_name(query.format),
        body,
    })
}

fn download_report_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Download report")
        .description(
            "Returns the extracted text and question history as a plain text or PDF \
             attachment. Use `format=txt` (default) or `format=pdf`.",
        )
        .response_with::<200, (), _>(|res| res.description("The report file."))
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Returns a [`Router`] with all document routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route(
            "/documents/upload",
            post_with(upload_document, upload_document_docs),
        )
        .api_route("/documents", get_with(list_documents, list_documents_docs))
        .api_route(
            "/documents/{documentId}",
            get_with(get_document, get_document_docs),
        )
        .api_route(
            "/documents/{documentId}/query",
            post_with(query_document, query_document_docs),
        )
        .api_route(
            "/documents/{documentId}/download",
            get_with(download_report, download_report_docs),
        )
        .with_path_items(|item| item.tag("Documents"))
}

#[cfg(test)]
mod tests {
    use axum_test::multipart::{MultipartForm, Part};
    use serde_json::json;

    use super::*;
    use crate::handler::test::create_test_server_with_router;

    #[tokio::test]
    async fn routes_require_a_token() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes())?;
        let document_id = Uuid::new_v4();

        server
            .get("/documents")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        server
            .get(&format!("/documents/{document_id}"))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        server
            .get(&format!("/documents/{document_id}/download"))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        server
            .post(&format!("/documents/{document_id}/query"))
            .json(&json!({ "prompt": "What is the total?" }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        let form = MultipartForm::new().add_part(
            FILE_FIELD,
            Part::bytes(b"%PDF-1.4".to_vec())
                .file_name("scan.pdf")
                .mime_type("application/pdf"),
        );
        server
            .post("/documents/upload")
            .multipart(form)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        Ok(())
    }

    #[tokio::test]
    async fn malformed_token_is_rejected() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes())?;

        let response = server
            .get("/documents")
            .authorization_bearer("not-a-jwt")
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        Ok(())
    }
}
