//! Database connection extractor.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut};
use lector_postgres::{PgClient, PgConn};

use crate::handler::{Error, ErrorKind};

/// A pooled connection acquired for the duration of a request.
///
/// Repository traits are called directly on the inner [`PgConn`]:
///
/// ```rust,ignore
/// use lector_postgres::query::DocumentRepository;
///
/// async fn handler(PgPool(mut conn): PgPool) {
///     let document = conn.find_document_by_id(document_id).await?;
/// }
/// ```
#[derive(Debug, Deref, DerefMut)]
pub struct PgPool(pub PgConn);

impl<S> FromRequestParts<S> for PgPool
where
    PgClient: FromRef<S>,
    S: Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pg_client = PgClient::from_ref(state);
        let conn = pg_client.get_connection().await.map_err(|e| {
            tracing::error!(error = %e, "failed to acquire database connection");
            ErrorKind::ServiceUnavailable
                .with_message("Database connection unavailable")
                .with_context(e.to_string())
        })?;

        Ok(PgPool(conn))
    }
}

impl aide::OperationInput for PgPool {}
