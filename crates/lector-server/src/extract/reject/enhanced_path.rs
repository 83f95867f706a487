//! Path parameter extractor.

use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path as AxumPath};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;

use super::sanitize_error_message;
use crate::handler::{Error, ErrorKind};

/// [`axum::extract::Path`] with rejections reported as [`Error`].
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Path<T>(pub T);

impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AxumPath(value) = AxumPath::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

impl From<PathRejection> for Error<'static> {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            // Every route parameter is an identifier.
            PathRejection::FailedToDeserializePathParams(err) => ErrorKind::BadRequest
                .with_message("Identifiers must be UUIDs")
                .with_context(sanitize_error_message(&err.body_text(), 2, 150)),
            PathRejection::MissingPathParams(err) => ErrorKind::MissingPathParam
                .with_context(sanitize_error_message(&err.body_text(), 2, 150)),
            other => ErrorKind::InternalServerError.with_context(other.body_text()),
        }
    }
}

impl<T> aide::OperationInput for Path<T>
where
    T: schemars::JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        AxumPath::<T>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        AxumPath::<T>::inferred_early_responses(ctx, operation)
    }
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::routing::get;
    use axum_test::TestServer;
    use uuid::Uuid;

    use super::*;

    async fn echo(Path(document_id): Path<Uuid>) -> String {
        document_id.to_string()
    }

    fn server() -> anyhow::Result<TestServer> {
        Ok(TestServer::new(Router::new().route("/documents/{id}", get(echo)))?)
    }

    #[tokio::test]
    async fn uuid_is_extracted() -> anyhow::Result<()> {
        let document_id = Uuid::new_v4();
        let response = server()?.get(&format!("/documents/{document_id}")).await;
        response.assert_status_ok();
        response.assert_text(document_id.to_string());
        Ok(())
    }

    #[tokio::test]
    async fn malformed_uuid_is_bad_request() -> anyhow::Result<()> {
        let response = server()?.get("/documents/not-a-uuid").await;
        response.assert_status_bad_request();

        let body = response.json::<serde_json::Value>();
        assert_eq!(body["message"], "Identifiers must be UUIDs");
        Ok(())
    }
}
