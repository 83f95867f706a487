//! Query string extractor.

use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, Query as AxumQuery};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;

use super::sanitize_error_message;
use crate::handler::{Error, ErrorKind};

/// [`axum::extract::Query`] with rejections reported as [`Error`].
///
/// ```rust,no_run
/// use lector_server::extract::Query;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Page {
///     offset: Option<i64>,
///     limit: Option<i64>,
/// }
///
/// async fn list(Query(page): Query<Page>) {
///     let _ = (page.offset, page.limit);
/// }
/// ```
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Query<T>(pub T);

impl<T, S> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AxumQuery(value) = AxumQuery::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

impl From<QueryRejection> for Error<'static> {
    fn from(rejection: QueryRejection) -> Self {
        let detail = rejection.body_text();
        tracing::debug!(
            target: "lector_server::extract::query",
            error = %detail,
            "query string rejected"
        );

        // serde_urlencoded reports `unknown variant `docx`, expected `txt` or `pdf``.
        let message = if detail.contains("unknown variant") {
            "Unsupported value for a query parameter"
        } else if detail.contains("invalid digit") {
            "Numeric query parameters must be whole numbers"
        } else {
            "Invalid query parameters"
        };

        ErrorKind::BadRequest
            .with_message(message)
            .with_context(sanitize_error_message(&detail, 2, 200))
    }
}

impl<T> aide::OperationInput for Query<T>
where
    T: schemars::JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        AxumQuery::<T>::operation_input(ctx, operation);
    }
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::routing::get;
    use axum_test::TestServer;
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize)]
    #[serde(rename_all = "lowercase")]
    enum Format {
        Txt,
        Pdf,
    }

    #[derive(Deserialize)]
    struct Params {
        #[serde(default)]
        format: Option<Format>,
        limit: Option<i64>,
    }

    async fn describe(Query(params): Query<Params>) -> String {
        let format = match params.format {
            Some(Format::Pdf) => "pdf",
            Some(Format::Txt) | None => "txt",
        };
        format!("{format} {}", params.limit.unwrap_or(50))
    }

    fn server() -> anyhow::Result<TestServer> {
        Ok(TestServer::new(Router::new().route("/", get(describe)))?)
    }

    #[tokio::test]
    async fn known_values_are_parsed() -> anyhow::Result<()> {
        let response = server()?.get("/?format=pdf&limit=5").await;
        response.assert_status_ok();
        response.assert_text("pdf 5");
        Ok(())
    }

    #[tokio::test]
    async fn unknown_format_is_bad_request() -> anyhow::Result<()> {
        let response = server()?.get("/?format=docx").await;
        response.assert_status_bad_request();

        let body = response.json::<serde_json::Value>();
        assert_eq!(body["message"], "Unsupported value for a query parameter");
        Ok(())
    }

    #[tokio::test]
    async fn non_numeric_limit_is_bad_request() -> anyhow::Result<()> {
        let response = server()?.get("/?limit=ten").await;
        response.assert_status_bad_request();
        Ok(())
    }
}
