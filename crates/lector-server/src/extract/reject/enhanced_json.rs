//! JSON extractor and response body.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Json as AxumJson, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use derive_more::{Deref, DerefMut, From};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::sanitize_error_message;
use crate::handler::{Error, ErrorKind};

/// [`axum::Json`] whose rejections use the common error body.
///
/// Handlers also return it as a response body.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Json<T>(pub T);

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let AxumJson(value) = AxumJson::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    #[inline]
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

impl From<JsonRejection> for Error<'static> {
    fn from(rejection: JsonRejection) -> Self {
        let detail = sanitize_error_message(&rejection.body_text(), 3, 200);

        match rejection {
            JsonRejection::MissingJsonContentType(_) => ErrorKind::BadRequest
                .with_message("Expected an application/json body"),
            JsonRejection::JsonSyntaxError(_) => ErrorKind::BadRequest
                .with_message("The body is not valid JSON")
                .with_context(detail),
            JsonRejection::JsonDataError(_) => ErrorKind::BadRequest
                .with_message("The body does not match the expected fields")
                .with_context(detail),
            JsonRejection::BytesRejection(_) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                ErrorKind::PayloadTooLarge.with_message("Request body too large")
            }
            _ => ErrorKind::BadRequest
                .with_message("The request body could not be read")
                .with_context(detail),
        }
    }
}

impl<T> aide::OperationInput for Json<T>
where
    T: schemars::JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        AxumJson::<T>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        AxumJson::<T>::inferred_early_responses(ctx, operation)
    }
}

impl<T> aide::OperationOutput for Json<T>
where
    T: schemars::JsonSchema + Serialize,
{
    type Inner = T;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        AxumJson::<T>::operation_response(ctx, operation)
    }

    fn inferred_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        AxumJson::<T>::inferred_responses(ctx, operation)
    }
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::routing::post;
    use axum_test::TestServer;
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Deserialize)]
    struct Prompt {
        prompt: String,
    }

    async fn echo(Json(body): Json<Prompt>) -> String {
        body.prompt
    }

    fn server() -> anyhow::Result<TestServer> {
        Ok(TestServer::new(Router::new().route("/", post(echo)))?)
    }

    #[tokio::test]
    async fn valid_body_is_extracted() -> anyhow::Result<()> {
        let response = server()?.post("/").json(&json!({ "prompt": "total?" })).await;
        response.assert_status_ok();
        response.assert_text("total?");
        Ok(())
    }

    #[tokio::test]
    async fn missing_field_is_bad_request() -> anyhow::Result<()> {
        let response = server()?.post("/").json(&json!({ "question": "total?" })).await;
        response.assert_status_bad_request();

        let body = response.json::<serde_json::Value>();
        assert_eq!(body["name"], "bad_request");
        assert!(body["context"].as_str().is_some_and(|c| c.contains("prompt")));
        Ok(())
    }

    #[tokio::test]
    async fn plain_text_is_bad_request() -> anyhow::Result<()> {
        let response = server()?.post("/").text("total?").await;
        response.assert_status_bad_request();
        Ok(())
    }
}
