//! Multipart extractor that reads single-file uploads.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{FromRequest, Multipart as AxumMultipart, Request};
use axum::http::StatusCode;
use bytes::BytesMut;

use crate::handler::{Error, ErrorKind, Result};

/// Tracing target for multipart parsing.
const TRACING_TARGET: &str = "lector_server::extract::multipart";

/// A file field buffered in memory.
#[derive(Debug)]
pub struct FilePart {
    /// File name as sent by the client, unsanitized.
    pub file_name: Option<String>,
    /// `Content-Type` of the part, if the client set one.
    pub content_type: Option<String>,
    pub bytes: BytesMut,
}

/// [`axum::extract::Multipart`] with rejections reported as [`Error`].
#[must_use]
#[derive(Debug)]
pub struct Multipart(pub AxumMultipart);

impl Multipart {
    /// Buffers the first field called `field_name`, skipping all others.
    ///
    /// Reading stops with a 413 as soon as the part grows past `max_size`
    /// bytes, so oversized uploads are never held in memory in full. Returns
    /// `None` when the form has no such field.
    pub async fn read_file(&mut self, field_name: &str, max_size: usize) -> Result<Option<FilePart>> {
        while let Some(mut field) = self.0.next_field().await? {
            if field.name() != Some(field_name) {
                tracing::debug!(target: TRACING_TARGET, field = ?field.name(), "skipping form field");
                continue;
            }

            let file_name = field.file_name().map(str::to_owned);
            let content_type = field.content_type().map(str::to_owned);

            let mut bytes = BytesMut::new();
            while let Some(chunk) = field.chunk().await? {
                if bytes.len() + chunk.len() > max_size {
                    tracing::debug!(
                        target: TRACING_TARGET,
                        file_name = ?file_name,
                        max_size,
                        "file part exceeds size limit"
                    );
                    return Err(ErrorKind::PayloadTooLarge
                        .with_message("File too large")
                        .with_context(format!(
                            "The maximum upload size is {} MB",
                            max_size / (1024 * 1024)
                        )));
                }
                bytes.extend_from_slice(&chunk);
            }

            return Ok(Some(FilePart {
                file_name,
                content_type,
                bytes,
            }));
        }

        Ok(None)
    }
}

impl<S> FromRequest<S> for Multipart
where
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = AxumMultipart::from_request(req, state).await?;
        Ok(Self(multipart))
    }
}

impl From<MultipartRejection> for Error<'static> {
    fn from(rejection: MultipartRejection) -> Self {
        let context = match rejection {
            MultipartRejection::InvalidBoundary(_) => {
                "Send the file as multipart/form-data with a boundary".to_owned()
            }
            other => other.body_text(),
        };

        ErrorKind::BadRequest
            .with_message("Expected a multipart/form-data upload")
            .with_context(context)
    }
}

impl From<MultipartError> for Error<'static> {
    fn from(error: MultipartError) -> Self {
        match error.status() {
            StatusCode::PAYLOAD_TOO_LARGE => ErrorKind::PayloadTooLarge
                .with_message("File too large")
                .with_context(error.body_text()),
            _ => ErrorKind::BadRequest
                .with_message("The upload could not be read")
                .with_context(error.body_text()),
        }
    }
}

impl aide::OperationInput for Multipart {
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        AxumMultipart::operation_input(ctx, operation);
    }
}
