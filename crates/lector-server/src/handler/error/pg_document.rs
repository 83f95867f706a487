//! Document and interaction constraint violations.

use lector_postgres::types::{DocumentConstraints, DocumentInteractionConstraints};

use crate::handler::{Error, ErrorKind};

impl From<DocumentConstraints> for Error<'static> {
    fn from(c: DocumentConstraints) -> Self {
        let error = match c {
            DocumentConstraints::FileNameNotEmpty => {
                ErrorKind::BadRequest.with_message("File name cannot be empty")
            }
            DocumentConstraints::FileNameLengthMax => ErrorKind::BadRequest
                .with_message("File name cannot exceed 255 characters"),
            DocumentConstraints::ContentTypeSupported => ErrorKind::UnsupportedMediaType.into_error(),
            DocumentConstraints::FileSizeRange => ErrorKind::PayloadTooLarge.into_error(),
            DocumentConstraints::TextOnlyWhenCompleted
            | DocumentConstraints::UpdatedAfterCreated => {
                ErrorKind::InternalServerError.into_error()
            }
        };

        error.with_resource("document")
    }
}

impl From<DocumentInteractionConstraints> for Error<'static> {
    fn from(c: DocumentInteractionConstraints) -> Self {
        let error = match c {
            DocumentInteractionConstraints::PromptNotEmpty => {
                ErrorKind::BadRequest.with_message("Prompt cannot be empty")
            }
            DocumentInteractionConstraints::PromptLengthMax => {
                ErrorKind::BadRequest.with_message("Prompt cannot exceed 4000 characters")
            }
        };

        error.with_resource("interaction")
    }
}
