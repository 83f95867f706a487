//! Background text extraction for uploaded documents.
//!
//! PDFs are read with `pdf-extract`; images are transcribed by the language
//! model. Each upload runs as a task on the [`DocumentExtractor`]'s tracker,
//! bounded by a semaphore, and ends with the document either completed or
//! failed.

mod config;
mod extractor;
mod file_name;
mod media_type;

pub use config::ExtractionConfig;
pub use extractor::{DocumentExtractor, ExtractionError};
pub use file_name::sanitize_file_name;
pub use media_type::MediaType;
