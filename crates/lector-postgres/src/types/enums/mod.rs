//! Enumerations mirroring PostgreSQL enum types.

mod document_status;

pub use document_status::DocumentStatus;
