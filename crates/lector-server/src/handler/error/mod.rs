//! [`Error`], [`ErrorKind`] and [`Result`].

mod http_error;
mod pg_account;
mod pg_document;
mod pg_error;

pub use http_error::{Error, ErrorKind, Result};
