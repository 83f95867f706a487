//! Request extractors with uniform error bodies.
//!
//! Each extractor wraps its axum counterpart and turns rejections into
//! [`handler::Error`] so every failure is reported with the same JSON shape.
//!
//! - [`AuthHeader`], [`AuthClaims`], [`AuthState`]: bearer token validation
//!   and account verification.
//! - [`Json`], [`ValidateJson`], [`Path`], [`Query`], [`Multipart`]: request
//!   data with descriptive rejections.
//! - [`PgPool`]: a pooled database connection.
//!
//! [`handler::Error`]: crate::handler::Error

pub mod auth;
mod pg_connection;
pub mod reject;

pub use crate::extract::auth::{AuthClaims, AuthHeader, AuthState};
pub use crate::extract::pg_connection::PgPool;
pub use crate::extract::reject::{FilePart, Json, Multipart, Path, Query, ValidateJson};
