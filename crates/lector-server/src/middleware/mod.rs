//! Middleware for `axum::Router` and HTTP request processing.
//!
//! Each concern is an extension trait on [`Router`] so the binary decides the
//! order. The recommended stack, outermost first:
//!
//! 1. [`RouterRecoveryExt`]: panics, timeouts and tower errors.
//! 2. [`RouterObservabilityExt`]: request ids and trace spans.
//! 3. [`RouterSecurityExt`]: CORS, security headers, body limits.
//! 4. [`RouterOpenApiExt`]: the OpenAPI document and Scalar UI.
//!
//! ```rust,no_run
//! use axum::Router;
//! use lector_server::middleware::*;
//!
//! # fn example(router: Router) -> Router {
//! router
//!     .with_default_security()
//!     .with_observability()
//!     .with_default_recovery()
//! # }
//! ```
//!
//! [`Router`]: axum::Router

mod observability;
mod recovery;
mod security;
mod specification;

pub use observability::RouterObservabilityExt;
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use security::{
    CorsConfig, FrameOptions, MAX_BODY_SIZE, ReferrerPolicy, RouterSecurityExt,
    SecurityHeadersConfig,
};
pub use specification::{OpenApiConfig, RouterOpenApiExt};
