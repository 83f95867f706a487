//! Tracing target constants for structured logging.
//!
//! Every module logs under one of these targets so output can be filtered
//! with `RUST_LOG`, e.g. `RUST_LOG=lector_server::extraction=debug`.

/// Token validation and account verification.
pub const TRACING_TARGET_AUTHENTICATION: &str = "lector_server::authentication";

/// Middleware errors and request timeouts.
pub const TRACING_TARGET_RECOVERY_ERROR: &str = "lector_server::recovery::error";

/// Handler panics.
pub const TRACING_TARGET_RECOVERY_PANIC: &str = "lector_server::recovery::panic";

/// Password hashing and verification.
pub const TRACING_TARGET_PASSWORD_HASHER: &str = "lector_server::password_hasher";

/// JWT signing key setup.
pub const TRACING_TARGET_SESSION_KEYS: &str = "lector_server::session_keys";

/// Health probe caching.
pub const TRACING_TARGET_HEALTH_CACHE: &str = "lector_server::health_cache";

/// Background text extraction.
pub const TRACING_TARGET_EXTRACTION: &str = "lector_server::extraction";

/// Language model calls.
pub const TRACING_TARGET_INFERENCE: &str = "lector_server::inference";

/// Report rendering.
pub const TRACING_TARGET_REPORT: &str = "lector_server::report";

/// Database constraint mapping.
pub const TRACING_TARGET_CONSTRAINTS: &str = "lector_server::postgres_constraints";
