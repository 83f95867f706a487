//! Credential handling: password hashing and JWT signing keys.

mod password_hasher;
mod session_keys;

pub use password_hasher::PasswordHasher;
pub use session_keys::{SessionConfig, SessionKeys};
