//! Bearer token authentication.
//!
//! - [`AuthHeader`] parses and verifies the JWT in the `Authorization` header.
//! - [`AuthClaims`] are the claims carried by that token.
//! - [`AuthState`] additionally checks that the account still exists.

mod auth_header;
mod auth_state;

pub use self::auth_header::{AuthClaims, AuthHeader};
pub use self::auth_state::AuthState;
