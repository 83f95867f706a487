//! Authentication response types.

use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::extract::AuthClaims;

/// Access token returned after a successful login.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthToken {
    /// Signed JWT to send as `Authorization: Bearer <token>`.
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: String,
    /// Timestamp when the token was issued.
    pub issued_at: Timestamp,
    /// Timestamp when the token expires.
    pub expires_at: Timestamp,
}

impl AuthToken {
    pub fn new(access_token: String, claims: &AuthClaims) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_owned(),
            issued_at: claims.issued_at,
            expires_at: claims.expires_at,
        }
    }
}
