//! Authentication request types.

use lector_postgres::types::constants::account::MAX_EMAIL_LENGTH;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request payload for account registration.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAccount {
    /// Email address of the new account.
    #[validate(email, length(max = MAX_EMAIL_LENGTH))]
    pub email_address: String,

    /// Password of the new account, 8 to 128 characters.
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Request payload for login.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginAccount {
    /// Email address of the account.
    #[validate(email, length(max = MAX_EMAIL_LENGTH))]
    pub email_address: String,

    /// Password of the account.
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}
