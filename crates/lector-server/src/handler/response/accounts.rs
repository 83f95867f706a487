//! Account response types.

use jiff::Timestamp;
use lector_postgres::model;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account. Never carries the password hash.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// ID of the account.
    pub account_id: Uuid,
    /// Normalized email address.
    pub email_address: String,
    /// Timestamp when the account was registered.
    pub created_at: Timestamp,
}

impl From<model::Account> for Account {
    fn from(account: model::Account) -> Self {
        Self {
            account_id: account.id,
            email_address: account.email_address,
            created_at: account.created_at.into(),
        }
    }
}
