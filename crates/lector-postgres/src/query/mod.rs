//! Repository traits implemented on [`PgConnection`].
//!
//! [`PgConnection`]: crate::PgConnection

mod account;
mod document;
mod document_interaction;

pub use account::AccountRepository;
pub use document::DocumentRepository;
pub use document_interaction::DocumentInteractionRepository;
use serde::{Deserialize, Serialize};

use crate::types::constants::pagination::{DEFAULT_LIMIT, MAX_LIMIT};

/// Offset pagination for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of records to return.
    pub limit: i64,
    /// Number of records to skip.
    pub offset: i64,
}

impl Pagination {
    /// Creates a pagination, clamping the limit to `1..=100` and the offset to `0..`.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: limit.clamp(1, MAX_LIMIT),
            offset: offset.max(0),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, 0)
    }
}
