//! Offset pagination parameters.

use lector_postgres::query::Pagination as QueryPagination;
use lector_postgres::types::constants::pagination::{DEFAULT_LIMIT, MAX_LIMIT};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Pagination query parameters for list endpoints.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, JsonSchema, Validate)]
pub struct Pagination {
    /// Number of records to skip, 0 when omitted.
    #[validate(range(min = 0, max = 100000))]
    pub offset: Option<i64>,

    /// Maximum number of records to return, 1 to 100, 50 when omitted.
    #[validate(range(min = 1, max = MAX_LIMIT))]
    pub limit: Option<i64>,
}

impl Pagination {
    #[inline]
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0)
    }

    #[inline]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }
}

impl From<Pagination> for QueryPagination {
    fn from(pagination: Pagination) -> Self {
        QueryPagination::new(pagination.limit(), pagination.offset())
    }
}
