//! Database error type.

pub use deadpool::managed::TimeoutType;
use diesel::result::DatabaseErrorKind;
pub use diesel::result::{ConnectionError as DieselConnectionError, Error as DieselError};
use diesel_async::pooled_connection::PoolError as ManagerError;
use diesel_async::pooled_connection::deadpool::PoolError;

use crate::TRACING_TARGET_CONNECTION;
use crate::types::ConstraintViolation;

/// Type-erased error used by the migration harness.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Anything that can go wrong between the service and PostgreSQL.
#[derive(Debug, thiserror::Error)]
#[must_use = "database errors should be handled appropriately"]
pub enum PgError {
    /// Rejected by [`PgConfig::validate`].
    ///
    /// [`PgConfig::validate`]: crate::PgConfig::validate
    #[error("invalid database configuration: {0}")]
    Config(String),

    /// No connection became available within the acquire timeout.
    #[error("timed out acquiring a database connection ({0:?})")]
    Timeout(TimeoutType),

    #[error("database connection failed: {0}")]
    Connection(#[from] DieselConnectionError),

    #[error("migration failed: {0}")]
    Migration(BoxError),

    #[error("query failed: {0}")]
    Query(#[from] DieselError),

    /// The pool itself misbehaved (closed, misconfigured runtime, hook failure).
    #[error("connection pool error: {0}")]
    Pool(String),
}

impl PgError {
    /// Name of the violated constraint, if the database reported one.
    pub fn constraint(&self) -> Option<&str> {
        match self {
            Self::Query(DieselError::DatabaseError(_, info)) => info.constraint_name(),
            _ => None,
        }
    }

    /// Known constraint this error violated.
    pub fn constraint_violation(&self) -> Option<ConstraintViolation> {
        self.constraint().and_then(ConstraintViolation::new)
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            Self::Query(DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                _
            ))
        )
    }

    /// Whether the query ran and matched no rows.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Query(DieselError::NotFound))
    }

    /// Whether the database could not be reached at all.
    ///
    /// Callers report these as a temporary outage rather than a server bug.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Connection(_))
    }
}

impl From<PoolError> for PgError {
    fn from(value: PoolError) -> Self {
        match value {
            PoolError::Timeout(timeout) => Self::Timeout(timeout),
            PoolError::Backend(ManagerError::ConnectionError(error)) => Self::Connection(error),
            PoolError::Backend(ManagerError::QueryError(error)) => Self::Query(error),
            PoolError::Closed => Self::Pool("pool is closed".to_owned()),
            PoolError::NoRuntimeSpecified => Self::Pool("no async runtime configured".to_owned()),
            PoolError::PostCreateHook(error) => {
                tracing::warn!(
                    target: TRACING_TARGET_CONNECTION,
                    error = %error,
                    "post-create hook rejected a connection"
                );
                Self::Pool(error.to_string())
            }
        }
    }
}

/// Specialized [`Result`] type for database operations.
pub type PgResult<T, E = PgError> = Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeouts_and_refused_connections_are_unavailable() {
        assert!(PgError::Timeout(TimeoutType::Wait).is_unavailable());

        let refused = DieselConnectionError::BadConnection("connection refused".to_owned());
        assert!(PgError::Connection(refused).is_unavailable());

        assert!(!PgError::Pool("pool is closed".to_owned()).is_unavailable());
    }

    #[test]
    fn missing_rows_are_not_found_without_constraint() {
        let error = PgError::Query(DieselError::NotFound);
        assert!(error.is_not_found());
        assert!(!error.is_unavailable());
        assert!(!error.is_unique_violation());
        assert!(error.constraint().is_none());
        assert!(error.constraint_violation().is_none());
    }

    #[test]
    fn closed_pool_is_a_pool_error() {
        let error = PgError::from(PoolError::Closed);
        assert!(matches!(error, PgError::Pool(_)));
        assert_eq!(error.to_string(), "connection pool error: pool is closed");
    }
}
