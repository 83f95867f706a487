//! Conversion of database errors into HTTP errors.
//!
//! Named constraint violations map to client errors per table. An unreachable
//! database is a 503, and everything else is logged and reported as a 500
//! without leaking details.

use lector_postgres::types::ConstraintViolation;
use lector_postgres::{DieselError, PgError};

use crate::handler::{Error, ErrorKind};
use crate::utility::tracing_targets::TRACING_TARGET_CONSTRAINTS as TRACING_TARGET;

impl From<ConstraintViolation> for Error<'static> {
    fn from(constraint: ConstraintViolation) -> Self {
        match constraint {
            ConstraintViolation::Account(c) => c.into(),
            ConstraintViolation::Document(c) => c.into(),
            ConstraintViolation::DocumentInteraction(c) => c.into(),
        }
    }
}

impl From<PgError> for Error<'static> {
    fn from(error: PgError) -> Self {
        if error.is_unavailable() {
            tracing::error!(target: TRACING_TARGET, error = %error, "database unavailable");
            return ErrorKind::ServiceUnavailable
                .with_message("The database is temporarily unavailable");
        }

        if let Some(constraint) = error.constraint_violation() {
            tracing::warn!(
                target: TRACING_TARGET,
                constraint = error.constraint(),
                category = ?constraint.constraint_category(),
                "query rejected by constraint"
            );
            return constraint.into();
        }

        tracing::error!(target: TRACING_TARGET, error = %error, "database error");
        ErrorKind::InternalServerError.into_error()
    }
}

// Transactions surface raw diesel errors.
impl From<DieselError> for Error<'static> {
    fn from(error: DieselError) -> Self {
        PgError::from(error).into()
    }
}

#[cfg(test)]
mod tests {
    use lector_postgres::{DieselConnectionError, TimeoutType};

    use super::*;

    #[test]
    fn pool_timeouts_are_unavailable() {
        let error: Error = PgError::Timeout(TimeoutType::Wait).into();
        assert_eq!(error.kind(), ErrorKind::ServiceUnavailable);
    }

    #[test]
    fn refused_connections_are_unavailable() {
        let refused = DieselConnectionError::BadConnection("connection refused".to_owned());
        let error: Error = PgError::Connection(refused).into();
        assert_eq!(error.kind(), ErrorKind::ServiceUnavailable);
    }

    #[test]
    fn unknown_query_errors_hide_details() {
        let error: Error = PgError::Query(DieselError::NotFound).into();
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert!(error.message().is_none());
        assert!(error.context().is_none());
    }
}
