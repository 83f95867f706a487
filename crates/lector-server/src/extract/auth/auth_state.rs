//! Authenticated account extractor.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use derive_more::Deref;
use lector_postgres::PgClient;
use lector_postgres::query::AccountRepository;

use super::{AuthClaims, AuthHeader};
use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind, Result};
use crate::service::SessionKeys;

/// Claims of a verified token whose account still exists.
///
/// The token is checked before the database is touched, so requests without
/// a valid token are rejected without acquiring a connection. The verified
/// state is cached in the request extensions.
#[derive(Debug, Clone, Deref, PartialEq, Eq)]
pub struct AuthState(pub AuthClaims);

impl AuthState {
    /// Checks that the account named by the token still exists.
    pub async fn from_unverified_header(
        auth_header: AuthHeader,
        pg_client: PgClient,
    ) -> Result<Self> {
        let auth_claims = auth_header.into_auth_claims();

        let mut conn = pg_client.get_connection().await.map_err(|db_error| {
            tracing::error!(
                target: TRACING_TARGET_AUTHENTICATION,
                error = %db_error,
                account_id = %auth_claims.account_id,
                "database unavailable during authentication"
            );
            ErrorKind::ServiceUnavailable
                .with_message("Authentication verification is temporarily unavailable")
        })?;

        let account = conn.find_account_by_id(auth_claims.account_id).await?;
        if account.is_none() {
            tracing::warn!(
                target: TRACING_TARGET_AUTHENTICATION,
                account_id = %auth_claims.account_id,
                token_id = %auth_claims.token_id,
                "token references a missing account"
            );
            return Err(ErrorKind::Unauthorized.with_message("Account not found"));
        }

        Ok(Self(auth_claims))
    }
}

impl<S> FromRequestParts<S> for AuthState
where
    S: Sync + Send + 'static,
    PgClient: FromRef<S>,
    SessionKeys: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth_state) = parts.extensions.get::<Self>() {
            return Ok(auth_state.clone());
        }

        let auth_header = AuthHeader::from_request_parts(parts, state).await?;
        let pg_client = PgClient::from_ref(state);
        let auth_state = Self::from_unverified_header(auth_header, pg_client).await?;

        parts.extensions.insert(auth_state.clone());
        Ok(auth_state)
    }
}

impl aide::OperationInput for AuthState {}
