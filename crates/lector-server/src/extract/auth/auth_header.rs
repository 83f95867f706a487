//! JWT extraction, validation and signing.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use axum_extra::typed_header::TypedHeaderRejectionReason;
use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};
use jsonwebtoken::{Algorithm, Header, Validation, decode, encode};
use lector_postgres::model::Account;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind, Result};
use crate::service::SessionKeys;

/// Verified claims of the bearer token sent with a request.
///
/// Validation covers the HS256 signature, expiration, issuer and audience.
/// It does not look at the database; use [`AuthState`] for that.
///
/// [`AuthState`]: crate::extract::AuthState
#[must_use]
#[derive(Debug, Clone)]
pub struct AuthHeader {
    auth_claims: AuthClaims,
}

impl AuthHeader {
    #[inline]
    pub const fn new(claims: AuthClaims) -> Self {
        Self {
            auth_claims: claims,
        }
    }

    #[inline]
    pub const fn as_auth_claims(&self) -> &AuthClaims {
        &self.auth_claims
    }

    #[inline]
    pub fn into_auth_claims(self) -> AuthClaims {
        self.auth_claims
    }
}

impl<S> FromRequestParts<S> for AuthHeader
where
    S: Sync + Send,
    SessionKeys: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth_header) = parts.extensions.get::<Self>() {
            return Ok(auth_header.clone());
        }

        type AuthBearerHeader = TypedHeader<Authorization<Bearer>>;
        let session_keys = SessionKeys::from_ref(state);

        match AuthBearerHeader::from_request_parts(parts, state).await {
            Ok(TypedHeader(bearer)) => {
                let auth_claims = AuthClaims::decode(bearer.token(), &session_keys)?;
                let auth_header = Self::new(auth_claims);
                parts.extensions.insert(auth_header.clone());
                Ok(auth_header)
            }
            Err(rejection) => {
                let error = match rejection.reason() {
                    TypedHeaderRejectionReason::Missing => ErrorKind::MissingAuthToken
                        .with_context("Missing Authorization header with Bearer token"),
                    TypedHeaderRejectionReason::Error(_) => ErrorKind::MalformedAuthToken
                        .with_message("Invalid token format")
                        .with_context("Authorization header must contain a Bearer token"),
                    _ => ErrorKind::InternalServerError
                        .with_message("Authentication processing failed")
                        .with_context("Unexpected error during header extraction"),
                };
                Err(error.with_resource("authentication"))
            }
        }
    }
}

impl aide::OperationInput for AuthHeader {}

/// Claims carried by an access token.
///
/// | Claim | Field | Description |
/// |-------|-------|-------------|
/// | `iss` | `issued_by` | Always `lector` |
/// | `aud` | `audience` | Always `lector:api` |
/// | `jti` | `token_id` | Random token id |
/// | `sub` | `account_id` | Account the token was issued to |
/// | `email` | `email_address` | Account email at issue time |
/// | `iat` | `issued_at` | Unix seconds |
/// | `exp` | `expires_at` | Unix seconds |
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct AuthClaims {
    #[serde(rename = "iss")]
    issued_by: String,
    #[serde(rename = "aud")]
    audience: String,

    #[serde(rename = "jti")]
    pub token_id: Uuid,
    #[serde(rename = "sub")]
    pub account_id: Uuid,
    #[serde(rename = "email")]
    pub email_address: String,

    #[serde(rename = "iat", with = "jiff::fmt::serde::timestamp::second::required")]
    pub issued_at: Timestamp,
    #[serde(rename = "exp", with = "jiff::fmt::serde::timestamp::second::required")]
    pub expires_at: Timestamp,
}

impl AuthClaims {
    const JWT_AUDIENCE: &str = "lector:api";
    const JWT_ISSUER: &str = "lector";

    /// Creates claims for `account`, valid for `lifetime` from now.
    pub fn new(account: &Account, lifetime: SignedDuration) -> Result<Self> {
        // Tokens carry whole seconds; truncate so decoded claims compare equal.
        let issued_at = Timestamp::from_second(Timestamp::now().as_second())
            .map_err(|e| ErrorKind::InternalServerError.with_context(e.to_string()))?;
        let expires_at = issued_at
            .checked_add(lifetime)
            .map_err(|e| ErrorKind::InternalServerError.with_context(e.to_string()))?;

        Ok(Self {
            issued_by: Self::JWT_ISSUER.to_owned(),
            audience: Self::JWT_AUDIENCE.to_owned(),
            token_id: Uuid::new_v4(),
            account_id: account.id,
            email_address: account.email_address.clone(),
            issued_at,
            expires_at,
        })
    }

    #[inline]
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Timestamp::now()
    }

    /// Signs the claims into a compact JWT.
    pub fn encode(&self, session_keys: &SessionKeys) -> Result<String> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, self, session_keys.encoding_key()).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET_AUTHENTICATION,
                error = %e,
                account_id = %self.account_id,
                "failed to encode access token"
            );
            ErrorKind::InternalServerError
                .with_message("Authentication token generation failed")
        })
    }

    /// Verifies a compact JWT and returns its claims.
    pub fn decode(token: &str, session_keys: &SessionKeys) -> Result<Self> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.set_audience(&[Self::JWT_AUDIENCE]);
        validation.set_issuer(&[Self::JWT_ISSUER]);
        validation.set_required_spec_claims(&["iss", "aud", "sub", "exp"]);

        let claims = decode::<Self>(token, session_keys.decoding_key(), &validation)?.claims;

        if claims.is_expired() {
            tracing::debug!(
                target: TRACING_TARGET_AUTHENTICATION,
                token_id = %claims.token_id,
                account_id = %claims.account_id,
                expired_at = %claims.expires_at,
                "access token expired"
            );
            return Err(ErrorKind::Unauthorized.with_message("Your session has expired"));
        }

        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            token_id = %claims.token_id,
            account_id = %claims.account_id,
            "access token verified"
        );

        Ok(claims)
    }
}

impl From<JwtError> for Error<'static> {
    fn from(error: JwtError) -> Self {
        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            error = %error,
            "access token rejected"
        );

        match error.kind() {
            JwtErrorKind::ExpiredSignature => {
                ErrorKind::Unauthorized.with_message("Your session has expired")
            }
            JwtErrorKind::InvalidSignature => ErrorKind::Unauthorized
                .with_message("Authentication token verification failed"),
            JwtErrorKind::InvalidAudience | JwtErrorKind::InvalidIssuer => ErrorKind::Unauthorized
                .with_message("Authentication token is not valid for this service"),
            JwtErrorKind::InvalidAlgorithm => ErrorKind::MalformedAuthToken
                .with_message("Authentication token uses an unsupported algorithm"),
            JwtErrorKind::MissingRequiredClaim(claim) => ErrorKind::MalformedAuthToken
                .with_message("Authentication token is incomplete")
                .with_context(format!("Token is missing required claim: {claim}")),
            JwtErrorKind::InvalidToken | JwtErrorKind::Base64(_) | JwtErrorKind::Json(_) => {
                ErrorKind::MalformedAuthToken.into_error()
            }
            _ => ErrorKind::Unauthorized.into_error(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    const SECRET: &str = "an-example-secret-that-is-long-enough";

    fn account() -> Account {
        let now = jiff_now();
        Account {
            id: Uuid::new_v4(),
            email_address: "ada@example.com".to_owned(),
            password_hash: "$argon2id$stub".to_owned(),
            created_at: now,
            updated_at: now,
        }
    }

    fn jiff_now() -> jiff_diesel::Timestamp {
        jiff_diesel::Timestamp::from(Timestamp::now())
    }

    fn keys(secret: &str) -> SessionKeys {
        SessionKeys::from_secret(secret, Duration::from_secs(3600)).unwrap()
    }

    #[test]
    fn signed_token_round_trips() {
        let keys = keys(SECRET);
        let claims = AuthClaims::new(&account(), keys.token_lifetime()).unwrap();

        let token = claims.encode(&keys).unwrap();
        let decoded = AuthClaims::decode(&token, &keys).unwrap();

        assert_eq!(decoded, claims);
        assert_eq!(decoded.email_address, "ada@example.com");
    }

    #[test]
    fn claims_are_numeric_timestamps() {
        let keys = keys(SECRET);
        let claims = AuthClaims::new(&account(), keys.token_lifetime()).unwrap();
        let json = serde_json::to_value(&claims).unwrap();

        assert!(json["iat"].is_i64());
        assert_eq!(
            json["exp"].as_i64().unwrap() - json["iat"].as_i64().unwrap(),
            3600
        );
    }

    #[test]
    fn other_secret_is_rejected() {
        let claims = AuthClaims::new(&account(), SignedDuration::from_hours(1)).unwrap();
        let token = claims.encode(&keys(SECRET)).unwrap();

        let error = AuthClaims::decode(&token, &keys("another-secret-that-is-long-enough!!"))
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = keys(SECRET);
        let claims = AuthClaims::new(&account(), SignedDuration::from_secs(-60)).unwrap();
        let token = claims.encode(&keys).unwrap();

        let error = AuthClaims::decode(&token, &keys).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn garbage_is_malformed() {
        let error = AuthClaims::decode("not.a.jwt", &keys(SECRET)).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MalformedAuthToken);
    }
}
