//! Account registration and login handlers.
//!
//! Both routes are public. Login answers unknown emails and wrong passwords
//! with the same 401 and comparable latency.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use lector_postgres::PgClient;
use lector_postgres::model::NewAccount;
use lector_postgres::query::AccountRepository;

use crate::extract::{AuthClaims, Json, ValidateJson};
use crate::handler::request::{LoginAccount, RegisterAccount};
use crate::handler::response::{Account, AuthToken, ErrorResponse};
use crate::handler::{ErrorKind, Result};
use crate::service::{PasswordHasher, ServiceState, SessionKeys};

/// Tracing target for authentication operations.
const TRACING_TARGET: &str = "lector_server::handler::authentication";

/// Trims and lowercases an email address for storage and lookup.
fn normalize_email(email_address: &str) -> String {
    email_address.trim().to_lowercase()
}

/// Creates a new account.
#[tracing::instrument(skip_all)]
async fn register(
    State(pg_client): State<PgClient>,
    State(password_hasher): State<PasswordHasher>,
    ValidateJson(request): ValidateJson<RegisterAccount>,
) -> Result<(StatusCode, Json<Account>)> {
    let email_address = normalize_email(&request.email_address);
    tracing::debug!(target: TRACING_TARGET, "registering account");

    let mut conn = pg_client.get_connection().await?;

    if conn.email_exists(&email_address).await? {
        tracing::debug!(target: TRACING_TARGET, "email address already registered");
        return Err(ErrorKind::Conflict
            .with_message("An account with this email address already exists.")
            .with_resource("account"));
    }

    let password_hash = password_hasher.hash_password(&request.password)?;
    let new_account = NewAccount {
        email_address,
        password_hash,
    };

    // A concurrent registration surfaces as the unique constraint, mapped to 409.
    let account = conn.create_account(new_account).await?;

    tracing::info!(
        target: TRACING_TARGET,
        account_id = %account.id,
        "account registered"
    );

    Ok((StatusCode::CREATED, Json(account.into())))
}

fn register_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Register account")
        .description("Creates an account with an email address and a password.")
        .response::<201, Json<Account>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<409, Json<ErrorResponse>>()
}

/// Exchanges credentials for an access token.
#[tracing::instrument(skip_all)]
async fn login(
    State(pg_client): State<PgClient>,
    State(password_hasher): State<PasswordHasher>,
    State(session_keys): State<SessionKeys>,
    ValidateJson(request): ValidateJson<LoginAccount>,
) -> Result<(StatusCode, Json<AuthToken>)> {
    let email_address = normalize_email(&request.email_address);
    tracing::debug!(target: TRACING_TARGET, "login attempt");

    let mut conn = pg_client.get_connection().await?;

    let Some(account) = conn.find_account_by_email(&email_address).await? else {
        password_hasher.verify_dummy_password(&request.password);
        tracing::debug!(target: TRACING_TARGET, "login for unknown email address");
        return Err(ErrorKind::Unauthorized
            .with_message("Invalid credentials.")
            .with_resource("authentication"));
    };

    if let Err(error) = password_hasher.verify_password(&request.password, &account.password_hash)
    {
        tracing::warn!(
            target: TRACING_TARGET,
            account_id = %account.id,
            "login with wrong password"
        );
        return Err(error);
    }

    let auth_claims = AuthClaims::new(&account, session_keys.token_lifetime())?;
    let access_token = auth_claims.encode(&session_keys)?;

    tracing::info!(
        target: TRACING_TARGET,
        account_id = %account.id,
        token_id = %auth_claims.token_id,
        expires_at = %auth_claims.expires_at,
        "access token issued"
    );

    let response = AuthToken::new(access_token, &auth_claims);
    Ok((StatusCode::OK, Json(response)))
}

fn login_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Login")
        .description("Verifies email and password and returns a bearer access token.")
        .response::<200, Json<AuthToken>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
}

/// Returns a [`Router`] with all authentication routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/auth/register", post_with(register, register_docs))
        .api_route("/auth/login", post_with(login, login_docs))
        .with_path_items(|item| item.tag("Authentication"))
}
