//! Signing keys for access tokens.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

#[cfg(any(test, feature = "config"))]
use clap::Args;
use jiff::SignedDuration;
use jsonwebtoken::{DecodingKey, EncodingKey};
use serde::{Deserialize, Serialize};

use crate::utility::tracing_targets::TRACING_TARGET_SESSION_KEYS as TRACING_TARGET;
use crate::{Error, Result};

/// Shortest accepted HMAC secret, in bytes.
pub const MIN_SECRET_LENGTH: usize = 32;

const DEFAULT_EXPIRATION_SECS: u64 = 24 * 60 * 60;

/// Access token configuration.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(any(test, feature = "config"), derive(Args))]
pub struct SessionConfig {
    /// HMAC secret used to sign access tokens (at least 32 bytes).
    #[cfg_attr(any(test, feature = "config"), arg(long, env = "JWT_SECRET"))]
    #[serde(skip_serializing)]
    pub jwt_secret: String,

    /// Access token lifetime in seconds.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long, env = "JWT_EXPIRATION_SECS", default_value = "86400")
    )]
    #[serde(default = "SessionConfig::default_expiration_secs")]
    pub jwt_expiration_secs: u64,
}

impl SessionConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            jwt_expiration_secs: DEFAULT_EXPIRATION_SECS,
        }
    }

    fn default_expiration_secs() -> u64 {
        DEFAULT_EXPIRATION_SECS
    }

    #[inline]
    pub fn token_lifetime(&self) -> Duration {
        Duration::from_secs(self.jwt_expiration_secs)
    }

    /// Checks the secret length and the token lifetime.
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.len() < MIN_SECRET_LENGTH {
            return Err(Error::config(format!(
                "JWT secret must be at least {MIN_SECRET_LENGTH} bytes"
            )));
        }

        if self.jwt_expiration_secs == 0 {
            return Err(Error::config("JWT expiration must be positive"));
        }

        Ok(())
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("jwt_secret", &"***")
            .field("jwt_expiration_secs", &self.jwt_expiration_secs)
            .finish()
    }
}

/// HS256 keys and token lifetime shared by login and authentication.
///
/// Cloning is cheap.
#[derive(Clone)]
pub struct SessionKeys {
    inner: Arc<SessionKeysInner>,
}

struct SessionKeysInner {
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
    token_lifetime: SignedDuration,
}

impl SessionKeys {
    /// Validates `config` and derives the signing keys from its secret.
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        config.validate()?;
        Self::from_secret(&config.jwt_secret, config.token_lifetime())
    }

    /// Derives signing keys from a raw secret.
    pub fn from_secret(secret: &str, token_lifetime: Duration) -> Result<Self> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(Error::config(format!(
                "JWT secret must be at least {MIN_SECRET_LENGTH} bytes"
            )));
        }

        let token_lifetime = SignedDuration::try_from(token_lifetime)
            .map_err(|e| Error::config("JWT expiration is out of range").with_source(e))?;

        tracing::info!(
            target: TRACING_TARGET,
            token_lifetime = %token_lifetime,
            "session keys initialized"
        );

        Ok(Self {
            inner: Arc::new(SessionKeysInner {
                decoding_key: DecodingKey::from_secret(secret.as_bytes()),
                encoding_key: EncodingKey::from_secret(secret.as_bytes()),
                token_lifetime,
            }),
        })
    }

    #[inline]
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.inner.decoding_key
    }

    #[inline]
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.inner.encoding_key
    }

    /// How long newly issued tokens stay valid.
    #[inline]
    pub fn token_lifetime(&self) -> SignedDuration {
        self.inner.token_lifetime
    }
}

impl fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKeys")
            .field("token_lifetime", &self.inner.token_lifetime)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::ErrorKind;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        session: SessionConfig,
    }

    #[test]
    fn short_secret_is_rejected() {
        let error = SessionKeys::from_config(&SessionConfig::new("too-short")).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Config);
    }

    #[test]
    fn keys_use_configured_lifetime() {
        let mut config = SessionConfig::new("0123456789abcdef0123456789abcdef");
        config.jwt_expiration_secs = 120;

        let keys = SessionKeys::from_config(&config).unwrap();
        assert_eq!(keys.token_lifetime(), SignedDuration::from_secs(120));
    }

    #[test]
    fn secret_is_not_printed() {
        let config = SessionConfig::new("0123456789abcdef0123456789abcdef");
        assert!(!format!("{config:?}").contains("0123456789"));
        assert!(!serde_json::to_string(&config).unwrap().contains("0123456789"));
    }

    #[test]
    fn parses_from_arguments() {
        let cli = TestCli::parse_from([
            "lector",
            "--jwt-secret",
            "0123456789abcdef0123456789abcdef",
        ]);
        assert_eq!(cli.session.jwt_expiration_secs, 86400);
    }
}
