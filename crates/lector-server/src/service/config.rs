//! Configuration for every service the server state depends on.

#[cfg(any(test, feature = "config"))]
use clap::Args;
use derive_builder::Builder;
use lector_postgres::{PgClient, PgClientMigrationExt, PgConfig};
use serde::{Deserialize, Serialize};

use crate::service::extraction::ExtractionConfig;
use crate::service::inference::{InferenceService, LlmConfig};
use crate::service::security::{SessionConfig, SessionKeys};
use crate::{Error, Result};

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[cfg_attr(any(test, feature = "config"), derive(Args))]
#[must_use = "config does nothing unless you use it"]
#[builder(
    pattern = "owned",
    setter(into, prefix = "with"),
    build_fn(validate = "Self::validate")
)]
pub struct ServiceConfig {
    /// PostgreSQL connection pool.
    #[cfg_attr(any(test, feature = "config"), command(flatten))]
    pub postgres: PgConfig,

    /// Access token signing.
    #[cfg_attr(any(test, feature = "config"), command(flatten))]
    pub session: SessionConfig,

    /// Language model access.
    #[cfg_attr(any(test, feature = "config"), command(flatten))]
    pub llm: LlmConfig,

    /// Background extraction.
    #[cfg_attr(any(test, feature = "config"), command(flatten))]
    #[builder(default)]
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

impl ServiceConfig {
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Validates every section.
    pub fn validate(&self) -> Result<()> {
        self.postgres
            .validate()
            .map_err(|err| Error::config(err.to_string()).with_source(err))?;
        self.session.validate()?;
        self.llm.validate()?;
        self.extraction.validate()
    }

    /// Connects to Postgres, verifies connectivity and applies pending migrations.
    pub async fn connect_postgres(&self) -> Result<PgClient> {
        let pg_client = PgClient::new_with_test(self.postgres.clone())
            .await
            .map_err(|err| {
                Error::external("postgres", "failed to connect to the database").with_source(err)
            })?;

        let migrations = pg_client.run_pending_migrations().await.map_err(|err| {
            Error::internal("postgres", "failed to apply database migrations").with_source(err)
        })?;

        if !migrations.is_no_op() {
            tracing::info!(
                target: lector_postgres::TRACING_TARGET_MIGRATION,
                applied = migrations.processed_versions.len(),
                latest = migrations.last_processed_version(),
                "database migrations applied"
            );
        }

        Ok(pg_client)
    }

    pub fn load_session_keys(&self) -> Result<SessionKeys> {
        SessionKeys::from_config(&self.session)
    }

    pub fn connect_llm(&self) -> Result<InferenceService> {
        InferenceService::from_config(&self.llm)
    }
}

impl ServiceConfigBuilder {
    fn validate(builder: &ServiceConfigBuilder) -> Result<(), String> {
        if let Some(postgres) = &builder.postgres {
            postgres.validate().map_err(|err| err.to_string())?;
        }

        if let Some(session) = &builder.session {
            session.validate().map_err(|err| err.to_string())?;
        }

        if let Some(llm) = &builder.llm {
            llm.validate().map_err(|err| err.to_string())?;
        }

        if let Some(extraction) = &builder.extraction {
            extraction.validate().map_err(|err| err.to_string())?;
        }

        Ok(())
    }
}
