//! Application state and dependency injection.

mod cache;
mod config;
pub mod extraction;
pub mod inference;
pub mod report;
mod security;

use lector_postgres::PgClient;

pub use crate::service::cache::HealthCache;
pub use crate::service::config::{ServiceConfig, ServiceConfigBuilder};
pub use crate::service::extraction::{DocumentExtractor, ExtractionConfig};
pub use crate::service::inference::{InferenceService, LlmConfig};
pub use crate::service::security::{PasswordHasher, SessionConfig, SessionKeys};
pub use crate::{Error, Result};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    // External services:
    pub postgres: PgClient,
    pub inference: InferenceService,

    // Internal services:
    pub password_hasher: PasswordHasher,
    pub session_keys: SessionKeys,
    pub health_cache: HealthCache,
    pub extractor: DocumentExtractor,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Connects to Postgres, applies migrations and fails documents left
    /// processing by a previous run.
    pub async fn from_config(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;

        let postgres = config.connect_postgres().await?;
        let inference = config.connect_llm()?;
        let session_keys = config.load_session_keys()?;

        let service_state = Self::new(postgres, inference, session_keys, &config.extraction);
        service_state.extractor.fail_interrupted().await?;

        Ok(service_state)
    }

    /// Assembles state from already connected services.
    pub fn new(
        postgres: PgClient,
        inference: InferenceService,
        session_keys: SessionKeys,
        extraction: &ExtractionConfig,
    ) -> Self {
        let extractor = DocumentExtractor::new(postgres.clone(), inference.clone(), extraction);

        Self {
            postgres,
            inference,

            password_hasher: PasswordHasher::new(),
            session_keys,
            health_cache: HealthCache::new(),
            extractor,
        }
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

// External services:
impl_di!(postgres: PgClient);
impl_di!(inference: InferenceService);

// Internal services:
impl_di!(password_hasher: PasswordHasher);
impl_di!(session_keys: SessionKeys);
impl_di!(health_cache: HealthCache);
impl_di!(extractor: DocumentExtractor);
