#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use lector_server::handler::routes;
use lector_server::middleware::{
    RouterObservabilityExt, RouterOpenApiExt, RouterRecoveryExt, RouterSecurityExt,
    SecurityHeadersConfig,
};
use lector_server::service::ServiceState;

use crate::config::{Cli, MiddlewareConfig};

pub const TRACING_TARGET_SERVER_STARTUP: &str = "lector_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "lector_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "lector_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();
    Cli::init_tracing();

    cli.validate()?;
    cli.log();

    let state = ServiceState::from_config(&cli.service)
        .await
        .context("failed to create service state")?;

    let router = create_router(state.clone(), &cli.middleware);
    server::serve(router, &cli.server).await?;

    drain_extractions(&state, cli.server.shutdown_timeout()).await;
    Ok(())
}

/// Creates the router with all middleware layers applied.
///
/// The last layer added runs first: recovery wraps observability, which
/// wraps security, which wraps the routes.
fn create_router(state: ServiceState, middleware: &MiddlewareConfig) -> Router {
    let api_routes: Router = routes()
        .with_open_api(middleware.openapi.clone())
        .with_state(state);

    api_routes
        .with_security(&middleware.cors, &SecurityHeadersConfig::default())
        .with_observability()
        .with_recovery(&middleware.recovery)
}

/// Waits for background extractions once the listener has stopped.
///
/// Documents still processing after the timeout are failed on the next start.
async fn drain_extractions(state: &ServiceState, timeout: Duration) {
    if state.extractor.shutdown(timeout).await {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "background extractions finished"
        );
    } else {
        tracing::warn!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            timeout_secs = timeout.as_secs(),
            "background extractions still running at shutdown"
        );
    }
}
