//! Health check handler.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use lector_postgres::PgClient;

use crate::extract::Json;
use crate::handler::Result;
use crate::handler::response::HealthStatus;
use crate::service::{HealthCache, ServiceState};

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "lector_server::handler::monitors";

/// Reports whether the database is reachable.
#[tracing::instrument(skip_all)]
async fn health_status(
    State(pg_client): State<PgClient>,
    State(health_cache): State<HealthCache>,
) -> Result<(StatusCode, Json<HealthStatus>)> {
    let (is_healthy, checked_at) = health_cache.check(&pg_client).await;

    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    tracing::debug!(
        target: TRACING_TARGET,
        is_healthy,
        status_code = status_code.as_u16(),
        "health status checked"
    );

    let response = HealthStatus {
        is_healthy,
        checked_at,
    };

    Ok((status_code, Json(response)))
}

fn health_status_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Health status")
        .description("Probes the database, caching the result for 30 seconds.")
        .response::<200, Json<HealthStatus>>()
        .response::<503, Json<HealthStatus>>()
}

/// Returns a [`Router`] with the health route.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/health", get_with(health_status, health_status_docs))
        .with_path_items(|item| item.tag("Monitors"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::test::{
        create_test_server_with_router, create_test_server_with_state, create_test_state,
    };

    #[tokio::test]
    async fn unreachable_database_is_unhealthy() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes())?;

        let response = server.get("/health").await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

        let status = response.json::<HealthStatus>();
        assert!(!status.is_healthy);
        Ok(())
    }

    #[tokio::test]
    async fn cached_result_is_served() -> anyhow::Result<()> {
        let state = create_test_state()?;
        state.health_cache.get_or_update(|| async { true }).await;

        let server = create_test_server_with_state(routes(), state)?;

        let response = server.get("/health").await;
        response.assert_status_ok();
        assert!(response.json::<HealthStatus>().is_healthy);
        Ok(())
    }
}
