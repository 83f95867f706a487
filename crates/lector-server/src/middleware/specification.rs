//! OpenAPI document generation and the Scalar reference UI.
//!
//! ```rust
//! use aide::axum::ApiRouter;
//! use axum::Router;
//! use lector_server::middleware::{OpenApiConfig, RouterOpenApiExt};
//!
//! let app: Router<()> = ApiRouter::new()
//!     .with_open_api(OpenApiConfig::default());
//! ```

use aide::axum::ApiRouter;
use aide::openapi::{Info, OpenApi};
use aide::scalar::Scalar;
use axum::routing::{Router, get};
use axum::{Extension, Json};
#[cfg(any(test, feature = "config"))]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Paths for the OpenAPI document and the Scalar UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(any(test, feature = "config"), derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct OpenApiConfig {
    /// Path which exposes the OpenAPI JSON document.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long, env = "OPENAPI_JSON_PATH", default_value = "/api/openapi.json")
    )]
    pub open_api_json: String,

    /// Path which exposes the Scalar API reference UI.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long, env = "OPENAPI_SCALAR_PATH", default_value = "/api/scalar")
    )]
    pub scalar_ui: String,
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            open_api_json: "/api/openapi.json".to_owned(),
            scalar_ui: "/api/scalar".to_owned(),
        }
    }
}

/// Extension trait for [`ApiRouter`] to serve its OpenAPI document.
pub trait RouterOpenApiExt<S> {
    /// Finishes the router with Lector's API info.
    fn with_open_api(self, config: OpenApiConfig) -> Router<S>;

    /// Finishes the router with custom API info.
    fn with_open_api_info(self, config: OpenApiConfig, info: Info) -> Router<S>;
}

impl<S> RouterOpenApiExt<S> for ApiRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_open_api(self, config: OpenApiConfig) -> Router<S> {
        let info = Info {
            title: "Lector API".to_owned(),
            summary: Some("Document text extraction and question answering".to_owned()),
            description: Some(
                "Upload PDF and image documents, read their extracted text, ask a language \
                 model questions about them and download the conversation as a report."
                    .to_owned(),
            ),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            ..Info::default()
        };

        self.with_open_api_info(config, info)
    }

    fn with_open_api_info(self, config: OpenApiConfig, info: Info) -> Router<S> {
        async fn serve_openapi(Extension(api): Extension<OpenApi>) -> Json<OpenApi> {
            Json(api)
        }

        let mut api = OpenApi {
            info,
            ..OpenApi::default()
        };

        let scalar = Scalar::new(&config.open_api_json);
        let router = self
            .route(&config.scalar_ui, scalar.axum_route())
            .route(&config.open_api_json, get(serve_openapi));

        router.finish_api(&mut api).layer(Extension(api))
    }
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;

    use super::*;
    use crate::handler::routes;
    use crate::handler::test::create_test_state;

    #[tokio::test]
    async fn document_lists_every_route() -> anyhow::Result<()> {
        let state = create_test_state()?;
        let app: Router = routes()
            .with_open_api(OpenApiConfig::default())
            .with_state(state);
        let server = TestServer::new(app)?;

        let response = server.get("/api/openapi.json").await;
        response.assert_status_ok();

        let document = response.json::<serde_json::Value>();
        assert_eq!(document["info"]["title"], "Lector API");

        let paths = &document["paths"];
        for path in [
            "/auth/register",
            "/auth/login",
            "/documents",
            "/documents/upload",
            "/documents/{documentId}",
            "/documents/{documentId}/query",
            "/documents/{documentId}/download",
            "/health",
        ] {
            assert!(paths.get(path).is_some(), "missing {path}");
        }
        Ok(())
    }

    #[tokio::test]
    async fn scalar_ui_is_served() -> anyhow::Result<()> {
        let app: Router = ApiRouter::new().with_open_api(OpenApiConfig::default());
        let server = TestServer::new(app)?;

        server.get("/api/scalar").await.assert_status_ok();
        Ok(())
    }
}
