//! REST exposure for the service
//!
//! Consumes a [`ServerHost`] and produces the complete axum `Router`: health
//! checks, entity web routes, the JSON API, uploaded media and any custom
//! routes, wrapped in request tracing and optional CORS.

use super::super::host::ServerHost;
use super::api::ApiExposure;
use anyhow::Result;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// REST exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the router from a host
    ///
    /// Returns a router serving:
    /// - `/health`, `/healthz`
    /// - every registered entity's web routes
    /// - the `/api` routes
    /// - `/media/*` from the configured media root
    /// - custom routes
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Result<Router> {
        let routes = host
            .entity_registry
            .build_routes()
            .merge(ApiExposure::routes())
            .with_state(host.state.clone());

        let mut app = Self::health_routes()
            .merge(routes)
            .nest_service("/media", ServeDir::new(&host.config.media.root));

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        let app = if host.config.cors.allow_any_origin {
            app.layer(CorsLayer::permissive())
        } else {
            app
        };

        Ok(app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http())))
    }

    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "bookshelf"
        }))
    }
}
