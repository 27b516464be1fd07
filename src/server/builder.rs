//! ServerBuilder for fluent API to build the HTTP service

use super::entity_registry::{EntityDescriptor, EntityRegistry};
use super::exposure::RestExposure;
use super::host::{AppState, ServerHost};
use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::entities;
use crate::identity::{IdentityService, TokenService};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the bookshelf HTTP service
///
/// Anything not supplied is derived from the configuration: the identity
/// service signs with `auth.jwt_secret`, and the catalog runs over in-memory
/// stores sharing the identity service's users.
///
/// # Example
///
/// ```ignore
/// ServerBuilder::new()
///     .with_config(AppConfig::load(None)?)
///     .serve("127.0.0.1:8000")
///     .await?;
/// ```
pub struct ServerBuilder {
    config: AppConfig,
    identity: Option<IdentityService>,
    catalog: Option<Catalog>,
    entity_registry: EntityRegistry,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a builder with default configuration and every entity registered
    pub fn new() -> Self {
        let mut entity_registry = EntityRegistry::new();
        entities::register_all(&mut entity_registry);

        Self {
            config: AppConfig::default(),
            identity: None,
            catalog: None,
            entity_registry,
            custom_routes: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Use an existing identity service instead of one built from config
    pub fn with_identity(mut self, identity: IdentityService) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Use an existing catalog instead of a fresh in-memory one
    ///
    /// The catalog should share its user store with the identity service.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Register an extra entity descriptor
    pub fn register_entity(mut self, descriptor: impl EntityDescriptor + 'static) -> Self {
        self.entity_registry.register(Box::new(descriptor));
        self
    }

    /// Add custom routes to the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(self) -> Result<ServerHost> {
        let identity = match self.identity {
            Some(identity) => identity,
            None => {
                let ttl = chrono::Duration::try_hours(self.config.auth.token_ttl_hours)
                    .ok_or_else(|| anyhow::anyhow!("auth.token_ttl_hours is out of range"))?;
                IdentityService::in_memory(TokenService::new(&self.config.auth.jwt_secret, ttl))
            }
        };

        let catalog = match self.catalog {
            Some(catalog) => catalog,
            None => Catalog::in_memory(identity.users())
                .with_page_size(self.config.pagination.page_size),
        };

        Ok(ServerHost::new(
            self.config,
            AppState { catalog, identity },
            self.entity_registry,
        ))
    }

    /// Build the final router
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        RestExposure::build_router(host, custom_routes)
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `addr`, serves requests and stops on SIGTERM or Ctrl+C.
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
