//! Server host holding everything the HTTP exposures need
//!
//! The host bundles the loaded configuration, the shared [`AppState`] that
//! handlers extract from, and the entity registry that contributes routes.
//! It knows nothing about transport; exposures turn it into a router.

use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::identity::IdentityService;
use crate::server::entity_registry::EntityRegistry;
use axum::extract::FromRef;
use std::sync::Arc;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub identity: IdentityService,
}

impl FromRef<AppState> for Catalog {
    fn from_ref(state: &AppState) -> Self {
        state.catalog.clone()
    }
}

impl FromRef<AppState> for IdentityService {
    fn from_ref(state: &AppState) -> Self {
        state.identity.clone()
    }
}

/// Host context containing all service state
///
/// # Example
///
/// ```rust,ignore
/// let host = Arc::new(ServerBuilder::new().with_config(config).build_host()?);
/// let app = RestExposure::build_router(host, vec![])?;
/// ```
pub struct ServerHost {
    /// Loaded configuration
    pub config: Arc<AppConfig>,

    /// Handler state
    pub state: AppState,

    /// Entity registry for the web routes
    pub entity_registry: EntityRegistry,
}

impl ServerHost {
    pub fn new(config: AppConfig, state: AppState, entity_registry: EntityRegistry) -> Self {
        Self {
            config: Arc::new(config),
            state,
            entity_registry,
        }
    }

    /// Entity types registered in the host
    pub fn entity_types(&self) -> Vec<&str> {
        self.entity_registry.entity_types()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.state.catalog
    }

    pub fn identity(&self) -> &IdentityService {
        &self.state.identity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::TokenService;

    fn make_host() -> ServerHost {
        let identity = IdentityService::in_memory(TokenService::new("s", chrono::Duration::days(1)));
        let catalog = Catalog::in_memory(identity.users()).with_page_size(5);
        ServerHost::new(
            AppConfig::default(),
            AppState { catalog, identity },
            EntityRegistry::new(),
        )
    }

    #[test]
    fn test_entity_types_empty_registry() {
        let host = make_host();
        assert!(host.entity_types().is_empty());
    }

    #[test]
    fn test_catalog_accessible_from_host() {
        let host = make_host();
        assert_eq!(host.catalog().page_size(), 5);
        assert_eq!(host.config.pagination.page_size, 10);
    }

    #[tokio::test]
    async fn test_catalog_and_identity_share_users() {
        let host = make_host();
        let user = crate::entities::User::new("ann".into(), "ann@x.com".into(), String::new());
        host.identity().users().create(user).await.unwrap();

        assert_eq!(host.identity().user(1).await.unwrap().username, "ann");
    }
}
