//! Entity registry collecting the web routes of every entity

use super::host::AppState;
use axum::Router;
use std::collections::BTreeMap;

/// Describes how to build the web routes for one entity
///
/// Routes are returned without state; the exposure attaches [`AppState`]
/// once all entities are merged.
pub trait EntityDescriptor: Send + Sync {
    /// The entity type name (singular, e.g. "book")
    fn entity_type(&self) -> &str;

    /// Build the routes for this entity
    fn build_routes(&self) -> Router<AppState>;
}

/// Registry for all entities in the application
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: BTreeMap<String, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            descriptors: BTreeMap::new(),
        }
    }

    /// Register an entity descriptor, replacing any with the same type name
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let entity_type = descriptor.entity_type().to_string();
        self.descriptors.insert(entity_type, descriptor);
    }

    /// Merge all entity routes into a single router
    pub fn build_routes(&self) -> Router<AppState> {
        self.descriptors
            .values()
            .fold(Router::new(), |router, descriptor| {
                router.merge(descriptor.build_routes())
            })
    }

    /// Registered entity types, in name order
    pub fn entity_types(&self) -> Vec<&str> {
        self.descriptors.keys().map(|s| s.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockDescriptor {
        entity_type: String,
    }

    impl MockDescriptor {
        fn new(entity_type: &str) -> Self {
            Self {
                entity_type: entity_type.to_string(),
            }
        }
    }

    impl EntityDescriptor for MockDescriptor {
        fn entity_type(&self) -> &str {
            &self.entity_type
        }

        fn build_routes(&self) -> Router<AppState> {
            Router::new()
        }
    }

    #[test]
    fn test_new_registry_is_empty() {
        assert!(EntityRegistry::new().entity_types().is_empty());
    }

    #[test]
    fn test_register_multiple_entities_sorted() {
        let mut registry = EntityRegistry::new();
        registry.register(Box::new(MockDescriptor::new("review")));
        registry.register(Box::new(MockDescriptor::new("book")));
        assert_eq!(registry.entity_types(), vec!["book", "review"]);
    }

    #[test]
    fn test_register_duplicate_replaces() {
        let mut registry = EntityRegistry::new();
        registry.register(Box::new(MockDescriptor::new("book")));
        registry.register(Box::new(MockDescriptor::new("book")));
        assert_eq!(registry.entity_types(), vec!["book"]);
    }

    #[test]
    fn test_build_routes_with_entities() {
        let mut registry = EntityRegistry::new();
        registry.register(Box::new(MockDescriptor::new("book")));
        let _router = registry.build_routes();
    }
}
