//! Server module for building the HTTP service
//!
//! [`ServerBuilder`] assembles the configuration, the identity service and
//! the catalog into a [`ServerHost`], registers every entity's web routes
//! and exposes the result through [`RestExposure`].

pub mod builder;
pub mod entity_registry;
pub mod exposure;
pub mod host;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry};
pub use exposure::{ApiExposure, RestExposure};
pub use host::{AppState, ServerHost};
