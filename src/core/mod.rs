//! Core module containing the fundamental traits and types of the service

pub mod auth;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod query;
pub mod service;
pub mod validation;

pub use auth::{Action, AuthContext, AuthPolicy, Owned, Owner, Resource, Role};
pub use entity::Entity;
pub use error::{BookshelfError, BookshelfResult};
pub use extractors::{CurrentUser, MaybeUser};
pub use service::DataService;
