//! Entity descriptor for Author

use super::handlers::{create_author, get_author, list_authors, update_author};
use crate::server::{AppState, EntityDescriptor};
use axum::{
    Router,
    routing::{get, post},
};

/// Descriptor for the Author entity
pub struct AuthorDescriptor;

impl EntityDescriptor for AuthorDescriptor {
    fn entity_type(&self) -> &str {
        "author"
    }

    fn build_routes(&self) -> Router<AppState> {
        Router::new()
            .route("/authors", get(list_authors).post(create_author))
            .route("/authors/", get(list_authors).post(create_author))
            .route("/authors/{id}", get(get_author))
            .route("/authors/{id}/edit", post(update_author).put(update_author))
    }
}
