//! Entity descriptor for Book

use super::handlers::{create_book, delete_book, get_book, list_books, update_book};
use crate::server::{AppState, EntityDescriptor};
use axum::{
    Router,
    routing::{get, post},
};

/// Descriptor for the Book entity
pub struct BookDescriptor;

impl EntityDescriptor for BookDescriptor {
    fn entity_type(&self) -> &str {
        "book"
    }

    fn build_routes(&self) -> Router<AppState> {
        Router::new()
            .route("/books", get(list_books).post(create_book))
            .route("/books/", get(list_books).post(create_book))
            .route("/books/{id}", get(get_book))
            .route("/books/{id}/edit", post(update_book).put(update_book))
            .route("/books/{id}/delete", post(delete_book).delete(delete_book))
    }
}
