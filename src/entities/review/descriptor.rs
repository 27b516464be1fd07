//! Entity descriptor for BookReview

use super::handlers::{create_review, delete_review, update_review};
use crate::server::{AppState, EntityDescriptor};
use axum::{Router, routing::post};

/// Descriptor for the BookReview entity
pub struct ReviewDescriptor;

impl EntityDescriptor for ReviewDescriptor {
    fn entity_type(&self) -> &str {
        "review"
    }

    fn build_routes(&self) -> Router<AppState> {
        Router::new()
            .route("/books/{id}/review", post(create_review))
            .route(
                "/books/{id}/review-edit/{review_id}",
                post(update_review).put(update_review),
            )
            .route(
                "/books/{id}/review-delete/{review_id}",
                post(delete_review).delete(delete_review),
            )
    }
}
