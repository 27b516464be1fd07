//! Entity descriptor for ReviewComment

use super::handlers::{create_comment, create_reply, delete_comment, reply_form, update_comment};
use crate::server::{AppState, EntityDescriptor};
use axum::{
    Router,
    routing::{get, post},
};

/// Descriptor for the ReviewComment entity
pub struct CommentDescriptor;

impl EntityDescriptor for CommentDescriptor {
    fn entity_type(&self) -> &str {
        "comment"
    }

    fn build_routes(&self) -> Router<AppState> {
        Router::new()
            .route(
                "/books/{id}/reviews/{review_id}/comment",
                post(create_comment),
            )
            .route(
                "/books/{id}/reviews/{review_id}/comment/reply/{reply_id}",
                get(reply_form).post(create_reply),
            )
            .route(
                "/books/{id}/comment-edit/{comment_id}",
                post(update_comment).put(update_comment),
            )
            .route(
                "/books/{id}/comment-delete/{comment_id}",
                post(delete_comment).delete(delete_comment),
            )
    }
}
