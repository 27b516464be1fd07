//! Entity descriptor for User

use super::handlers::{change_password, get_user, sign_in, sign_up, update_user};
use crate::server::{AppState, EntityDescriptor};
use axum::{
    Router,
    routing::{get, post},
};

/// Descriptor for the User entity, including the sign-up and sign-in forms
pub struct UserDescriptor;

impl EntityDescriptor for UserDescriptor {
    fn entity_type(&self) -> &str {
        "user"
    }

    fn build_routes(&self) -> Router<AppState> {
        Router::new()
            .route("/sign_up", post(sign_up))
            .route("/sign_in", post(sign_in))
            .route("/users/{id}", get(get_user))
            .route("/users/{id}/edit", post(update_user).put(update_user))
            .route(
                "/users/{id}/password",
                post(change_password).put(change_password),
            )
    }
}
