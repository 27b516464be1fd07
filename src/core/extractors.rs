//! Axum extractors for the requesting user and route arguments
//!
//! Credentials travel as `Authorization: Bearer <token>`. A request with no
//! header is anonymous; a request with a malformed, expired or revoked token
//! is rejected outright with `Unauthorized`.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::core::auth::AuthContext;
use crate::core::error::BookshelfError;
use crate::identity::IdentityService;

const BEARER: &str = "Bearer ";

/// Path parameters; unparseable segments answer `404` like an unknown route
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(BookshelfError))]
pub struct PathArgs<T>(pub T);

/// Query string; malformed parameters answer a `400` in the usual error shape
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(BookshelfError))]
pub struct ListQuery<T>(pub T);

/// The bearer token carried by a request, if any
pub fn bearer_token(parts: &Parts) -> Result<Option<&str>, BookshelfError> {
    let Some(value) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value
        .to_str()
        .map_err(|_| BookshelfError::unauthorized("Invalid authorization header."))?;
    match value.strip_prefix(BEARER).map(str::trim) {
        Some(token) if !token.is_empty() => Ok(Some(token)),
        _ => Err(BookshelfError::unauthorized("Invalid authorization header.")),
    }
}

/// Whoever is making the request, possibly nobody
#[derive(Debug, Clone)]
pub struct MaybeUser(pub AuthContext);

impl<S> FromRequestParts<S> for MaybeUser
where
    IdentityService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = BookshelfError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match bearer_token(parts)? {
            Some(token) => {
                let identity = IdentityService::from_ref(state);
                Ok(MaybeUser(identity.authenticate(token).await?))
            }
            None => Ok(MaybeUser(AuthContext::Anonymous)),
        }
    }
}

/// An authenticated user; anonymous requests are rejected
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: u64,
    pub context: AuthContext,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    IdentityService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = BookshelfError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let MaybeUser(context) = MaybeUser::from_request_parts(parts, state).await?;
        match context.user_id() {
            Some(user_id) => Ok(CurrentUser { user_id, context }),
            None => Err(BookshelfError::unauthorized(
                "Authentication credentials were not provided.",
            )),
        }
    }
}
