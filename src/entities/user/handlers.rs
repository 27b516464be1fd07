//! User account HTTP handlers: sign-up, sign-in and profile pages

use super::model::{LoginForm, PasswordChangeForm, ProfileForm, SignUpForm, User};
use crate::core::error::BookshelfResult;
use crate::core::extractors::{CurrentUser, PathArgs};
use crate::core::validation::Validated;
use crate::identity::{IdentityService, Session};
use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;

/// A user with a token, as returned by sign-up, sign-in and `/api/user/`
#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub user: UserWithToken,
}

#[derive(Debug, Serialize)]
pub struct UserWithToken {
    #[serde(flatten)]
    pub user: User,
    pub token: String,
}

impl From<Session> for UserEnvelope {
    fn from(session: Session) -> Self {
        Self {
            user: UserWithToken {
                user: session.user,
                token: session.token,
            },
        }
    }
}

pub async fn sign_up(
    State(identity): State<IdentityService>,
    Validated(form): Validated<SignUpForm>,
) -> BookshelfResult<(StatusCode, Json<UserEnvelope>)> {
    let session = identity.register(form).await?;
    Ok((StatusCode::CREATED, Json(session.into())))
}

pub async fn sign_in(
    State(identity): State<IdentityService>,
    Validated(form): Validated<LoginForm>,
) -> BookshelfResult<Json<UserEnvelope>> {
    Ok(Json(identity.login(form).await?.into()))
}

pub async fn get_user(
    State(identity): State<IdentityService>,
    PathArgs(id): PathArgs<u64>,
) -> BookshelfResult<Json<User>> {
    Ok(Json(identity.user(id).await?))
}

pub async fn update_user(
    State(identity): State<IdentityService>,
    user: CurrentUser,
    PathArgs(id): PathArgs<u64>,
    Validated(form): Validated<ProfileForm>,
) -> BookshelfResult<Json<User>> {
    Ok(Json(identity.update_profile(&user.context, id, form).await?))
}

pub async fn change_password(
    State(identity): State<IdentityService>,
    user: CurrentUser,
    PathArgs(id): PathArgs<u64>,
    Validated(form): Validated<PasswordChangeForm>,
) -> BookshelfResult<Json<User>> {
    Ok(Json(identity.change_password(&user.context, id, form).await?))
}
