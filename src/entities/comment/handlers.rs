//! Comment HTTP handlers, nested under the book of their review

use super::model::{CommentForm, ReviewComment};
use crate::catalog::{Catalog, ReplyDraft};
use crate::core::error::BookshelfResult;
use crate::core::extractors::{CurrentUser, PathArgs};
use crate::core::validation::Validated;
use axum::{extract::State, http::StatusCode, response::Json};

pub async fn create_comment(
    State(catalog): State<Catalog>,
    user: CurrentUser,
    PathArgs((book_id, review_id)): PathArgs<(u64, u64)>,
    Validated(form): Validated<CommentForm>,
) -> BookshelfResult<(StatusCode, Json<ReviewComment>)> {
    let comment = catalog
        .create_comment(&user.context, book_id, review_id, None, form)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// The prefilled reply form
pub async fn reply_form(
    State(catalog): State<Catalog>,
    _user: CurrentUser,
    PathArgs((book_id, review_id, reply_id)): PathArgs<(u64, u64, u64)>,
) -> BookshelfResult<Json<ReplyDraft>> {
    Ok(Json(catalog.reply_draft(book_id, review_id, reply_id).await?))
}

pub async fn create_reply(
    State(catalog): State<Catalog>,
    user: CurrentUser,
    PathArgs((book_id, review_id, reply_id)): PathArgs<(u64, u64, u64)>,
    Validated(form): Validated<CommentForm>,
) -> BookshelfResult<(StatusCode, Json<ReviewComment>)> {
    let comment = catalog
        .create_comment(&user.context, book_id, review_id, Some(reply_id), form)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn update_comment(
    State(catalog): State<Catalog>,
    user: CurrentUser,
    PathArgs((book_id, id)): PathArgs<(u64, u64)>,
    Validated(form): Validated<CommentForm>,
) -> BookshelfResult<Json<ReviewComment>> {
    let comment = catalog
        .update_comment(&user.context, book_id, id, form)
        .await?;
    Ok(Json(comment))
}

pub async fn delete_comment(
    State(catalog): State<Catalog>,
    user: CurrentUser,
    PathArgs((book_id, id)): PathArgs<(u64, u64)>,
) -> BookshelfResult<StatusCode> {
    catalog.delete_comment(&user.context, book_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
