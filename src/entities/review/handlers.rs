//! Review HTTP handlers, nested under their book

use super::model::{BookReview, ReviewForm};
use crate::catalog::Catalog;
use crate::core::error::BookshelfResult;
use crate::core::extractors::{CurrentUser, PathArgs};
use crate::core::validation::Validated;
use axum::{extract::State, http::StatusCode, response::Json};

pub async fn create_review(
    State(catalog): State<Catalog>,
    user: CurrentUser,
    PathArgs(book_id): PathArgs<u64>,
    Validated(form): Validated<ReviewForm>,
) -> BookshelfResult<(StatusCode, Json<BookReview>)> {
    let review = catalog.create_review(&user.context, book_id, form).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

pub async fn update_review(
    State(catalog): State<Catalog>,
    user: CurrentUser,
    PathArgs((book_id, id)): PathArgs<(u64, u64)>,
    Validated(form): Validated<ReviewForm>,
) -> BookshelfResult<Json<BookReview>> {
    let review = catalog
        .update_review(&user.context, book_id, id, form)
        .await?;
    Ok(Json(review))
}

pub async fn delete_review(
    State(catalog): State<Catalog>,
    user: CurrentUser,
    PathArgs((book_id, id)): PathArgs<(u64, u64)>,
) -> BookshelfResult<StatusCode> {
    catalog.delete_review(&user.context, book_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
