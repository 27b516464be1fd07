//! Book HTTP handlers

use super::model::{Book, BookForm};
use crate::catalog::{BookDetail, Catalog};
use crate::core::error::BookshelfResult;
use crate::core::extractors::{CurrentUser, ListQuery, MaybeUser, PathArgs};
use crate::core::query::{BookListParams, PaginatedResponse};
use crate::core::validation::Validated;
use axum::{extract::State, http::StatusCode, response::Json};

pub async fn list_books(
    State(catalog): State<Catalog>,
    ListQuery(params): ListQuery<BookListParams>,
) -> BookshelfResult<Json<PaginatedResponse<Book>>> {
    let page = catalog
        .list_books(params.search.as_deref(), params.page)
        .await?;
    Ok(Json(page))
}

pub async fn get_book(
    State(catalog): State<Catalog>,
    MaybeUser(actor): MaybeUser,
    PathArgs(id): PathArgs<u64>,
) -> BookshelfResult<Json<BookDetail>> {
    Ok(Json(catalog.book_detail(&actor, id).await?))
}

pub async fn create_book(
    State(catalog): State<Catalog>,
    user: CurrentUser,
    Validated(form): Validated<BookForm>,
) -> BookshelfResult<(StatusCode, Json<Book>)> {
    let book = catalog.create_book(&user.context, form).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

pub async fn update_book(
    State(catalog): State<Catalog>,
    user: CurrentUser,
    PathArgs(id): PathArgs<u64>,
    Validated(form): Validated<BookForm>,
) -> BookshelfResult<Json<Book>> {
    Ok(Json(catalog.update_book(&user.context, id, form).await?))
}

pub async fn delete_book(
    State(catalog): State<Catalog>,
    user: CurrentUser,
    PathArgs(id): PathArgs<u64>,
) -> BookshelfResult<StatusCode> {
    catalog.delete_book(&user.context, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
