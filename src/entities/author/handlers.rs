//! Author HTTP handlers

use super::model::{Author, AuthorForm, AuthorUpdateForm};
use crate::catalog::{AuthorDetail, Catalog};
use crate::core::error::BookshelfResult;
use crate::core::extractors::{CurrentUser, ListQuery, PathArgs};
use crate::core::query::{AuthorListParams, PaginatedResponse};
use crate::core::validation::Validated;
use axum::{extract::State, http::StatusCode, response::Json};

pub async fn list_authors(
    State(catalog): State<Catalog>,
    ListQuery(params): ListQuery<AuthorListParams>,
) -> BookshelfResult<Json<PaginatedResponse<Author>>> {
    let page = catalog
        .list_authors(params.search.as_deref(), params.page)
        .await?;
    Ok(Json(page))
}

pub async fn get_author(
    State(catalog): State<Catalog>,
    PathArgs(id): PathArgs<u64>,
) -> BookshelfResult<Json<AuthorDetail>> {
    Ok(Json(catalog.author_detail(id).await?))
}

pub async fn create_author(
    State(catalog): State<Catalog>,
    user: CurrentUser,
    Validated(form): Validated<AuthorForm>,
) -> BookshelfResult<(StatusCode, Json<Author>)> {
    let author = catalog.create_author(&user.context, form).await?;
    Ok((StatusCode::CREATED, Json(author)))
}

pub async fn update_author(
    State(catalog): State<Catalog>,
    user: CurrentUser,
    PathArgs(id): PathArgs<u64>,
    Validated(form): Validated<AuthorUpdateForm>,
) -> BookshelfResult<Json<Author>> {
    Ok(Json(catalog.update_author(&user.context, id, form).await?))
}
